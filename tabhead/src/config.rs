//! Configuration types for header inspection.
//!
//! `Source` names one tabular file; `InspectConfig` holds the run-wide
//! options. Where the source list comes from (arguments, a config file) is a
//! CLI concern and is not baked into the library.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::format::OutputFormat;

/// Default field delimiter.
pub const DEFAULT_DELIMITER: u8 = b',';

/// A reference to one tabular data file.
///
/// The identifier is used both to open the file (relative to
/// [`InspectConfig::base_dir`] unless absolute) and to label output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Source {
    identifier: String,
}

impl Source {
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl From<&str> for Source {
    fn from(identifier: &str) -> Self {
        Self::new(identifier)
    }
}

impl From<String> for Source {
    fn from(identifier: String) -> Self {
        Self::new(identifier)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)
    }
}

/// Run-wide inspection options. Fixed for the duration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct InspectConfig {
    /// Directory that relative source identifiers are resolved against (default: `.`).
    pub base_dir: PathBuf,
    /// Field delimiter byte (default: `,`).
    pub delimiter: u8,
    /// Rendering style for the whole run.
    pub format: OutputFormat,
    /// Strip surrounding whitespace from each header field (default: off).
    pub trim_fields: bool,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            delimiter: DEFAULT_DELIMITER,
            format: OutputFormat::default(),
            trim_fields: false,
        }
    }
}

impl InspectConfig {
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Filesystem path a source is read from.
    #[must_use]
    pub fn resolve(&self, source: &Source) -> PathBuf {
        let path = Path::new(source.identifier());
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

/// Parse a delimiter given as text.
///
/// Accepts a single ASCII character, or the names `tab`/`\t`.
///
/// # Errors
///
/// Returns a description of the problem if the value is empty, longer than
/// one character, or not ASCII.
pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" | "\t" => return Ok(b'\t'),
        "" => return Err("delimiter must not be empty".to_owned()),
        _ => {}
    }

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => u8::try_from(c)
            .map_err(|_| format!("delimiter '{value}' is not a single ASCII character")),
        _ => Err(format!(
            "delimiter '{value}' is not a single ASCII character"
        )),
    }
}
