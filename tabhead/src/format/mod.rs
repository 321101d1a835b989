//! Rendering of inspection results into display lines.
//!
//! Each output style is a [`LineRenderer`]:
//! - `compact`: label, bracketed header list, dashed separator
//! - `itemized`: bordered label, one field per line, blank line
//!
//! Failures render the same way in every style.

pub mod compact;
pub mod itemized;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::report::InspectionResult;

/// Rendering style, fixed for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Header list printed as a single collection followed by a separator.
    #[default]
    Compact,
    /// One header name per line followed by a blank line.
    Itemized,
}

impl OutputFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Itemized => "itemized",
        }
    }

    #[must_use]
    pub fn renderer(self) -> &'static dyn LineRenderer {
        match self {
            Self::Compact => &compact::Compact,
            Self::Itemized => &itemized::Itemized,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "itemized" => Ok(Self::Itemized),
            other => Err(format!(
                "unknown output format '{other}' (expected 'compact' or 'itemized')"
            )),
        }
    }
}

/// Maps one inspection outcome to display lines.
pub trait LineRenderer: Sync {
    /// Lines for a source whose header row was read.
    fn success_lines(&self, identifier: &str, headers: &[String]) -> Vec<String>;

    /// Lines for a source that could not be read.
    fn failure_lines(&self, identifier: &str, message: &str) -> Vec<String> {
        vec![format!("Error reading {identifier}: {message}")]
    }
}

/// Render results as display lines, in result order.
///
/// The iterator is lazy and can be cloned to replay the same lines.
pub fn render(
    results: &[InspectionResult],
    format: OutputFormat,
) -> impl Iterator<Item = String> + Clone + '_ {
    let renderer = format.renderer();
    results.iter().flat_map(move |result| match result {
        InspectionResult::Success {
            identifier,
            headers,
        } => renderer.success_lines(identifier, headers),
        InspectionResult::Failure {
            identifier,
            message,
            ..
        } => renderer.failure_lines(identifier, message),
    })
}
