//! Settings for the `headers` command.
//!
//! Settings come from an optional YAML file and from command-line flags.
//! Both are expressed as [`HeadersSettings`]; flags win over file values and
//! flag sources are appended after the file's sources.
//!
//! ```yaml
//! base_dir: data
//! format: itemized
//! delimiter: ","
//! trim: false
//! sources:
//!   - ALB_CN_1870.csv
//!   - ALB_CN_1880.csv
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use tabhead::{InspectConfig, OutputFormat, Source, parse_delimiter};

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadersSettings {
    /// Source identifiers, in inspection order.
    pub sources: Vec<String>,
    pub format: Option<OutputFormat>,
    /// Relative paths in a config file are resolved against the file's directory.
    pub base_dir: Option<PathBuf>,
    pub delimiter: Option<String>,
    /// Strip surrounding whitespace from header fields.
    pub trim: Option<bool>,
}

impl HeadersSettings {
    /// Load settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid settings YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut settings = Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        if let Some(dir) = &settings.base_dir
            && dir.is_relative()
            && let Some(parent) = path.parent()
        {
            settings.base_dir = Some(parent.join(dir));
        }

        Ok(settings)
    }

    /// Parse settings from YAML text. Blank text yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid settings YAML.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_saphyr::from_str(content).map_err(|e| anyhow!("{e}"))
    }

    /// Layer `overrides` on top of `self`.
    #[must_use]
    pub fn merged_with(self, overrides: Self) -> Self {
        let mut sources = self.sources;
        sources.extend(overrides.sources);
        Self {
            sources,
            format: overrides.format.or(self.format),
            base_dir: overrides.base_dir.or(self.base_dir),
            delimiter: overrides.delimiter.or(self.delimiter),
            trim: overrides.trim.or(self.trim),
        }
    }

    /// Build the source list and inspection config.
    ///
    /// # Errors
    ///
    /// Returns an error if a source identifier is empty or the delimiter is invalid.
    pub fn into_inspection(self) -> Result<(Vec<Source>, InspectConfig)> {
        if self.sources.iter().any(String::is_empty) {
            bail!("Source identifiers must not be empty");
        }

        let mut config = InspectConfig::default();
        if let Some(base_dir) = self.base_dir {
            config.base_dir = base_dir;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(trim) = self.trim {
            config.trim_fields = trim;
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = parse_delimiter(&delimiter).map_err(|e| anyhow!(e))?;
        }

        let sources = self.sources.into_iter().map(Source::from).collect();
        Ok((sources, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_settings() {
        let settings = HeadersSettings::parse(
            "base_dir: data\nformat: itemized\ndelimiter: \";\"\ntrim: true\nsources:\n  - a.csv\n  - b.csv\n",
        )
        .unwrap();
        assert_eq!(settings.sources, vec!["a.csv", "b.csv"]);
        assert_eq!(settings.format, Some(OutputFormat::Itemized));
        assert_eq!(settings.base_dir, Some(PathBuf::from("data")));
        assert_eq!(settings.delimiter.as_deref(), Some(";"));
        assert_eq!(settings.trim, Some(true));
    }

    #[test]
    fn test_parse_blank_is_default() {
        assert_eq!(HeadersSettings::parse("  \n").unwrap(), HeadersSettings::default());
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        assert!(HeadersSettings::parse("files:\n  - a.csv\n").is_err());
    }

    #[test]
    fn test_merge_flags_win_and_sources_append() {
        let file = HeadersSettings {
            sources: vec!["a.csv".to_owned()],
            format: Some(OutputFormat::Itemized),
            base_dir: Some(PathBuf::from("data")),
            delimiter: None,
            trim: Some(true),
        };
        let flags = HeadersSettings {
            sources: vec!["b.csv".to_owned()],
            format: Some(OutputFormat::Compact),
            base_dir: None,
            delimiter: Some("tab".to_owned()),
            trim: None,
        };

        let merged = file.merged_with(flags);
        assert_eq!(merged.sources, vec!["a.csv", "b.csv"]);
        assert_eq!(merged.format, Some(OutputFormat::Compact));
        assert_eq!(merged.base_dir, Some(PathBuf::from("data")));

        let (sources, config) = merged.into_inspection().unwrap();
        assert_eq!(sources, vec![Source::from("a.csv"), Source::from("b.csv")]);
        assert_eq!(config.delimiter, b'\t');
        assert!(config.trim_fields);
        assert_eq!(config.base_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_into_inspection_defaults() {
        let (sources, config) = HeadersSettings::default().into_inspection().unwrap();
        assert!(sources.is_empty());
        assert_eq!(config, InspectConfig::default());
    }

    #[test]
    fn test_into_inspection_rejects_bad_delimiter() {
        let settings = HeadersSettings {
            delimiter: Some("::".to_owned()),
            ..HeadersSettings::default()
        };
        assert!(settings.into_inspection().is_err());
    }

    #[test]
    fn test_into_inspection_rejects_empty_identifier() {
        let settings = HeadersSettings {
            sources: vec![String::new()],
            ..HeadersSettings::default()
        };
        assert!(settings.into_inspection().is_err());
    }

    #[test]
    fn test_load_resolves_base_dir_against_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("headers.yaml");
        fs::write(&path, "base_dir: census\nsources: [ALB_CN_1870.csv]\n").unwrap();

        let settings = HeadersSettings::load(&path).unwrap();
        assert_eq!(settings.base_dir, Some(tmp.path().join("census")));
        assert_eq!(settings.sources, vec!["ALB_CN_1870.csv"]);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let tmp = TempDir::new().unwrap();
        let err = HeadersSettings::load(&tmp.path().join("nope.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"), "got: {err}");
    }
}
