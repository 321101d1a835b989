//! Error types for header inspection.
//!
//! Every variant is local to a single source. `inspect` converts them into
//! `InspectionResult::Failure` at the per-source boundary, so none of them can
//! abort a run.

use serde::Serialize;
use thiserror::Error;

/// Why a source's header row could not be produced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InspectError {
    /// The file does not exist or could not be opened.
    #[error("cannot open {identifier}: {source}")]
    SourceNotFound {
        identifier: String,
        #[source]
        source: std::io::Error,
    },
    /// The file opened but holds no record to use as a header.
    #[error("{identifier} contains no header row")]
    EmptySource { identifier: String },
    /// The first record could not be read or decoded.
    #[error("cannot read header row of {identifier}: {source}")]
    MalformedRecord {
        identifier: String,
        #[source]
        source: csv::Error,
    },
}

impl InspectError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SourceNotFound { .. } => ErrorKind::SourceNotFound,
            Self::EmptySource { .. } => ErrorKind::EmptySource,
            Self::MalformedRecord { .. } => ErrorKind::MalformedRecord,
        }
    }

    /// The identifier of the source this error belongs to.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::SourceNotFound { identifier, .. }
            | Self::EmptySource { identifier }
            | Self::MalformedRecord { identifier, .. } => identifier,
        }
    }
}

/// Serializable classification of an [`InspectError`].
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorKind {
    SourceNotFound,
    EmptySource,
    MalformedRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_source_and_cause() {
        let err = InspectError::SourceNotFound {
            identifier: "ALB_CN_1880.csv".to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("ALB_CN_1880.csv"), "got: {msg}");
        assert!(msg.contains("No such file"), "got: {msg}");
        assert_eq!(err.kind(), ErrorKind::SourceNotFound);
        assert_eq!(err.identifier(), "ALB_CN_1880.csv");
    }

    #[test]
    fn test_empty_source_message() {
        let err = InspectError::EmptySource {
            identifier: "empty.csv".to_owned(),
        };
        assert_eq!(err.to_string(), "empty.csv contains no header row");
        assert_eq!(err.kind(), ErrorKind::EmptySource);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::MalformedRecord).unwrap();
        assert_eq!(json, "\"malformed_record\"");
    }
}
