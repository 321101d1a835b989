//! Inspection result types.

use serde::Serialize;

use crate::error::{ErrorKind, InspectError};

/// Field names from a source's first record, in file order.
pub type HeaderRow = Vec<String>;

/// Outcome of inspecting one source.
///
/// `inspect` returns exactly one of these per input source, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InspectionResult {
    Success {
        identifier: String,
        headers: HeaderRow,
    },
    Failure {
        identifier: String,
        kind: ErrorKind,
        /// Human-readable description naming the source and the cause.
        message: String,
    },
}

impl InspectionResult {
    #[must_use]
    pub fn success(identifier: impl Into<String>, headers: HeaderRow) -> Self {
        Self::Success {
            identifier: identifier.into(),
            headers,
        }
    }

    #[must_use]
    pub fn from_error(error: &InspectError) -> Self {
        Self::Failure {
            identifier: error.identifier().to_owned(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::Success { identifier, .. } | Self::Failure { identifier, .. } => identifier,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Header fields, if the source was read successfully.
    #[must_use]
    pub fn headers(&self) -> Option<&[String]> {
        match self {
            Self::Success { headers, .. } => Some(headers),
            Self::Failure { .. } => None,
        }
    }

    /// Failure message, if the source could not be read.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message, .. } => Some(message),
        }
    }
}

/// Number of failed results in a run.
#[must_use]
pub fn failure_count(results: &[InspectionResult]) -> usize {
    results.iter().filter(|r| !r.is_success()).count()
}
