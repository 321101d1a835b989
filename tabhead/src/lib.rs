//! # tabhead
//!
//! Header row inspector for delimited tabular files.
//!
//! Reading (`inspect`) and presentation (`render`) are separate: `inspect`
//! turns each source into a tagged [`InspectionResult`], and `render` maps
//! those results to display lines in the chosen [`OutputFormat`]. A failure on
//! one source never stops the others from being read.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tabhead::{InspectConfig, OutputFormat, Source, inspect, render};
//!
//! let sources = vec![Source::from("ALB_CN_1870.csv"), Source::from("ALB_CN_1880.csv")];
//! let config = InspectConfig::new("data");
//!
//! let results = inspect(&sources, &config);
//! for line in render(&results, OutputFormat::Itemized) {
//!     println!("{line}");
//! }
//! ```

mod config;
mod error;
mod format;
pub mod output;
mod report;
mod strategy;

pub use config::{DEFAULT_DELIMITER, InspectConfig, Source, parse_delimiter};
pub use error::{ErrorKind, InspectError};
pub use format::compact::{Compact, SEPARATOR_WIDTH, bracketed_list};
pub use format::itemized::Itemized;
pub use format::{LineRenderer, OutputFormat, render};
pub use report::{HeaderRow, InspectionResult, failure_count};

use tracing::debug;

use strategy::fs::read_header;

/// Read the header row of every source, in order.
///
/// Returns exactly one result per source, in input order. Sources are read
/// one at a time and each file handle is closed before the next is opened.
/// Errors never escape: each becomes an [`InspectionResult::Failure`] for its
/// own source.
#[must_use]
pub fn inspect(sources: &[Source], config: &InspectConfig) -> Vec<InspectionResult> {
    sources
        .iter()
        .map(|source| inspect_source(source, config))
        .collect()
}

/// Read the header row of a single source.
#[must_use]
pub fn inspect_source(source: &Source, config: &InspectConfig) -> InspectionResult {
    let path = config.resolve(source);
    debug!(identifier = source.identifier(), path = %path.display(), "reading header row");

    match read_header(&path, source.identifier(), config) {
        Ok(headers) => {
            debug!(
                identifier = source.identifier(),
                fields = headers.len(),
                "header row read"
            );
            InspectionResult::success(source.identifier(), headers)
        }
        Err(err) => {
            debug!(identifier = source.identifier(), error = %err, "header row unavailable");
            InspectionResult::from_error(&err)
        }
    }
}
