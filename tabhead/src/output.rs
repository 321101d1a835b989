//! Writers for inspection results.
//!
//! Plain text goes through [`crate::render`]; JSON serializes the tagged
//! results directly. Colour is left to the CLI layer.

use std::io::Write;

use crate::format::{OutputFormat, render};
use crate::report::InspectionResult;

/// Write rendered lines, one per output line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_text(
    results: &[InspectionResult],
    format: OutputFormat,
    writer: &mut dyn Write,
) -> anyhow::Result<()> {
    for line in render(results, format) {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

/// Write results as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(results: &[InspectionResult], writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    writeln!(writer, "{json}")?;
    Ok(())
}
