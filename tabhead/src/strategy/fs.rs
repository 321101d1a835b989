//! Filesystem header source.
//!
//! Opens one file, reads its first record with a standard delimited-text
//! reader and releases the handle before returning. Only the first record is
//! parsed.
//!
//! The first physical line decides the shape of the result: a zero-byte file
//! has no header, while a blank first line is a header with no fields. The
//! delimited-text reader would otherwise skip the blank line and report the
//! next one.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::config::InspectConfig;
use crate::error::InspectError;
use crate::report::HeaderRow;

/// Read the header row of the file at `path`.
///
/// `identifier` labels any error that is returned.
///
/// # Errors
///
/// - [`InspectError::SourceNotFound`] if the file cannot be opened or is a
///   directory.
/// - [`InspectError::EmptySource`] if the file is empty.
/// - [`InspectError::MalformedRecord`] if the first record cannot be read or
///   is not valid UTF-8.
pub fn read_header(
    path: &Path,
    identifier: &str,
    config: &InspectConfig,
) -> Result<HeaderRow, InspectError> {
    let not_found = |source: io::Error| InspectError::SourceNotFound {
        identifier: identifier.to_owned(),
        source,
    };

    let file = File::open(path).map_err(not_found)?;
    if file.metadata().map_err(not_found)?.is_dir() {
        return Err(not_found(io::Error::new(
            io::ErrorKind::IsADirectory,
            "Is a directory",
        )));
    }

    let mut file = BufReader::new(file);
    let mut first_line = Vec::new();
    let read = file
        .read_until(b'\n', &mut first_line)
        .map_err(|e| InspectError::MalformedRecord {
            identifier: identifier.to_owned(),
            source: csv::Error::from(e),
        })?;

    if read == 0 {
        return Err(InspectError::EmptySource {
            identifier: identifier.to_owned(),
        });
    }
    if is_blank_line(&first_line) {
        return Ok(HeaderRow::new());
    }

    // Hand the line back to the reader so a quoted field may span lines.
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(config.delimiter)
        .from_reader(Cursor::new(first_line).chain(file));

    let mut record = StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => Ok(record
            .iter()
            .map(|field| {
                if config.trim_fields {
                    field.trim().to_owned()
                } else {
                    field.to_owned()
                }
            })
            .collect()),
        Ok(false) => Ok(HeaderRow::new()),
        Err(source) => Err(InspectError::MalformedRecord {
            identifier: identifier.to_owned(),
            source,
        }),
    }
}

/// A line that starts with a terminator holds no fields.
fn is_blank_line(line: &[u8]) -> bool {
    matches!(line.first(), Some(b'\n' | b'\r'))
}
