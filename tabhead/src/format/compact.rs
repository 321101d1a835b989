//! Compact style: the whole header row printed as one bracketed list.
//!
//! ```text
//! Headers for data.csv:
//! ['name', 'age', 'city']
//! --------------------
//! ```

use std::fmt::{self, Write as _};

use super::LineRenderer;

/// Width of the dashed line closing each successful entry.
pub const SEPARATOR_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, Default)]
pub struct Compact;

impl LineRenderer for Compact {
    fn success_lines(&self, identifier: &str, headers: &[String]) -> Vec<String> {
        vec![
            format!("Headers for {identifier}:"),
            bracketed_list(headers),
            "-".repeat(SEPARATOR_WIDTH),
        ]
    }
}

/// Format fields as `['a', 'b']`.
///
/// Each field is single-quoted, or double-quoted when it contains a single
/// quote and no double quote. Backslashes, the active quote and non-printable
/// characters are escaped so the list stays on one line.
#[must_use]
pub fn bracketed_list(fields: &[String]) -> String {
    let quoted: Vec<String> = fields.iter().map(|f| Quoted(f).to_string()).collect();
    format!("[{}]", quoted.join(", "))
}

/// One field in its quoted, escaped form.
struct Quoted<'a>(&'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.0;
        let quote = if field.contains('\'') && !field.contains('"') {
            '"'
        } else {
            '\''
        };

        f.write_char(quote)?;
        for ch in field.chars() {
            match ch {
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                c if c == quote => {
                    f.write_char('\\')?;
                    f.write_char(c)?;
                }
                c if !is_printable(c) => {
                    let code = u32::from(c);
                    if code <= 0xff {
                        write!(f, "\\x{code:02x}")?;
                    } else if code <= 0xffff {
                        write!(f, "\\u{code:04x}")?;
                    } else {
                        write!(f, "\\U{code:08x}")?;
                    }
                }
                c => f.write_char(c)?,
            }
        }
        f.write_char(quote)
    }
}

/// Whether a character prints as itself in a quoted field.
///
/// Control (Cc), format (Cf), private-use (Co), line/paragraph separators and
/// every space separator other than U+0020 are escaped. Unassigned code points
/// print as themselves.
fn is_printable(c: char) -> bool {
    if c.is_control() {
        return false;
    }
    !matches!(
        u32::from(c),
        0x00a0
            | 0x00ad
            | 0x0600..=0x0605
            | 0x061c
            | 0x06dd
            | 0x070f
            | 0x0890..=0x0891
            | 0x08e2
            | 0x1680
            | 0x180e
            | 0x2000..=0x200f
            | 0x2028..=0x202f
            | 0x205f..=0x2064
            | 0x2066..=0x206f
            | 0x3000
            | 0xe000..=0xf8ff
            | 0xfeff
            | 0xfff9..=0xfffb
            | 0x110bd
            | 0x110cd
            | 0x13430..=0x1343f
            | 0x1bca0..=0x1bca3
            | 0x1d173..=0x1d17a
            | 0xe0001
            | 0xe0020..=0xe007f
            | 0xf0000..=0xffffd
            | 0x100000..=0x10fffd
    )
}
