//! Itemized style: one header name per line.
//!
//! ```text
//! --- data.csv ---
//! name
//! age
//! city
//!
//! ```

use super::LineRenderer;

#[derive(Debug, Clone, Copy, Default)]
pub struct Itemized;

impl LineRenderer for Itemized {
    fn success_lines(&self, identifier: &str, headers: &[String]) -> Vec<String> {
        let mut lines = Vec::with_capacity(headers.len() + 2);
        lines.push(format!("--- {identifier} ---"));
        lines.extend(headers.iter().cloned());
        lines.push(String::new());
        lines
    }
}
