//! Splitting raw table lines into sections and cells.
//!
//! Cells are separated by a single `;` or `,`. The input and expected
//! sections of a data row are separated by an empty cell, which shows up as
//! a doubled delimiter (`;;` or `,,`).

use std::sync::OnceLock;

use regex::Regex;

use crate::error::TvgenError;
use crate::Result;

fn section_boundary() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| Regex::new(";;|,,").expect("static pattern"))
}

/// Split a line into cells on every `;` or `,`.
///
/// Quotes are left in place; see [`trim_quotes`].
pub fn split_columns(line: &str) -> Vec<&str> {
    line.split([';', ',']).collect()
}

/// Split a data row into its input and expected halves.
///
/// The line must contain exactly one doubled delimiter.
pub fn split_sections(line: &str) -> Result<(&str, &str)> {
    let parts: Vec<&str> = section_boundary().split(line).collect();
    match parts[..] {
        [inputs, expected] => Ok((inputs, expected)),
        _ => Err(TvgenError::MissingSections { found: parts.len() }),
    }
}

/// Strip surrounding `"` characters from a cell.
pub fn trim_quotes(cell: &str) -> &str {
    cell.trim_matches('"')
}
