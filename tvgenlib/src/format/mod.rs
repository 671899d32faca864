//! Per-column value formatting.
//!
//! Every column of the table gets one [`Formatter`], chosen from the
//! directive in its header cell (see [`resolver`]). A formatter turns the
//! text of a single cell into the word written to the output streams.
//!
//! The cell value `X` means "don't care" for every formatter and is written
//! as a run of `-` as wide as the column.

pub mod numeric;
pub mod resolver;

use std::fmt;
use std::path::PathBuf;

use crate::error::TvgenError;
use crate::table::LookupTable;
use crate::Result;

pub use resolver::{build_all, resolve, resolve_with, FormatterSet, ParseFn, PARSERS};

/// Cell value standing for an unknown or irrelevant value.
pub const UNKNOWN: &str = "X";

/// Character used to build don't-care words.
pub const DONT_CARE: char = '-';

/// A run of `width` don't-care characters.
pub fn dont_care(width: usize) -> String {
    std::iter::repeat(DONT_CARE).take(width).collect()
}

/// The kinds of formatter, in the order the resolver tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Decimal,
    Hex,
    Binary,
    Lut,
    Prefix,
    Nop,
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatKind::Decimal => "base_10",
            FormatKind::Hex => "base_16",
            FormatKind::Binary => "base_2",
            FormatKind::Lut => "lut",
            FormatKind::Prefix => "prefix",
            FormatKind::Nop => "nop",
        };
        f.write_str(name)
    }
}

/// Formatting rule for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formatter {
    /// `F::base_10:<N>`: decimal, masked to N bits
    Decimal { width: u32 },
    /// `F::base_16:<N>`: hexadecimal, must fit in N bits
    Hex { width: u32 },
    /// `F::base_2:<N>`: already binary, passed through
    Binary { width: u32 },
    /// `F::lut:<N>-><file>.json`: table lookup
    Lut {
        width: u32,
        path: PathBuf,
        table: LookupTable,
    },
    /// `F::prefix:<N>`: `0x`/`0b` prefixed or plain decimal
    Prefix { width: u32 },
    /// Anything else: passed through
    Nop,
}

impl Formatter {
    /// The formatter's kind.
    pub fn kind(&self) -> FormatKind {
        match self {
            Formatter::Decimal { .. } => FormatKind::Decimal,
            Formatter::Hex { .. } => FormatKind::Hex,
            Formatter::Binary { .. } => FormatKind::Binary,
            Formatter::Lut { .. } => FormatKind::Lut,
            Formatter::Prefix { .. } => FormatKind::Prefix,
            Formatter::Nop => FormatKind::Nop,
        }
    }

    /// Declared bit width. Also the length of the don't-care word.
    pub fn width(&self) -> u32 {
        match self {
            Formatter::Decimal { width }
            | Formatter::Hex { width }
            | Formatter::Binary { width }
            | Formatter::Lut { width, .. }
            | Formatter::Prefix { width } => *width,
            Formatter::Nop => 1,
        }
    }

    /// Mask applied to decimal values.
    pub fn mask(&self) -> u64 {
        numeric::mask(self.width())
    }

    /// Format a single (already unquoted) cell.
    pub fn format(&self, cell: &str) -> Result<String> {
        if cell == UNKNOWN {
            return Ok(dont_care(self.width() as usize));
        }

        match self {
            Formatter::Decimal { width } => {
                let value = numeric::parse_decimal(cell)?;
                Ok(numeric::to_binary(value & self.mask(), *width))
            }
            Formatter::Hex { width } => {
                let value = numeric::parse_hex(cell, *width)?;
                Ok(numeric::to_binary(value, *width))
            }
            Formatter::Binary { .. } | Formatter::Nop => Ok(cell.to_string()),
            Formatter::Lut { path, table, .. } => {
                table
                    .get(cell)
                    .cloned()
                    .ok_or_else(|| TvgenError::MissingTableKey {
                        key: cell.to_string(),
                        path: path.clone(),
                    })
            }
            Formatter::Prefix { width } => {
                if let Some(hex) = cell.strip_prefix("0x") {
                    let value = numeric::parse_hex(hex, *width)?;
                    Ok(numeric::to_binary(value, *width))
                } else if let Some(bits) = cell.strip_prefix("0b") {
                    Ok(numeric::pad_binary(bits, *width))
                } else {
                    let value = numeric::parse_decimal(cell)?;
                    Ok(numeric::to_binary(value & self.mask(), *width))
                }
            }
        }
    }
}
