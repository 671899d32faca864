//! Error types for tvgenlib

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`TvgenError`].
///
/// Every error is fatal for the run; the kind only tells the caller which
/// part of the input was at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The header row could not be turned into a formatter set, or a data row
    /// does not line up with it
    Configuration,
    /// A data row or cell is malformed
    Format,
    /// An external resource (lookup table) is missing or unusable
    Resource,
    /// Reading or writing files failed
    Io,
}

/// Errors that can occur while converting a test-vector table
#[derive(Error, Debug)]
pub enum TvgenError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write an output file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The input has no header row
    #[error("missing header row with column formats")]
    MissingHeader,

    /// No formatter accepted the directive
    #[error("unrecognized column format '{0}'")]
    UnrecognizedFormat(String),

    /// The directive names a known format but its width is unusable
    #[error("invalid width in column format '{directive}': {message}")]
    InvalidWidth { directive: String, message: String },

    /// A data row does not have as many cells as the header declares
    #[error("header declares {declared} columns but the row has {found}")]
    ColumnMismatch { declared: usize, found: usize },

    /// The row has no unique empty column between inputs and expected values
    #[error(
        "could not detect input and output sections (found {found} sections); \
         separate input and expected data with exactly one empty column"
    )]
    MissingSections { found: usize },

    /// A cell is not a valid number in the column's base
    #[error("'{value}' is not a valid base {base} number")]
    InvalidNumber { value: String, base: u32 },

    /// A value needs more bits than the column provides
    #[error("value '{value}' does not fit into {width} bits")]
    ValueTooWide { value: String, width: u32 },

    /// A lookup table could not be loaded
    #[error("failed to load lookup table '{path}': {message}")]
    TableLoad { path: PathBuf, message: String },

    /// A cell value has no entry in the column's lookup table
    #[error("no entry for '{key}' in lookup table '{path}'")]
    MissingTableKey { key: String, path: PathBuf },

    /// Any error raised while formatting a data row, tagged with its line
    #[error("line {line}: {source}")]
    Row {
        line: usize,
        source: Box<TvgenError>,
    },
}

impl TvgenError {
    /// Tag an error with the 1-based line number of the row that caused it.
    pub fn at_line(self, line: usize) -> Self {
        TvgenError::Row {
            line,
            source: Box::new(self),
        }
    }

    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TvgenError::UnrecognizedFormat(_)
            | TvgenError::InvalidWidth { .. }
            | TvgenError::ColumnMismatch { .. }
            | TvgenError::MissingHeader => ErrorKind::Configuration,
            TvgenError::MissingSections { .. }
            | TvgenError::InvalidNumber { .. }
            | TvgenError::ValueTooWide { .. } => ErrorKind::Format,
            TvgenError::TableLoad { .. } | TvgenError::MissingTableKey { .. } => {
                ErrorKind::Resource
            }
            TvgenError::FileRead { .. } | TvgenError::FileWrite { .. } => ErrorKind::Io,
            TvgenError::Row { source, .. } => source.kind(),
        }
    }
}
