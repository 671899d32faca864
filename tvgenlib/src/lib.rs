//! # tvgenlib
//!
//! Turns a comment-annotated test-vector table into the two text streams a
//! VHDL testbench reads: one line of stimulus words per cycle and one line of
//! expected-output words per cycle.
//!
//! ## Table layout
//!
//! - **Row 0**: column formats. The first cell is a comment; every other cell
//!   holds a format directive for its column.
//! - **Row 1**: word widths, for the reader of the table. Ignored.
//! - **Rows 2..**: test vectors. A comment cell, the input cells, one empty
//!   cell, then the expected cells.
//!
//! Cells are separated by `;` or `,` and may be wrapped in `"`.
//!
//! ## Column formats
//!
//! - `F::base_10:<N>`: decimal, masked to N bits, written as N binary digits
//! - `F::base_16:<N>`: hexadecimal, written as N binary digits
//! - `F::base_2:<N>`: binary digits, copied as they are
//! - `F::lut:<N>-><file>.json`: looked up in a JSON object of strings
//! - `F::prefix:<N>`: `0x…` hex, `0b…` binary or plain decimal
//! - anything else: copied as it is
//!
//! The cell `X` becomes a don't-care word of `-` characters in every format.
//!
//! ## Logging
//!
//! This library logs through `tracing` and never installs a subscriber; set
//! one up in your application to see the output.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::path::PathBuf;
//! use tvgenlib::{convert_str, ConvertOptions, LookupTable};
//!
//! let table = "#,F::base_10:2,,F::base_10:2\n,2,,2\nc1,1,,2\nc2,3,,0";
//! let tables: HashMap<PathBuf, LookupTable> = HashMap::new();
//!
//! let streams = convert_str(table, &ConvertOptions::new(), &tables).unwrap();
//! assert_eq!(streams.input_text(), "01\n11\n11");
//! assert_eq!(streams.expected_text(), "--\n10\n00");
//! ```

pub mod assemble;
pub mod error;
pub mod format;
pub mod io;
pub mod options;
pub mod row;
pub mod table;
pub mod tokenizer;

pub use assemble::{assemble, convert_lines, convert_str, parse_header, Streams};
pub use error::{ErrorKind, TvgenError};
pub use format::{build_all, resolve, FormatKind, Formatter, FormatterSet};
pub use io::{convert_file, discard_outputs, read_lines, write_streams, OutputPaths};
pub use options::ConvertOptions;
pub use row::{format_row, FormattedRow};
pub use table::{JsonTableLoader, LookupTable, TableLoader};

/// Result type for tvgenlib operations
pub type Result<T> = std::result::Result<T, TvgenError>;
