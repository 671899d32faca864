//! Formatting a single data row.

use tracing::trace;

use crate::error::TvgenError;
use crate::format::FormatterSet;
use crate::tokenizer::{split_columns, split_sections, trim_quotes};
use crate::Result;

/// The formatted words of one data row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedRow {
    /// Words of the input section, in column order
    pub inputs: Vec<String>,
    /// Words of the expected section, in column order
    pub expected: Vec<String>,
}

impl FormattedRow {
    /// Input words joined into one output line.
    pub fn input_line(&self) -> String {
        self.inputs.join(" ")
    }

    /// Expected words joined into one output line.
    pub fn expected_line(&self) -> String {
        self.expected.join(" ")
    }
}

/// Format one data row.
///
/// The row is `comment, inputs..., <empty>, expected...`. Input cell `i`
/// uses formatter `i`; expected cell `j` uses formatter `inputs + 1 + j`,
/// skipping the formatter of the empty separator column.
pub fn format_row(line: &str, formatters: &FormatterSet) -> Result<FormattedRow> {
    let (input_section, expected_section) = split_sections(line)?;

    let input_cells: Vec<&str> = split_columns(input_section).into_iter().skip(1).collect();
    let expected_cells = split_columns(expected_section);

    let found = input_cells.len() + 1 + expected_cells.len();
    if found != formatters.len() {
        return Err(TvgenError::ColumnMismatch {
            declared: formatters.len(),
            found,
        });
    }

    let expected_offset = input_cells.len() + 1;
    let inputs = format_cells(&input_cells, 0, formatters)?;
    let expected = format_cells(&expected_cells, expected_offset, formatters)?;

    trace!(inputs = inputs.len(), expected = expected.len(), "Formatted row");
    Ok(FormattedRow { inputs, expected })
}

fn format_cells(cells: &[&str], offset: usize, formatters: &FormatterSet) -> Result<Vec<String>> {
    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let formatter = formatters
                .get(offset + i)
                .ok_or(TvgenError::ColumnMismatch {
                    declared: formatters.len(),
                    found: offset + i + 1,
                })?;
            formatter.format(trim_quotes(cell))
        })
        .collect()
}
