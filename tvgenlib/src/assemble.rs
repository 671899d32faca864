//! Assembling the input and expected streams of a whole table.
//!
//! Row 0 of a table holds the column formats and row 1 the word widths,
//! which are informational only. Every following row is one test vector.
//!
//! The design under test answers one cycle late (three with synchronization
//! delay), so the streams are shifted against each other: the last input
//! line is repeated once per latency cycle, and the expected stream starts
//! with as many don't-care lines.

use tracing::{debug, info, instrument};

use crate::error::TvgenError;
use crate::format::{build_all, dont_care, FormatterSet};
use crate::options::ConvertOptions;
use crate::row::{format_row, FormattedRow};
use crate::table::TableLoader;
use crate::tokenizer::split_columns;
use crate::Result;

/// Index of the first data row in a table.
pub const FIRST_DATA_ROW: usize = 2;

/// The two output streams of a conversion, one entry per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Streams {
    /// Stimulus lines
    pub inputs: Vec<String>,
    /// Expected-output lines
    pub expected: Vec<String>,
}

impl Streams {
    /// Input stream as file content: newline separated, no trailing newline.
    pub fn input_text(&self) -> String {
        self.inputs.join("\n")
    }

    /// Expected stream as file content: newline separated, no trailing newline.
    pub fn expected_text(&self) -> String {
        self.expected.join("\n")
    }
}

/// Build the formatter set from a header line.
///
/// The first header cell belongs to the comment column and is ignored.
pub fn parse_header(header: &str, loader: &dyn TableLoader) -> Result<FormatterSet> {
    let directives: Vec<&str> = split_columns(header).into_iter().skip(1).collect();
    build_all(&directives, loader)
}

/// A line of don't-care words matching the widths of `words`.
pub fn dont_care_line(words: &[String]) -> String {
    words
        .iter()
        .map(|word| dont_care(word.chars().count()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lay out formatted rows as the two output streams, adding latency padding.
pub fn assemble(rows: &[FormattedRow], options: &ConvertOptions) -> Streams {
    let latency = options.latency();
    let mut streams = Streams::default();

    for (i, row) in rows.iter().enumerate() {
        let input_line = row.input_line();
        streams.inputs.push(input_line.clone());

        if i + 1 == rows.len() {
            debug!(copies = latency, "Holding last input for output latency");
            streams
                .inputs
                .extend(std::iter::repeat(input_line).take(latency));
        }

        if i == 0 {
            debug!(lines = latency, "Padding expected stream start");
            let line = dont_care_line(&row.expected);
            streams.expected.extend(std::iter::repeat(line).take(latency));
        }

        streams.expected.push(row.expected_line());
    }

    streams
}

/// Convert the lines of a table into input and expected streams.
///
/// Any malformed header or row aborts the whole conversion; errors from data
/// rows carry the 1-based line number.
#[instrument(skip_all, fields(lines = lines.len()))]
pub fn convert_lines<S: AsRef<str>>(
    lines: &[S],
    options: &ConvertOptions,
    loader: &dyn TableLoader,
) -> Result<Streams> {
    let header = lines.first().ok_or(TvgenError::MissingHeader)?;
    info!(
        rows = lines.len().saturating_sub(FIRST_DATA_ROW),
        "Converting table"
    );
    let formatters = parse_header(header.as_ref(), loader)?;

    let rows = lines
        .iter()
        .enumerate()
        .skip(FIRST_DATA_ROW)
        .map(|(index, line)| {
            format_row(line.as_ref(), &formatters).map_err(|e| e.at_line(index + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    let streams = assemble(&rows, options);
    info!(
        rows = rows.len(),
        columns = formatters.len(),
        input_lines = streams.inputs.len(),
        expected_lines = streams.expected.len(),
        "Converted table"
    );
    Ok(streams)
}

/// Convert table text (one row per line).
pub fn convert_str(
    text: &str,
    options: &ConvertOptions,
    loader: &dyn TableLoader,
) -> Result<Streams> {
    let lines: Vec<&str> = text.lines().collect();
    convert_lines(&lines, options, loader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::table::LookupTable;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn no_tables() -> HashMap<PathBuf, LookupTable> {
        HashMap::new()
    }

    const TWO_ROWS: &str = "#,F::base_10:2,,F::base_10:2\n,2,,2\nc1,1,,2\nc2,3,,0";

    #[test]
    fn test_two_row_table() {
        let streams = convert_str(TWO_ROWS, &ConvertOptions::new(), &no_tables()).unwrap();
        assert_eq!(streams.inputs, vec!["01", "11", "11"]);
        assert_eq!(streams.expected, vec!["--", "10", "00"]);
        assert_eq!(streams.input_text(), "01\n11\n11");
        assert_eq!(streams.expected_text(), "--\n10\n00");
    }

    #[test]
    fn test_two_row_table_with_sync_delay() {
        let options = ConvertOptions::new().sync_delay(true);
        let streams = convert_str(TWO_ROWS, &options, &no_tables()).unwrap();
        assert_eq!(streams.inputs, vec!["01", "11", "11", "11", "11"]);
        assert_eq!(streams.expected, vec!["--", "--", "--", "10", "00"]);
    }

    #[test]
    fn test_streams_stay_aligned() {
        let table = "#;F::base_16:4;F::prefix:4;;F::base_2:3;x\n\
                     ;4;4;;3;1\n\
                     a;F;0x1;;101;1\n\
                     b;0;0b1;;X;0\n\
                     c;X;7;;000;X";
        for options in [ConvertOptions::new(), ConvertOptions::new().sync_delay(true)] {
            let streams = convert_str(table, &options, &no_tables()).unwrap();
            assert_eq!(streams.inputs.len(), streams.expected.len());
        }
    }

    #[test]
    fn test_dont_care_line_matches_word_widths() {
        let table = "#;F::base_10:1;;F::base_16:8;x\n;;;\nc;1;;ff;abc";
        let streams = convert_str(table, &ConvertOptions::new(), &no_tables()).unwrap();
        assert_eq!(streams.expected[0], "-------- ---");
        assert_eq!(streams.expected[1], "11111111 abc");
    }

    #[test]
    fn test_header_wider_than_rows() {
        let table = "#;F::base_10:1;;F::base_16:8;;x\n;;;;\nc;1;;ff;abc";
        let err = convert_str(table, &ConvertOptions::new(), &no_tables()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().starts_with("line 3: header declares 5 columns"));
    }

    #[test]
    fn test_header_only() {
        let streams = convert_str("#,F::base_10:2", &ConvertOptions::new(), &no_tables()).unwrap();
        assert_eq!(streams, Streams::default());
        assert_eq!(streams.input_text(), "");
    }

    #[test]
    fn test_empty_input() {
        let lines: Vec<String> = Vec::new();
        let err = convert_lines(&lines, &ConvertOptions::new(), &no_tables()).unwrap_err();
        assert!(matches!(err, TvgenError::MissingHeader));
    }

    #[test]
    fn test_row_error_reports_line() {
        let table = "#,F::base_10:2,,F::base_10:2\n\nc1,1,,2\nc2,3,2\nc3,0,,0";
        let err = convert_str(table, &ConvertOptions::new(), &no_tables()).unwrap_err();
        match err {
            TvgenError::Row { line, source } => {
                assert_eq!(line, 4);
                assert!(matches!(*source, TvgenError::MissingSections { .. }));
            }
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_table_aborts_before_rows() {
        let table = "#,F::lut:2->ops.json,,x\n\nc1,ADD,,1";
        let err = convert_str(table, &ConvertOptions::new(), &no_tables()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Resource);
    }

    #[test]
    fn test_lut_column() {
        let tables = HashMap::from([(
            PathBuf::from("ops.json"),
            LookupTable::from([
                ("ADD".to_string(), "01".to_string()),
                ("SUB".to_string(), "10".to_string()),
            ]),
        )]);
        let table = "#,F::lut:2->ops.json,,F::base_2:1\n\nc1,ADD,,1\nc2,SUB,,0";
        let streams = convert_str(table, &ConvertOptions::new(), &tables).unwrap();
        assert_eq!(streams.inputs, vec!["01", "10", "10"]);
        assert_eq!(streams.expected, vec!["-", "1", "0"]);

        let bad = "#,F::lut:2->ops.json,,F::base_2:1\n\nc1,MUL,,1";
        let err = convert_str(bad, &ConvertOptions::new(), &tables).unwrap_err();
        assert!(matches!(
            err,
            TvgenError::Row { ref source, .. } if matches!(**source, TvgenError::MissingTableKey { .. })
        ));
    }

    #[test]
    fn test_wide_binary_column() {
        let ones = "1".repeat(128);
        let table = format!("#,F::base_2:128,,x\n\nc1,{ones},,1\nc2,X,,0");
        let streams = convert_str(&table, &ConvertOptions::new(), &no_tables()).unwrap();
        let dashes = "-".repeat(128);
        assert_eq!(streams.inputs, vec![ones, dashes.clone(), dashes]);
        assert_eq!(streams.expected, vec!["-", "1", "0"]);
    }

    #[test]
    fn test_single_row() {
        let table = "#,x,,x\n\nonly,a,,b";
        let streams = convert_str(table, &ConvertOptions::new(), &no_tables()).unwrap();
        assert_eq!(streams.inputs, vec!["a", "a"]);
        assert_eq!(streams.expected, vec!["-", "b"]);
    }
}
