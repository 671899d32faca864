//! Choosing a formatter for each header directive.
//!
//! [`PARSERS`] lists one parse function per [`FormatKind`]. Each one either
//! recognizes the directive and returns a formatter, declines with `None`,
//! or fails when the directive is recognized but unusable (bad width,
//! unreadable lookup table). The first parser that accepts wins, so the
//! catch-all `Nop` parser has to stay last.

use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use super::numeric::MAX_WIDTH;
use super::{FormatKind, Formatter};
use crate::error::TvgenError;
use crate::table::TableLoader;
use crate::Result;

/// Signature shared by all directive parsers.
pub type ParseFn = fn(&str, &dyn TableLoader) -> Result<Option<Formatter>>;

/// Directive parsers in priority order.
pub const PARSERS: [(FormatKind, ParseFn); 6] = [
    (FormatKind::Decimal, parse_decimal),
    (FormatKind::Hex, parse_hex),
    (FormatKind::Binary, parse_binary),
    (FormatKind::Lut, parse_lut),
    (FormatKind::Prefix, parse_prefix),
    (FormatKind::Nop, parse_nop),
];

fn width_directive() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"F::(?P<kind>base_10|base_16|base_2|prefix):(?P<width>[0-9]+)")
            .expect("static pattern")
    })
}

fn lut_directive() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"F::lut:(?P<width>[0-9]+)->(?P<file>.+?\.json)").expect("static pattern")
    })
}

/// Largest width a kind accepts. Only kinds that compute on the value are
/// bounded by the `u64` arithmetic.
fn max_width(kind: FormatKind) -> u32 {
    match kind {
        FormatKind::Decimal | FormatKind::Hex | FormatKind::Prefix => MAX_WIDTH,
        FormatKind::Binary | FormatKind::Lut | FormatKind::Nop => u32::MAX,
    }
}

fn parse_width(directive: &str, digits: &str, kind: FormatKind) -> Result<u32> {
    let invalid = |message: String| TvgenError::InvalidWidth {
        directive: directive.to_string(),
        message,
    };
    let width: u32 = digits
        .parse()
        .map_err(|_| invalid(format!("'{digits}' is out of range")))?;
    let max = max_width(kind);
    if width == 0 {
        return Err(invalid("width must be at least 1".to_string()));
    }
    if width > max {
        return Err(invalid(format!("width must be between 1 and {max}")));
    }
    Ok(width)
}

/// Find `F::<kind>:<N>` anywhere in the directive and return its width.
fn find_width(directive: &str, kind: FormatKind) -> Result<Option<u32>> {
    let tag = kind.to_string();
    width_directive()
        .captures_iter(directive)
        .find(|caps| caps["kind"] == tag)
        .map(|caps| parse_width(directive, &caps["width"], kind))
        .transpose()
}

fn parse_decimal(directive: &str, _: &dyn TableLoader) -> Result<Option<Formatter>> {
    Ok(find_width(directive, FormatKind::Decimal)?.map(|width| Formatter::Decimal { width }))
}

fn parse_hex(directive: &str, _: &dyn TableLoader) -> Result<Option<Formatter>> {
    Ok(find_width(directive, FormatKind::Hex)?.map(|width| Formatter::Hex { width }))
}

fn parse_binary(directive: &str, _: &dyn TableLoader) -> Result<Option<Formatter>> {
    Ok(find_width(directive, FormatKind::Binary)?.map(|width| Formatter::Binary { width }))
}

fn parse_prefix(directive: &str, _: &dyn TableLoader) -> Result<Option<Formatter>> {
    Ok(find_width(directive, FormatKind::Prefix)?.map(|width| Formatter::Prefix { width }))
}

fn parse_lut(directive: &str, loader: &dyn TableLoader) -> Result<Option<Formatter>> {
    let Some(caps) = lut_directive().captures(directive) else {
        return Ok(None);
    };
    let width = parse_width(directive, &caps["width"], FormatKind::Lut)?;
    let path = PathBuf::from(&caps["file"]);
    let table = loader.load(&path)?;
    Ok(Some(Formatter::Lut { width, path, table }))
}

fn parse_nop(_: &str, _: &dyn TableLoader) -> Result<Option<Formatter>> {
    Ok(Some(Formatter::Nop))
}

/// Resolve one directive by trying `parsers` in order.
pub fn resolve_with(
    directive: &str,
    parsers: &[(FormatKind, ParseFn)],
    loader: &dyn TableLoader,
) -> Result<Formatter> {
    for (_, parse) in parsers {
        if let Some(formatter) = parse(directive, loader)? {
            return Ok(formatter);
        }
    }
    Err(TvgenError::UnrecognizedFormat(directive.to_string()))
}

/// Resolve one directive with the default parser order.
pub fn resolve(directive: &str, loader: &dyn TableLoader) -> Result<Formatter> {
    resolve_with(directive, &PARSERS, loader)
}

/// Formatters for every column of a table, indexed by column.
///
/// Column 0 of the file (the comment column) has no entry; index 0 here is
/// the first data column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatterSet {
    formatters: Vec<Formatter>,
}

impl FormatterSet {
    /// Number of columns covered.
    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }

    /// Formatter for a column, if the header declared one.
    pub fn get(&self, column: usize) -> Option<&Formatter> {
        self.formatters.get(column)
    }

    /// Iterate formatters in column order.
    pub fn iter(&self) -> impl Iterator<Item = &Formatter> {
        self.formatters.iter()
    }
}

impl From<Vec<Formatter>> for FormatterSet {
    fn from(formatters: Vec<Formatter>) -> Self {
        Self { formatters }
    }
}

/// Resolve every directive of a header row.
///
/// Stops at the first directive that fails; no partial set is returned.
pub fn build_all<S: AsRef<str>>(directives: &[S], loader: &dyn TableLoader) -> Result<FormatterSet> {
    let mut formatters = Vec::with_capacity(directives.len());
    for (column, directive) in directives.iter().enumerate() {
        let directive = directive.as_ref();
        let formatter = resolve(directive, loader)?;
        debug!(
            column,
            directive,
            kind = %formatter.kind(),
            width = formatter.width(),
            "Resolved column format"
        );
        formatters.push(formatter);
    }
    Ok(FormatterSet { formatters })
}
