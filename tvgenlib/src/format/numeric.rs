//! Number parsing and fixed-width binary rendering.

use crate::error::TvgenError;
use crate::Result;

/// Widest column the numeric formatters support.
pub const MAX_WIDTH: u32 = 64;

/// All-ones mask covering the low `width` bits.
pub fn mask(width: u32) -> u64 {
    if width >= MAX_WIDTH {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}

/// Render `value` as a binary string, MSB first, zero-padded to `width`.
///
/// Values wider than `width` are not cut; callers mask or reject first.
pub fn to_binary(value: u64, width: u32) -> String {
    format!("{:0width$b}", value, width = width as usize)
}

/// Left-pad `bits` with `0` up to `width` characters.
pub fn pad_binary(bits: &str, width: u32) -> String {
    format!("{:0>width$}", bits, width = width as usize)
}

/// Parse a decimal cell.
///
/// The result is the value modulo 2^64, so masking it to N bits yields
/// `value mod 2^N` however large the cell is. Negative values come back in
/// two's complement.
pub fn parse_decimal(cell: &str) -> Result<u64> {
    let text = cell.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TvgenError::InvalidNumber {
            value: cell.to_string(),
            base: 10,
        });
    }
    let magnitude = digits
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(10).wrapping_add(u64::from(b - b'0')));
    Ok(if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    })
}

/// Parse a hexadecimal cell (no `0x` prefix) and check it fits in `width` bits.
pub fn parse_hex(cell: &str, width: u32) -> Result<u64> {
    let digits = cell.trim();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TvgenError::InvalidNumber {
            value: cell.to_string(),
            base: 16,
        });
    }
    let too_wide = || TvgenError::ValueTooWide {
        value: cell.to_string(),
        width,
    };
    let value = u64::from_str_radix(digits, 16).map_err(|_| too_wide())?;
    if value & !mask(width) != 0 {
        return Err(too_wide());
    }
    Ok(value)
}
