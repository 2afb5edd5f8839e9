//! Raw buffer helpers
//!
//! Bounds validation, fixed-width big-endian field reads and hex dumps for
//! diagnostics. Every decoder validates its window through
//! [`validate_bounds`] before touching the buffer, so the read helpers can
//! index directly.

use crate::error::{ProtocolError, Result};

/// Validate that `offset..offset + length` addresses a non-empty sub-range
/// of `raw`.
///
/// An empty buffer, a zero-length window, an arithmetic overflow of
/// `offset + length` and a window reaching past the end of the buffer are
/// all rejected.
pub fn validate_bounds(raw: &[u8], offset: usize, length: usize) -> Result<()> {
    let out_of_bounds = ProtocolError::Bounds {
        buf_len: raw.len(),
        offset,
        length,
    };

    if raw.is_empty() || length == 0 {
        return Err(out_of_bounds);
    }

    match offset.checked_add(length) {
        Some(end) if end <= raw.len() => Ok(()),
        _ => Err(out_of_bounds),
    }
}

/// Read one byte at `offset`. Callers validate bounds first.
#[inline]
pub(crate) fn read_u8(raw: &[u8], offset: usize) -> u8 {
    raw[offset]
}

/// Read a big-endian unsigned 16-bit field at `offset`.
///
/// The result is a plain `u16`; widening it can never sign-extend, so raw
/// bits `0xFFFF` always surface as 65535.
#[inline]
pub(crate) fn read_u16_be(raw: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([raw[offset], raw[offset + 1]])
}

/// Render `raw` as hex bytes joined by `separator`.
pub fn to_hex_string(raw: &[u8], separator: &str) -> String {
    raw.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Render at most `max_bytes` of `raw` as a spaced hex dump, appending an
/// ellipsis when the buffer is longer. Used when building error messages
/// so an adversarial multi-megabyte capture cannot balloon an error string.
pub fn hex_dump(raw: &[u8], max_bytes: usize) -> String {
    if raw.len() <= max_bytes {
        to_hex_string(raw, " ")
    } else {
        format!("{} ..", to_hex_string(&raw[..max_bytes], " "))
    }
}
