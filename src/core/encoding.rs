//! # Adaptive Binary Encoding
//!
//! Renders an integer as a string of `'0'`/`'1'` characters.
//!
//! Without an explicit width the code is as short as possible while staying
//! readable: the bit length is rounded up to a whole nibble and never drops
//! below one byte.
//!
//! ```text
//! 0      -> "0"
//! 5      -> "00000101"          (3 bits -> 4 -> floor 8)
//! 300    -> "000100101100"      (9 bits -> 12)
//! ```
//!
//! With an explicit width only the low `width` bits are kept. Higher bits are
//! discarded without notice, so callers that need the full value must let the
//! width adapt.

/// Smallest width produced by the adaptive mode
pub const MIN_ADAPTIVE_BITS: u32 = 8;

/// Adaptive widths are rounded up to a multiple of this
pub const NIBBLE_BITS: u32 = 4;

/// Encode `n` as a binary string.
///
/// `explicit_width = Some(w)` yields exactly `w` characters (low `w` bits of
/// `n`, left-padded with zeros). `None` picks the adaptive width.
pub fn encode(n: u64, explicit_width: Option<u32>) -> String {
    let width = match explicit_width {
        Some(width) => width,
        None if n == 0 => return "0".to_string(),
        None => adaptive_width(n),
    };

    (0..width)
        .rev()
        .map(|bit| if bit < u64::BITS && (n >> bit) & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Number of bits the adaptive mode uses for `n`
pub fn adaptive_width(n: u64) -> u32 {
    let bits = u64::BITS - n.leading_zeros();
    let rounded = bits.div_ceil(NIBBLE_BITS) * NIBBLE_BITS;
    rounded.max(MIN_ADAPTIVE_BITS)
}
