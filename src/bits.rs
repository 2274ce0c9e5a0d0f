//! Bit-length measurement of big-endian unsigned integers.

/// Returns the number of significant bits of the big-endian unsigned
/// integer in `buf`.
///
/// Leading zero bytes are ignored. An empty or all-zero buffer measures `0`.
#[inline]
pub fn bit_length(buf: &[u8]) -> usize {
    let buf = strip_leading_zeros(buf);

    match buf.first() {
        Some(&top) => buf.len() * 8 - top.leading_zeros() as usize,
        None => 0,
    }
}

/// Returns `buf` without its leading zero bytes.
#[inline]
pub fn strip_leading_zeros(buf: &[u8]) -> &[u8] {
    let start = buf.iter().position(|&b| b != 0).unwrap_or(buf.len());
    &buf[start..]
}

/// Returns `true` if the big-endian integer in `buf` is odd.
#[inline]
pub(crate) fn is_odd(buf: &[u8]) -> bool {
    buf.last().map_or(false, |b| b & 1 == 1)
}
