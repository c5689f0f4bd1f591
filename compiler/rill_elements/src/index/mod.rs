//! Index classification for property keys.
//!
//! The object system asks these predicates whether a key belongs in the
//! element store or in the named-property table. An index is any integer
//! in `[0, 2^53 - 1)`; the upper bound is exclusive so that `index + 1`
//! (the resulting length) is still an exactly representable double.

/// Exclusive upper bound on valid indices (`2^53 - 1`).
pub const MAX_INDEX: u64 = (1 << 53) - 1;

/// Number of decimal digits in the largest valid index.
const MAX_INDEX_DIGITS: usize = 16;

/// Whether `index` is a valid element index.
#[inline]
pub const fn is_valid_index(index: u64) -> bool {
    index < MAX_INDEX
}

/// Index predicate for the 32-bit key domain.
///
/// Every non-negative 32-bit integer is below [`MAX_INDEX`].
#[inline]
pub const fn is_index_32(key: i32) -> bool {
    key >= 0
}

/// Index predicate for the 64-bit key domain.
#[inline]
pub const fn is_index_64(key: i64) -> bool {
    key >= 0 && (key as u64) < MAX_INDEX
}

/// Interpret a numeric property key as an index.
///
/// Only non-negative integral values below [`MAX_INDEX`] qualify; `-0.0`
/// is index `0`.
pub fn index_from_number(key: f64) -> Option<u64> {
    if !key.is_finite() || key < 0.0 || key.fract() != 0.0 || key >= MAX_INDEX as f64 {
        return None;
    }
    Some(key as u64)
}

/// Parse a string property key as an index.
///
/// Canonical decimal only: `"0"` is the only key that may start with `'0'`,
/// no sign, no whitespace, no exponent. Keys at or above [`MAX_INDEX`]
/// are rejected.
///
/// ```
/// use rill_elements::to_index;
///
/// assert_eq!(to_index("0"), Some(0));
/// assert_eq!(to_index("00"), None);
/// assert_eq!(to_index("9007199254740990"), Some(9_007_199_254_740_990));
/// assert_eq!(to_index("9007199254740991"), None);
/// ```
pub fn to_index(key: &str) -> Option<u64> {
    let bytes = key.as_bytes();
    match bytes {
        [] => return None,
        [b'0'] => return Some(0),
        [b'0', ..] => return None,
        _ => {}
    }
    if bytes.len() > MAX_INDEX_DIGITS || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let mut value: u64 = 0;
    for &b in bytes {
        // At most 16 digits, so this cannot overflow u64.
        value = value * 10 + u64::from(b - b'0');
    }
    is_valid_index(value).then_some(value)
}

#[cfg(test)]
mod tests;
