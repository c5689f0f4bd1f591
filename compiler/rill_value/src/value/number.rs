//! Number and BigInt text conversions and cross-kind comparison.
//!
//! Formatting follows the language's `Number::toString` rules: the
//! shortest round-tripping digits, fixed notation for decimal exponents in
//! `(-7, 21]`, exponent notation outside of it.

use std::cmp::Ordering;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{FromPrimitive, ToPrimitive, Zero};

/// Render a number the way the language prints it.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n < 0.0 {
        return format!("-{}", format_number(-n));
    }

    let (digits, point) = shortest_digits(n);
    let k = digits.len() as i64;

    if k <= point && point <= 21 {
        let mut out = digits;
        out.extend(std::iter::repeat('0').take((point - k) as usize));
        out
    } else if 0 < point && point <= 21 {
        let (int_part, frac_part) = digits.split_at(point as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < point && point <= 0 {
        let zeros = "0".repeat((-point) as usize);
        format!("0.{zeros}{digits}")
    } else {
        let exp = point - 1;
        let sign = if exp < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{}", exp.abs())
        } else {
            format!("{first}.{rest}e{sign}{}", exp.abs())
        }
    }
}

/// Shortest decimal digits of a finite positive `n` and the position of
/// the decimal point relative to the first digit (`n = 0.d1d2.. * 10^point`).
fn shortest_digits(n: f64) -> (String, i64) {
    // `{:e}` yields the shortest round-tripping mantissa, e.g. `1.2345e3`.
    let sci = format!("{n:e}");
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i64 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digits = digits.trim_end_matches('0');
    let digits = if digits.is_empty() { "0" } else { digits };
    (digits.to_string(), exponent + 1)
}

/// Whitespace the language trims around numeric strings.
fn is_numeric_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

fn split_radix_prefix(s: &str) -> Option<(u32, &str)> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    Some((radix, &s[2..]))
}

fn parse_radix_digits(digits: &str, radix: u32) -> Option<BigUint> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    BigUint::parse_bytes(digits.as_bytes(), radix)
}

/// `[+-]? (digits ('.' digits?)? | '.' digits) ([eE] [+-]? digits)?`
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }
    if mantissa_digits == 0 {
        return false;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

/// Convert a string to a number. Malformed text is `NaN`.
pub fn string_to_number(s: &str) -> f64 {
    let s = s.trim_matches(is_numeric_whitespace);
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some((radix, digits)) = split_radix_prefix(s) {
        return parse_radix_digits(digits, radix)
            .and_then(|n| n.to_f64())
            .unwrap_or(f64::NAN);
    }
    if !is_decimal_literal(s) {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}

/// Convert a string to a BigInt. Malformed text is `None`.
///
/// Only integer literals qualify: no fraction, no exponent, and radix
/// prefixes carry no sign.
pub fn string_to_bigint(s: &str) -> Option<BigInt> {
    let s = s.trim_matches(is_numeric_whitespace);
    if s.is_empty() {
        return Some(BigInt::zero());
    }
    if let Some((radix, digits)) = split_radix_prefix(s) {
        return parse_radix_digits(digits, radix).map(BigInt::from);
    }
    let (sign, digits) = match s.as_bytes()[0] {
        b'-' => (Sign::Minus, &s[1..]),
        b'+' => (Sign::Plus, &s[1..]),
        _ => (Sign::Plus, s),
    };
    parse_radix_digits(digits, 10).map(|magnitude| BigInt::from_biguint(sign, magnitude))
}

/// Three-way comparison of a BigInt with a number. `None` when unordered.
pub fn compare_bigint_number(big: &BigInt, n: f64) -> Option<Ordering> {
    if n.is_nan() {
        return None;
    }
    if n.is_infinite() {
        return Some(if n > 0.0 {
            Ordering::Less
        } else {
            Ordering::Greater
        });
    }
    let floor = n.floor();
    let floor_big = BigInt::from_f64(floor)?;
    match big.cmp(&floor_big) {
        Ordering::Equal if floor != n => Some(Ordering::Less),
        ordering => Some(ordering),
    }
}

/// Whether a BigInt and a number denote the same mathematical value.
pub fn bigint_equals_number(big: &BigInt, n: f64) -> bool {
    compare_bigint_number(big, n) == Some(Ordering::Equal)
}
