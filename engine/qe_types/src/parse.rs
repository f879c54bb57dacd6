//! Parsing helpers for raw SQL text.
//!
//! `parse_float_lenient` mirrors MySQL's permissive string-to-number rule:
//! the longest numeric prefix wins and garbage yields `0.0` instead of an
//! error. Hex literal decoding is strict.

use crate::ValueError;

/// Parse the longest numeric prefix of `text` as a float.
///
/// Leading ASCII whitespace is skipped. Text with no digits in its prefix
/// (`"abc"`, `""`, `"-"`) yields `0.0`. Magnitudes beyond `f64::MAX`
/// saturate instead of becoming infinite.
pub fn parse_float_lenient(text: &str) -> f64 {
    let trimmed = text.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let prefix = numeric_prefix(trimmed.as_bytes());
    if prefix == 0 {
        return 0.0;
    }
    match trimmed[..prefix].parse::<f64>() {
        Ok(f) if f.is_infinite() => f64::MAX.copysign(f),
        Ok(f) => f,
        Err(_) => 0.0,
    }
}

/// Length of the longest prefix of `bytes` matching
/// `[+-]? digits? ('.' digits?)? ([eE] [+-]? digits)?` with at least one
/// mantissa digit. Returns 0 when there is no such prefix.
fn numeric_prefix(bytes: &[u8]) -> usize {
    let mut pos = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(&bytes[pos + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp.min(bytes.len())..]);
        if exp_digits > 0 {
            pos = exp + exp_digits;
        }
    }
    pos
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Decode a `0x1F` hex number literal into bytes.
///
/// An odd number of digits is left-padded with a zero nibble, as MySQL does
/// (`0xF` is the single byte `0x0F`).
pub fn decode_hex_number(raw: &[u8]) -> Result<Vec<u8>, ValueError> {
    let digits = match raw {
        [b'0', b'x' | b'X', rest @ ..] => rest,
        _ => return Err(invalid_hex(raw)),
    };
    if digits.is_empty() {
        return Err(invalid_hex(raw));
    }
    let mut padded;
    let digits = if digits.len() % 2 == 1 {
        padded = Vec::with_capacity(digits.len() + 1);
        padded.push(b'0');
        padded.extend_from_slice(digits);
        padded.as_slice()
    } else {
        digits
    };
    decode_nibbles(digits).ok_or_else(|| invalid_hex(raw))
}

/// Decode an `X'1F'` hex string literal into bytes.
///
/// Unlike hex numbers, the digit count must be even.
pub fn decode_hex_literal(raw: &[u8]) -> Result<Vec<u8>, ValueError> {
    let digits = match raw {
        [b'x' | b'X', b'\'', rest @ .., b'\''] => rest,
        _ => return Err(invalid_hex(raw)),
    };
    if digits.len() % 2 == 1 {
        return Err(invalid_hex(raw));
    }
    decode_nibbles(digits).ok_or_else(|| invalid_hex(raw))
}

fn decode_nibbles(digits: &[u8]) -> Option<Vec<u8>> {
    digits
        .chunks_exact(2)
        .map(|pair| Some((nibble(pair[0])? << 4) | nibble(pair[1])?))
        .collect()
}

fn nibble(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cold]
fn invalid_hex(raw: &[u8]) -> ValueError {
    ValueError::InvalidHex {
        raw: String::from_utf8_lossy(raw).into_owned(),
    }
}
