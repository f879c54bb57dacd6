//! MySQL-style float rendering.
//!
//! Floats print with the fewest digits that read back to the same value.
//! Plain notation is used for decimal exponents in `-4..6`, scientific
//! otherwise, and a positive exponent has no sign: `1e06`, `1.5e-07`.
//! Exponents have at least two digits.

use qe_types::SqlType;

/// Exponent at which `'g'` formatting switches to scientific notation.
const EXPONENT_PRECISION: i32 = 6;

/// Render `f` the way a value of type `ty` displays it.
///
/// `DECIMAL` targets never use scientific notation.
pub fn format_float(ty: SqlType, f: f64) -> Vec<u8> {
    if f.is_nan() {
        return b"NaN".to_vec();
    }
    if f.is_infinite() {
        return if f.is_sign_negative() {
            b"-Inf".to_vec()
        } else {
            b"+Inf".to_vec()
        };
    }

    let (digits, exponent) = shortest_digits(f.abs());
    let mut out = Vec::with_capacity(digits.len() + 8);
    if f.is_sign_negative() {
        out.push(b'-');
    }

    // `exponent` is the power of ten of the first digit.
    if ty != SqlType::Decimal && (exponent < -4 || exponent >= EXPONENT_PRECISION) {
        write_scientific(&mut out, &digits, exponent);
    } else {
        write_plain(&mut out, &digits, exponent);
    }
    out
}

/// Shortest round-trip decimal digits of a finite, non-negative `f` and the
/// exponent of the first digit. Zero is `("0", 0)`.
fn shortest_digits(f: f64) -> (Vec<u8>, i32) {
    let text = format!("{f:e}");
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    let digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
    (digits, exponent.parse().unwrap_or(0))
}

fn write_scientific(out: &mut Vec<u8>, digits: &[u8], exponent: i32) {
    out.push(digits[0]);
    if digits.len() > 1 {
        out.push(b'.');
        out.extend_from_slice(&digits[1..]);
    }
    out.push(b'e');
    if exponent < 0 {
        out.push(b'-');
    }
    let magnitude = exponent.unsigned_abs();
    if magnitude < 10 {
        out.push(b'0');
    }
    out.extend_from_slice(magnitude.to_string().as_bytes());
}

fn write_plain(out: &mut Vec<u8>, digits: &[u8], exponent: i32) {
    // Number of digits before the decimal point.
    let point = exponent + 1;
    if point <= 0 {
        out.push(b'0');
    } else {
        let point = point as usize;
        for i in 0..point {
            out.push(digits.get(i).copied().unwrap_or(b'0'));
        }
    }

    let fraction_len = digits.len() as i32 - point;
    if fraction_len > 0 {
        out.push(b'.');
        for i in 0..fraction_len {
            let index = point + i;
            if index < 0 {
                out.push(b'0');
            } else {
                out.push(digits[index as usize]);
            }
        }
    }
}
