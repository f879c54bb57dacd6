use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Neg;

use num_bigint::{BigInt, Sign};
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};

use crate::DecimalError;

/// Most digits a `DECIMAL` column holds.
pub const MAX_PRECISION: u32 = 65;

/// Most fractional digits a `DECIMAL` column holds.
pub const MAX_SCALE: u32 = 30;

/// Significant digits MySQL keeps when turning a DOUBLE into a DECIMAL.
const DOUBLE_DIGITS: usize = 15;

/// Exponents past this are treated as infinitely large or small.
const EXPONENT_LIMIT: i64 = 1 << 40;

/// A MySQL-semantics decimal number, `mantissa * 10^-scale`.
///
/// The scale never exceeds [`MAX_SCALE`]. Equality, ordering and hashing
/// compare numeric value: `1.0 == 1.00`.
#[derive(Clone, Debug, Default)]
pub struct SqlDecimal {
    mantissa: BigInt,
    scale: u32,
}

fn ten_pow(n: u32) -> BigInt {
    BigInt::from(10u8).pow(n)
}

impl SqlDecimal {
    pub const ZERO: Self = SqlDecimal {
        mantissa: BigInt::ZERO,
        scale: 0,
    };

    #[inline]
    pub fn from_i64(i: i64) -> Self {
        SqlDecimal {
            mantissa: BigInt::from(i),
            scale: 0,
        }
    }

    #[inline]
    pub fn from_u64(u: u64) -> Self {
        SqlDecimal {
            mantissa: BigInt::from(u),
            scale: 0,
        }
    }

    /// Exact value of a float with no fractional part: `2^64` is
    /// `18446744073709551616`, not the shortest round-trip text.
    ///
    /// `None` for NaN, infinities and fractions. Magnitudes wider than
    /// [`MAX_PRECISION`] digits saturate.
    pub fn from_integral_f64(f: f64) -> Option<Self> {
        if !f.is_finite() || f.fract() != 0.0 {
            return None;
        }
        let mantissa = BigInt::from_f64(f)?;
        if mantissa.magnitude() >= ten_pow(MAX_PRECISION).magnitude() {
            return Some(Self::saturated(f.is_sign_negative()));
        }
        Some(SqlDecimal { mantissa, scale: 0 })
    }

    /// Exact conversion of a float's shortest round-trip representation.
    ///
    /// `0.1` becomes `0.1`, not the binary expansion of the nearest double.
    pub fn from_f64(f: f64) -> Result<Self, DecimalError> {
        if !f.is_finite() {
            return Err(DecimalError::NotFinite {
                value: f.to_string(),
            });
        }
        Self::parse_text(&format!("{f:e}"))
    }

    /// Float conversion the way MySQL does it: 15 significant digits,
    /// saturating to the representable range, NaN as zero.
    pub fn from_f64_mysql(f: f64) -> Self {
        if f.is_nan() {
            return Self::ZERO;
        }
        if f.is_infinite() {
            return Self::saturated(f.is_sign_negative());
        }
        let text = format!("{:.*e}", DOUBLE_DIGITS - 1, f);
        match Self::parse_text(&text) {
            Ok(dec) => dec.normalized(),
            Err(err) => {
                tracing::debug!(value = f, %err, "saturating float to DECIMAL range");
                Self::saturated(f.is_sign_negative())
            }
        }
    }

    /// The largest `DECIMAL(65, 0)` magnitude.
    fn saturated(negative: bool) -> Self {
        let max = SqlDecimal {
            mantissa: ten_pow(MAX_PRECISION) - 1u32,
            scale: 0,
        };
        if negative {
            -max
        } else {
            max
        }
    }

    /// Parse MySQL decimal text (`-12.50`, `1e3`, ` 7 `).
    ///
    /// The stored scale is the literal's: `"12.50"` keeps two fractional
    /// digits. Fractions past [`MAX_SCALE`] digits round; more than
    /// [`MAX_PRECISION`] integer digits is out of range.
    pub fn parse_mysql(raw: &[u8]) -> Result<Self, DecimalError> {
        match std::str::from_utf8(raw) {
            Ok(text) => Self::parse_text(text.trim()),
            Err(_) => Err(DecimalError::Syntax {
                text: String::from_utf8_lossy(raw).into_owned(),
            }),
        }
    }

    fn parse_text(text: &str) -> Result<Self, DecimalError> {
        let syntax = || DecimalError::Syntax {
            text: text.to_owned(),
        };
        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (number, exponent) = match unsigned.find(['e', 'E']) {
            Some(pos) => (
                &unsigned[..pos],
                parse_exponent(&unsigned[pos + 1..]).ok_or_else(syntax)?,
            ),
            None => (unsigned, 0),
        };
        let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(syntax());
        }
        if !int_part
            .bytes()
            .chain(frac_part.bytes())
            .all(|b| b.is_ascii_digit())
        {
            return Err(syntax());
        }

        let digits = format!("{int_part}{frac_part}");
        let digits = digits.trim_start_matches('0');
        let exponent = exponent - frac_part.len() as i64;
        let dec = Self::from_digits(digits, exponent).ok_or_else(|| DecimalError::OutOfRange {
            text: text.to_owned(),
        })?;
        Ok(if negative { -dec } else { dec })
    }

    /// `digits * 10^exponent`, where `digits` has no leading zeros. `None`
    /// when the integer part is wider than [`MAX_PRECISION`].
    fn from_digits(digits: &str, exponent: i64) -> Option<Self> {
        if digits.is_empty() {
            let scale = exponent.clamp(-i64::from(MAX_SCALE), 0).unsigned_abs();
            return Some(SqlDecimal {
                mantissa: BigInt::ZERO,
                scale: scale as u32,
            });
        }
        let len = digits.len() as i64;
        if len + exponent > i64::from(MAX_PRECISION) {
            return None;
        }
        let mantissa = BigInt::parse_bytes(digits.as_bytes(), 10)?;
        if exponent >= 0 {
            return Some(SqlDecimal {
                mantissa: mantissa * ten_pow(exponent as u32),
                scale: 0,
            });
        }

        let scale = exponent.unsigned_abs();
        if scale.saturating_sub(u64::from(MAX_SCALE)) > len as u64 {
            // Below half a unit in the last kept place.
            return Some(SqlDecimal {
                mantissa: BigInt::ZERO,
                scale: MAX_SCALE,
            });
        }
        let exact = SqlDecimal {
            mantissa,
            scale: u32::try_from(scale).ok()?,
        };
        Some(exact.round(MAX_SCALE as i32))
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// -1, 0 or 1.
    pub fn sign(&self) -> i32 {
        match self.mantissa.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    /// Number of stored fractional digits.
    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Base-10 exponent of the stored representation (`-scale`).
    #[inline]
    pub fn exponent(&self) -> i32 {
        -(self.scale as i32)
    }

    /// Round half away from zero to `scale` fractional digits.
    ///
    /// A negative scale rounds to tens, hundreds, ... A scale at or above
    /// the stored one leaves the value as it is.
    #[must_use]
    pub fn round(self, scale: i32) -> Self {
        let target = scale.clamp(-(MAX_PRECISION as i32) - 1, MAX_SCALE as i32);
        if i64::from(target) >= i64::from(self.scale) {
            return self;
        }
        let divisor = ten_pow((i64::from(self.scale) - i64::from(target)) as u32);
        let mut quotient = &self.mantissa / &divisor;
        let remainder = &self.mantissa % &divisor;
        if remainder.abs() * 2u32 >= divisor {
            quotient += self.mantissa.signum();
        }
        if target >= 0 {
            SqlDecimal {
                mantissa: quotient,
                scale: target as u32,
            }
        } else {
            SqlDecimal {
                mantissa: quotient * ten_pow(target.unsigned_abs()),
                scale: 0,
            }
        }
    }

    /// Round to `frac_digits` and saturate to the largest magnitude with
    /// `int_digits` integer digits, i.e. the range of `DECIMAL(int + frac,
    /// frac)`. Both are capped at what a column can declare.
    #[must_use]
    pub fn clamp(self, int_digits: i32, frac_digits: i32) -> Self {
        let frac = frac_digits.clamp(0, MAX_SCALE as i32) as u32;
        let int = int_digits.clamp(0, (MAX_PRECISION - frac) as i32) as u32;
        let rounded = self.round(frac as i32);
        let max = SqlDecimal {
            mantissa: ten_pow(int + frac) - 1u32,
            scale: frac,
        };
        let magnitude = SqlDecimal {
            mantissa: rounded.mantissa.abs(),
            scale: rounded.scale,
        };
        if magnitude <= max {
            rounded
        } else if rounded.sign() < 0 {
            -max
        } else {
            max
        }
    }

    /// Fixed-point text with exactly `scale` fractional digits.
    pub fn format_mysql(&self, scale: i32) -> Vec<u8> {
        let scale = scale.clamp(0, MAX_SCALE as i32) as u32;
        let rounded = self.clone().round(scale as i32);
        let mantissa = rounded.mantissa * ten_pow(scale - rounded.scale);

        let width = scale as usize + 1;
        let digits = mantissa.magnitude().to_string();
        let digits = format!("{digits:0>width$}");
        let split = digits.len() - scale as usize;

        let mut out = Vec::with_capacity(digits.len() + 2);
        if mantissa.is_negative() {
            out.push(b'-');
        }
        out.extend_from_slice(&digits.as_bytes()[..split]);
        if scale > 0 {
            out.push(b'.');
            out.extend_from_slice(&digits.as_bytes()[split..]);
        }
        out
    }

    /// `None` when the integral part does not fit; fractions truncate.
    pub fn to_i64(&self) -> Option<i64> {
        self.integral().to_i64()
    }

    /// `None` when negative or too large; fractions truncate.
    pub fn to_u64(&self) -> Option<u64> {
        if self.sign() < 0 {
            return None;
        }
        self.integral().to_u64()
    }

    /// Nearest float, `None` outside the float range.
    pub fn to_f64(&self) -> Option<f64> {
        self.to_string()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
    }

    fn integral(&self) -> BigInt {
        &self.mantissa / ten_pow(self.scale)
    }

    fn aligned(&self, scale: u32) -> BigInt {
        &self.mantissa * ten_pow(scale - self.scale)
    }

    /// Same value with trailing fractional zeros dropped.
    fn normalized(mut self) -> Self {
        let ten = BigInt::from(10u8);
        while self.scale > 0 && (&self.mantissa % &ten).is_zero() {
            self.mantissa /= &ten;
            self.scale -= 1;
        }
        self
    }
}

/// Exponent digits after `e`, with an optional sign. Saturates far past
/// anything a decimal can hold.
fn parse_exponent(text: &str) -> Option<i64> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        (acc * 10 + i64::from(b - b'0')).min(EXPONENT_LIMIT)
    });
    Some(if negative { -magnitude } else { magnitude })
}

impl PartialEq for SqlDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SqlDecimal {}

impl PartialOrd for SqlDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SqlDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let scale = self.scale.max(other.scale);
        self.aligned(scale).cmp(&other.aligned(scale))
    }
}

impl Hash for SqlDecimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let normal = self.clone().normalized();
        normal.mantissa.hash(state);
        normal.scale.hash(state);
    }
}

impl Neg for SqlDecimal {
    type Output = SqlDecimal;

    fn neg(self) -> SqlDecimal {
        SqlDecimal {
            mantissa: -self.mantissa,
            scale: self.scale,
        }
    }
}

impl From<i64> for SqlDecimal {
    fn from(i: i64) -> Self {
        Self::from_i64(i)
    }
}

impl From<u64> for SqlDecimal {
    fn from(u: u64) -> Self {
        Self::from_u64(u)
    }
}

impl fmt::Display for SqlDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(
            &self.format_mysql(self.scale as i32),
        ))
    }
}
