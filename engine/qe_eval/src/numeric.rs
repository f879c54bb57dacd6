//! The numeric conversion ladder.
//!
//! Every conversion funnels through [`EvalValue::make_numeric`], which turns
//! text and hex literals into a number, and then maps between the four
//! numeric representations. Float and decimal values become integers by
//! rounding half away from zero; out-of-range results saturate.

use qe_decimal::SqlDecimal;
use qe_types::parse::parse_float_lenient;
use qe_types::SqlType;

use crate::errors::{decimal_out_of_range, EvalResult};
use crate::value::Payload;
use crate::{EvalValue, ValueFlags};

/// `2^64`, the first float an unsigned integer cannot hold.
const WIDE_UINT: f64 = u64::MAX as f64;

impl EvalValue {
    /// Make the value numeric in place.
    ///
    /// Numbers are left alone. A hex literal of up to 8 bytes becomes the
    /// big-endian `UINT64` it spells; longer ones become `0.0`. Anything
    /// else is parsed leniently as a float, so `"abc"` is `0.0`.
    pub fn make_numeric(&mut self) -> EvalResult {
        self.resolve()?;
        if self.numeric() {
            return Ok(());
        }

        if self.is_hex_literal() {
            let raw = self.read_bytes();
            if raw.len() > 8 {
                tracing::debug!(len = raw.len(), "hex literal wider than 64 bits becomes 0");
                self.set_float(0.0);
                return Ok(());
            }
            let u = raw.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
            self.set_uint64(u);
            return Ok(());
        }

        let text = String::from_utf8_lossy(self.read_bytes());
        let f = parse_float_lenient(&text);
        tracing::trace!(text = %text, value = f, "parsed text as number");
        self.set_float(f);
        Ok(())
    }

    /// Convert to `FLOAT64`.
    pub fn make_float(&mut self) -> EvalResult {
        self.make_numeric()?;
        let ty = self.ty;
        if ty.is_float() {
            return Ok(());
        }
        let f = if ty == SqlType::Decimal {
            self.read_decimal().to_f64().unwrap_or(0.0)
        } else if ty.is_unsigned() {
            self.read_u64() as f64
        } else {
            self.read_i64() as f64
        };
        self.set_float(f);
        Ok(())
    }

    /// Convert to `DECIMAL(precision, scale)`, saturating to the largest
    /// value the column can hold.
    pub fn make_decimal(&mut self, precision: i32, scale: i32) -> EvalResult {
        self.make_numeric()?;
        let ty = self.ty;
        let dec = if ty == SqlType::Decimal {
            self.read_decimal()
        } else if ty.is_float() {
            SqlDecimal::from_f64_mysql(self.read_f64())
        } else if ty.is_unsigned() {
            SqlDecimal::from_u64(self.read_u64())
        } else {
            SqlDecimal::from_i64(self.read_i64())
        };
        self.set_decimal(dec.clamp(precision - scale, scale), scale);
        Ok(())
    }

    /// Convert to `INT64`. Unsigned values reinterpret their bits.
    pub fn make_signed_integral(&mut self) -> EvalResult {
        self.make_numeric()?;
        let ty = self.ty;
        let i = if ty.is_signed() {
            self.read_i64()
        } else if ty.is_unsigned() {
            self.read_u64() as i64
        } else if ty.is_float() {
            self.read_f64().round() as i64
        } else {
            let dec = self.read_decimal().round(0);
            dec.to_i64().unwrap_or_else(|| {
                tracing::debug!(value = %dec, "saturating DECIMAL to INT64");
                if dec.sign() < 0 {
                    i64::MIN
                } else {
                    i64::MAX
                }
            })
        };
        self.set_int64(i);
        Ok(())
    }

    /// Convert to `UINT64`. Signed values reinterpret their bits; negative
    /// floats and decimals go through `INT64` first. Magnitudes past
    /// `u64::MAX` read as `u64::MAX` but keep their exact value for
    /// negation.
    pub fn make_unsigned_integral(&mut self) -> EvalResult {
        self.make_numeric()?;
        let ty = self.ty;
        if ty.is_unsigned() {
            return Ok(());
        }
        let u = if ty.is_signed() {
            self.read_i64() as u64
        } else if ty.is_float() {
            let f = self.read_f64().round();
            if f >= WIDE_UINT {
                if let Some(exact) = SqlDecimal::from_integral_f64(f) {
                    self.set_wide_uint64(exact);
                    return Ok(());
                }
            }
            if f < 0.0 {
                (f as i64) as u64
            } else {
                f as u64
            }
        } else {
            let dec = self.read_decimal().round(0);
            if dec > SqlDecimal::from_u64(u64::MAX) {
                self.set_wide_uint64(dec);
                return Ok(());
            }
            let converted = if dec.sign() < 0 {
                dec.to_i64().map(|i| i as u64)
            } else {
                dec.to_u64()
            };
            converted.unwrap_or_else(|| {
                tracing::debug!(value = %dec, "saturating DECIMAL to UINT64");
                if dec.sign() < 0 {
                    i64::MIN as u64
                } else {
                    u64::MAX
                }
            })
        };
        self.set_uint64(u);
        Ok(())
    }

    /// Arithmetic negation with MySQL's promotion rules.
    ///
    /// `-i64::MIN` and the negation of unsigned values above `i64::MAX + 1`
    /// become `DECIMAL`; `-(i64::MAX + 1)` is exactly `i64::MIN`; negated hex
    /// literals are floats.
    pub fn negate_numeric(&mut self) -> EvalResult {
        self.make_numeric()?;
        let ty = self.ty;
        if ty.is_signed() {
            let i = self.read_i64();
            if self.flags.contains(ValueFlags::INTEGER_UDF) {
                self.set_decimal(-SqlDecimal::from_i64(i), 0);
            } else {
                self.set_int64(i.wrapping_neg());
            }
        } else if ty.is_unsigned() {
            let u = self.read_u64();
            if self.flags.contains(ValueFlags::HEX) {
                self.set_float(-(u as f64));
            } else if self.flags.contains(ValueFlags::INTEGER_OVF) {
                let magnitude = match self.payload() {
                    Payload::WideUint(exact) => exact.clone(),
                    _ => SqlDecimal::from_u64(u),
                };
                self.set_decimal(-magnitude, 0);
            } else {
                self.set_int64((u as i64).wrapping_neg());
            }
        } else if ty.is_float() {
            let f = self.read_f64();
            self.set_float(-f);
        } else {
            let dec = self.read_decimal();
            if !dec.is_zero() {
                let scale = self.read_scale();
                self.set_decimal(-dec, scale);
            }
        }
        Ok(())
    }

    /// The numeric value as a float. A decimal outside the float range is
    /// an error.
    pub fn coerce_to_float(&mut self) -> EvalResult<f64> {
        self.resolve()?;
        let ty = self.ty;
        if ty.is_signed() {
            Ok(self.read_i64() as f64)
        } else if ty.is_unsigned() {
            Ok(self.read_u64() as f64)
        } else if ty == SqlType::Decimal {
            self.read_decimal().to_f64().ok_or_else(decimal_out_of_range)
        } else {
            Ok(self.read_f64())
        }
    }

    /// The numeric value as a decimal.
    ///
    /// # Panics
    ///
    /// On floats and non-numeric values: callers must pick the float path
    /// for those.
    pub fn coerce_to_decimal(&mut self) -> EvalResult<SqlDecimal> {
        self.resolve()?;
        let ty = self.ty;
        if ty.is_signed() {
            Ok(SqlDecimal::from_i64(self.read_i64()))
        } else if ty.is_unsigned() {
            Ok(SqlDecimal::from_u64(self.read_u64()))
        } else if ty == SqlType::Decimal {
            Ok(self.read_decimal())
        } else if ty.is_float() {
            panic!("should never coerce FLOAT64 to DECIMAL")
        } else {
            panic!("bad numeric type {ty} for DECIMAL coercion")
        }
    }
}
