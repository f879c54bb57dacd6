//! Type coercion: the common type two operands compare and hash in, and
//! casting raw values into it.

use qe_collations::TypedCollation;
use qe_decimal::SqlDecimal;
use qe_types::parse::parse_float_lenient;
use qe_types::{SqlType, SqlValue};

use crate::errors::{unsupported_cast, unsupported_coercion, EvalResult};
use crate::EvalValue;

/// The type two operands of `left` and `right` are converted to before they
/// are compared or hashed.
///
/// | operands                       | common type |
/// |--------------------------------|-------------|
/// | identical                      | that type   |
/// | either NULL                    | `NULL`      |
/// | both text/binary               | `VARCHAR`   |
/// | number and text/binary         | `FLOAT64`   |
/// | any float or decimal           | `FLOAT64`   |
/// | signed and unsigned            | `UINT64`    |
/// | signed and signed              | `INT64`     |
/// | unsigned and unsigned          | `UINT64`    |
///
/// Anything else is unsupported.
pub fn choose_common_type(left: SqlType, right: SqlType) -> EvalResult<SqlType> {
    if left == right {
        return Ok(left);
    }
    if left.is_null() || right.is_null() {
        return Ok(SqlType::Null);
    }
    if left.is_textual() && right.is_textual() {
        return Ok(SqlType::VarChar);
    }
    if left.is_number() || right.is_number() {
        if left.is_textual() || right.is_textual() {
            return Ok(SqlType::Float64);
        }
        let inexact = |ty: SqlType| ty.is_float() || ty == SqlType::Decimal;
        if inexact(left) || inexact(right) {
            return Ok(SqlType::Float64);
        }
        if left.is_signed() {
            if right.is_unsigned() {
                return Ok(SqlType::Uint64);
            }
            if right.is_signed() {
                return Ok(SqlType::Int64);
            }
        } else if left.is_unsigned() && right.is_integral() {
            return Ok(SqlType::Uint64);
        }
    }
    Err(unsupported_coercion(left, right))
}

impl EvalValue {
    /// Cast `value` to `target`. See [`set_value_cast`](Self::set_value_cast).
    pub fn cast_to(value: &SqlValue, target: SqlType) -> EvalResult<EvalValue> {
        let mut out = EvalValue::default();
        out.set_value_cast(value, target)?;
        Ok(out)
    }

    /// Load `value` converted to `target`.
    ///
    /// Only the conversions the comparison path needs are supported:
    /// integer targets accept integers only, text targets accept text only,
    /// and float or decimal targets accept anything numeric or textual
    /// (text parses leniently). A NULL value loads as NULL for any target.
    pub fn set_value_cast(&mut self, value: &SqlValue, target: SqlType) -> EvalResult {
        if target.is_null() || value.is_null() {
            self.set_null();
            self.ty = target;
            return Ok(());
        }

        let source = value.ty();
        if target.is_float() {
            let f = if source.is_signed() {
                value.to_i64()? as f64
            } else if source.is_unsigned() {
                value.to_u64()? as f64
            } else if source.is_float() || source == SqlType::Decimal {
                value.to_f64()?
            } else if source.is_textual() {
                parse_float_lenient(&value.raw_str())
            } else {
                return Err(unsupported_cast(target, value));
            };
            self.set_float(f);
        } else if target == SqlType::Decimal {
            let dec = if source.is_integral() || source == SqlType::Decimal {
                SqlDecimal::parse_mysql(value.raw())?
            } else if source.is_float() {
                decimal_from_float(value.to_f64()?)
            } else if source.is_textual() {
                decimal_from_float(parse_float_lenient(&value.raw_str()))
            } else {
                return Err(unsupported_cast(target, value));
            };
            let scale = -dec.exponent();
            self.set_decimal(dec, scale);
        } else if target.is_signed() {
            if source.is_signed() {
                self.set_int64(value.to_i64()?);
            } else if source.is_unsigned() {
                self.set_int64(value.to_u64()? as i64);
            } else {
                return Err(unsupported_cast(target, value));
            }
        } else if target.is_unsigned() {
            if source.is_signed() {
                self.set_uint64(value.to_i64()? as u64);
            } else if source.is_unsigned() {
                self.set_uint64(value.to_u64()?);
            } else {
                return Err(unsupported_cast(target, value));
            }
        } else if target.is_textual() {
            if !source.is_textual() {
                return Err(unsupported_cast(target, value));
            }
            self.set_raw(source, value.raw().to_vec(), TypedCollation::default());
        } else {
            return Err(unsupported_cast(target, value));
        }
        Ok(())
    }
}

/// Exact decimal image of `f`, saturating when it does not fit.
fn decimal_from_float(f: f64) -> SqlDecimal {
    SqlDecimal::from_f64(f).unwrap_or_else(|err| {
        tracing::debug!(value = f, %err, "float does not fit DECIMAL exactly");
        SqlDecimal::from_f64_mysql(f)
    })
}
