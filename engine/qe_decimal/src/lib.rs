//! Decimal arithmetic for the query evaluation engine.
//!
//! `SqlDecimal` is a base-10 fixed-point number with the conversions MySQL
//! applies between DECIMAL, DOUBLE and integer values: rounding is
//! half-away-from-zero, clamping saturates to the largest value that fits a
//! `DECIMAL(M, D)` column, and extraction to primitives reports
//! out-of-range results instead of wrapping.
//!
//! The mantissa is a `num_bigint::BigInt`, so every `DECIMAL(65, 30)` value
//! and every 64-bit integer is exact.

mod decimal;

pub use decimal::{SqlDecimal, MAX_PRECISION, MAX_SCALE};

/// Failure to build a decimal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecimalError {
    /// Text is not a decimal number.
    #[error("invalid decimal literal '{text}'")]
    Syntax { text: String },

    /// More than 65 integer digits.
    #[error("DECIMAL value is out of range: {text}")]
    OutOfRange { text: String },

    /// NaN or infinity cannot become a decimal.
    #[error("cannot convert non-finite float {value} to DECIMAL")]
    NotFinite { value: String },
}
