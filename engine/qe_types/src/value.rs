//! Typed raw SQL values.

use std::borrow::Cow;
use std::fmt;

use crate::{SqlType, ValueError};

/// A SQL value as exchanged with the planner and executor: a type tag plus
/// the MySQL text encoding of the value.
///
/// Construction never validates `raw` against `ty`; the typed accessors do.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SqlValue {
    ty: SqlType,
    raw: Vec<u8>,
}

impl SqlValue {
    /// SQL `NULL`.
    pub const NULL: SqlValue = SqlValue {
        ty: SqlType::Null,
        raw: Vec::new(),
    };

    /// Build a value from a type and raw bytes without validation.
    #[inline]
    pub fn make_trusted(ty: SqlType, raw: impl Into<Vec<u8>>) -> Self {
        SqlValue {
            ty,
            raw: raw.into(),
        }
    }

    pub fn int64(i: i64) -> Self {
        Self::make_trusted(SqlType::Int64, i.to_string())
    }

    pub fn uint64(u: u64) -> Self {
        Self::make_trusted(SqlType::Uint64, u.to_string())
    }

    /// A `FLOAT64` value in Rust's shortest round-trip notation.
    pub fn float64(f: f64) -> Self {
        Self::make_trusted(SqlType::Float64, f.to_string())
    }

    /// A `DECIMAL` value from its text form, e.g. `"12.50"`.
    pub fn decimal(text: &str) -> Self {
        Self::make_trusted(SqlType::Decimal, text)
    }

    pub fn varchar(text: &str) -> Self {
        Self::make_trusted(SqlType::VarChar, text)
    }

    pub fn varbinary(bytes: &[u8]) -> Self {
        Self::make_trusted(SqlType::VarBinary, bytes)
    }

    #[inline]
    pub fn ty(&self) -> SqlType {
        self.ty
    }

    #[inline]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Consume the value, returning its raw bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.raw
    }

    /// Raw bytes as text; invalid UTF-8 is replaced, never rejected.
    pub fn raw_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.raw)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.ty.is_null()
    }

    #[inline]
    pub fn is_signed(&self) -> bool {
        self.ty.is_signed()
    }

    #[inline]
    pub fn is_unsigned(&self) -> bool {
        self.ty.is_unsigned()
    }

    #[inline]
    pub fn is_integral(&self) -> bool {
        self.ty.is_integral()
    }

    #[inline]
    pub fn is_float(&self) -> bool {
        self.ty.is_float()
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        self.ty.is_text()
    }

    #[inline]
    pub fn is_binary(&self) -> bool {
        self.ty.is_binary()
    }

    #[inline]
    pub fn is_quoted(&self) -> bool {
        self.ty.is_quoted()
    }

    /// Parse the raw text as a signed 64-bit integer.
    pub fn to_i64(&self) -> Result<i64, ValueError> {
        self.parse_as("INT64")
    }

    /// Parse the raw text as an unsigned 64-bit integer.
    pub fn to_u64(&self) -> Result<u64, ValueError> {
        self.parse_as("UINT64")
    }

    pub fn to_i32(&self) -> Result<i32, ValueError> {
        self.parse_as("INT32")
    }

    pub fn to_u32(&self) -> Result<u32, ValueError> {
        self.parse_as("UINT32")
    }

    /// Parse the raw text as a float. Strict: unlike
    /// [`parse_float_lenient`](crate::parse::parse_float_lenient), trailing
    /// garbage is an error.
    pub fn to_f64(&self) -> Result<f64, ValueError> {
        self.parse_as("FLOAT64")
    }

    pub fn to_f32(&self) -> Result<f32, ValueError> {
        self.parse_as("FLOAT32")
    }

    fn parse_as<T>(&self, target: &'static str) -> Result<T, ValueError>
    where
        T: std::str::FromStr,
        T::Err: fmt::Display,
    {
        let text = std::str::from_utf8(&self.raw).map_err(|err| self.parse_error(target, &err))?;
        text.trim().parse::<T>().map_err(|err| self.parse_error(target, &err))
    }

    #[cold]
    fn parse_error(&self, target: &'static str, reason: &dyn fmt::Display) -> ValueError {
        ValueError::Parse {
            ty: self.ty,
            raw: self.raw_str().into_owned(),
            target,
            reason: reason.to_string(),
        }
    }
}

impl Default for SqlValue {
    fn default() -> Self {
        SqlValue::NULL
    }
}

/// `TYPE(raw)` for numbers, `TYPE("raw")` for quoted values, `NULL` for null.
impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("NULL");
        }
        if self.is_quoted() || self.is_text() {
            write!(f, "{}({:?})", self.ty, self.raw_str())
        } else {
            write!(f, "{}({})", self.ty, self.raw_str())
        }
    }
}
