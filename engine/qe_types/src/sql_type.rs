//! The closed set of SQL types the engine understands.
//!
//! Classification follows MySQL's wire-protocol type families: integral
//! (signed/unsigned), floating point, decimal, quoted (text, binary and
//! temporal values sent as strings), plus the engine-internal `Tuple`,
//! `Expression` and hex/bit literal tags.

use std::fmt;

/// A SQL type tag.
///
/// Widths are kept distinct because they round-trip to the planner, but the
/// evaluator normalizes every integer to 64 bits and every float to `Float64`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SqlType {
    Null,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int24,
    Uint24,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float32,
    Float64,
    Timestamp,
    Date,
    Time,
    Datetime,
    Year,
    Decimal,
    Text,
    Blob,
    VarChar,
    VarBinary,
    Char,
    Binary,
    Bit,
    Enum,
    Set,
    Tuple,
    Geometry,
    Json,
    Expression,
    /// `0x1F` style hex number literal.
    HexNum,
    /// `X'1F'` style hex string literal.
    HexVal,
    /// `0b101` style bit literal.
    BitNum,
}

impl SqlType {
    /// Every type, in declaration order. Handy for exhaustive tests.
    pub const ALL: [SqlType; 35] = [
        SqlType::Null,
        SqlType::Int8,
        SqlType::Uint8,
        SqlType::Int16,
        SqlType::Uint16,
        SqlType::Int24,
        SqlType::Uint24,
        SqlType::Int32,
        SqlType::Uint32,
        SqlType::Int64,
        SqlType::Uint64,
        SqlType::Float32,
        SqlType::Float64,
        SqlType::Timestamp,
        SqlType::Date,
        SqlType::Time,
        SqlType::Datetime,
        SqlType::Year,
        SqlType::Decimal,
        SqlType::Text,
        SqlType::Blob,
        SqlType::VarChar,
        SqlType::VarBinary,
        SqlType::Char,
        SqlType::Binary,
        SqlType::Bit,
        SqlType::Enum,
        SqlType::Set,
        SqlType::Tuple,
        SqlType::Geometry,
        SqlType::Json,
        SqlType::Expression,
        SqlType::HexNum,
        SqlType::HexVal,
        SqlType::BitNum,
    ];

    #[inline]
    pub const fn is_null(self) -> bool {
        matches!(self, SqlType::Null)
    }

    /// Signed integer of any width.
    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            SqlType::Int8 | SqlType::Int16 | SqlType::Int24 | SqlType::Int32 | SqlType::Int64
        )
    }

    /// Unsigned integer of any width. `YEAR` travels as an unsigned integral.
    #[inline]
    pub const fn is_unsigned(self) -> bool {
        matches!(
            self,
            SqlType::Uint8
                | SqlType::Uint16
                | SqlType::Uint24
                | SqlType::Uint32
                | SqlType::Uint64
                | SqlType::Year
        )
    }

    #[inline]
    pub const fn is_integral(self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, SqlType::Float32 | SqlType::Float64)
    }

    /// Integral, floating point or decimal.
    #[inline]
    pub const fn is_number(self) -> bool {
        self.is_integral() || self.is_float() || matches!(self, SqlType::Decimal)
    }

    /// Character data, including hex and bit literals before decoding.
    #[inline]
    pub const fn is_text(self) -> bool {
        matches!(
            self,
            SqlType::Text
                | SqlType::VarChar
                | SqlType::Char
                | SqlType::HexNum
                | SqlType::HexVal
                | SqlType::BitNum
        )
    }

    #[inline]
    pub const fn is_binary(self) -> bool {
        matches!(self, SqlType::Blob | SqlType::VarBinary | SqlType::Binary)
    }

    /// Text or binary: values that hash and compare through a collation.
    #[inline]
    pub const fn is_textual(self) -> bool {
        self.is_text() || self.is_binary()
    }

    /// Temporal types whose raw encoding names an instant or a duration.
    #[inline]
    pub const fn is_date(self) -> bool {
        matches!(
            self,
            SqlType::Timestamp | SqlType::Date | SqlType::Time | SqlType::Datetime
        )
    }

    /// Types whose literal form must be quoted in SQL text.
    #[inline]
    pub const fn is_quoted(self) -> bool {
        matches!(
            self,
            SqlType::Timestamp
                | SqlType::Date
                | SqlType::Time
                | SqlType::Datetime
                | SqlType::Text
                | SqlType::Blob
                | SqlType::VarChar
                | SqlType::VarBinary
                | SqlType::Char
                | SqlType::Binary
                | SqlType::Bit
                | SqlType::Enum
                | SqlType::Set
                | SqlType::Geometry
                | SqlType::Json
        )
    }

    /// Upper-case MySQL-protocol name, e.g. `INT64`, `VARCHAR`.
    pub const fn name(self) -> &'static str {
        match self {
            SqlType::Null => "NULL_TYPE",
            SqlType::Int8 => "INT8",
            SqlType::Uint8 => "UINT8",
            SqlType::Int16 => "INT16",
            SqlType::Uint16 => "UINT16",
            SqlType::Int24 => "INT24",
            SqlType::Uint24 => "UINT24",
            SqlType::Int32 => "INT32",
            SqlType::Uint32 => "UINT32",
            SqlType::Int64 => "INT64",
            SqlType::Uint64 => "UINT64",
            SqlType::Float32 => "FLOAT32",
            SqlType::Float64 => "FLOAT64",
            SqlType::Timestamp => "TIMESTAMP",
            SqlType::Date => "DATE",
            SqlType::Time => "TIME",
            SqlType::Datetime => "DATETIME",
            SqlType::Year => "YEAR",
            SqlType::Decimal => "DECIMAL",
            SqlType::Text => "TEXT",
            SqlType::Blob => "BLOB",
            SqlType::VarChar => "VARCHAR",
            SqlType::VarBinary => "VARBINARY",
            SqlType::Char => "CHAR",
            SqlType::Binary => "BINARY",
            SqlType::Bit => "BIT",
            SqlType::Enum => "ENUM",
            SqlType::Set => "SET",
            SqlType::Tuple => "TUPLE",
            SqlType::Geometry => "GEOMETRY",
            SqlType::Json => "JSON",
            SqlType::Expression => "EXPRESSION",
            SqlType::HexNum => "HEXNUM",
            SqlType::HexVal => "HEXVAL",
            SqlType::BitNum => "BITNUM",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests;
