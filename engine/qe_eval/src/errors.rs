//! Error types for value evaluation.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` says what went wrong; `ErrorCode` is the coarse class
//! callers route on (bad user input, missing feature, engine bug). Factory
//! functions (e.g. `unsupported_coercion()`) are the public way to build
//! errors and pick the code for each kind.
//!
//! Contract faults (reading the wrong payload, reading an unresolved value)
//! are not errors: they panic.

use std::fmt;

use qe_collations::{CollationError, CollationId};
use qe_decimal::DecimalError;
use qe_types::{SqlType, ValueError};

/// Result of an evaluation step.
pub type EvalResult<T = ()> = Result<T, EvalError>;

/// Coarse classification of an evaluation failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The input value cannot be interpreted as requested.
    InvalidArgument,
    /// The engine does not support this operation yet.
    Unimplemented,
    /// The caller asked for something the engine should never be asked.
    Internal,
}

impl ErrorCode {
    pub const fn name(self) -> &'static str {
        match self {
            ErrorCode::InvalidArgument => "INVALID_ARGUMENT",
            ErrorCode::Unimplemented => "UNIMPLEMENTED",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Coercion
    /// No common type exists for the two operands.
    UnsupportedCoercion {
        left: SqlType,
        right: SqlType,
    },
    /// A value of this type cannot be cast to `target`.
    UnsupportedCast {
        target: SqlType,
        value: String,
    },

    // Hashing
    UnsupportedHashType {
        ty: SqlType,
    },
    UnknownCollation {
        id: CollationId,
    },
    InvalidTemporal {
        ty: SqlType,
        raw: String,
    },

    // Literals
    /// The literal's type has no evaluation representation.
    UnsupportedLiteral {
        ty: SqlType,
        value: String,
    },
    /// Integral text that parses as neither a signed nor an unsigned integer.
    CouldNotParse {
        raw: String,
    },
    /// A raw value failed a strict parse.
    InvalidValue {
        message: String,
    },
    Decimal {
        message: String,
    },
    InvalidCharset {
        message: String,
    },
    DecimalOutOfRange,

    // Booleans
    NotABoolean {
        value: String,
    },

    // Environment
    MissingBindVariable {
        name: String,
    },
    ColumnOutOfRange {
        offset: usize,
        len: usize,
    },

    // Expressions
    /// A tuple where a single value is required.
    NotScalar,

    /// Evaluation changed the type computed ahead of time.
    TypeNotPrecomputed {
        before: SqlType,
        after: SqlType,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Coercion
            Self::UnsupportedCoercion { left, right } => {
                write!(f, "types does not support hashcode yet: {left} vs {right}")
            }
            Self::UnsupportedCast { target, value } => {
                write!(
                    f,
                    "coercion should not try to coerce this value to {target}: {value}"
                )
            }

            // Hashing
            Self::UnsupportedHashType { ty } => {
                write!(f, "types does not support hashcode yet: {ty}")
            }
            Self::UnknownCollation { id } => write!(
                f,
                "text type with an unknown/unsupported collation cannot be hashed (collation {})",
                id.0
            ),
            Self::InvalidTemporal { ty, raw } => {
                write!(f, "cannot parse '{raw}' as {ty}")
            }

            // Literals
            Self::UnsupportedLiteral { ty, value } => {
                write!(f, "Type is not supported: {value} {ty}")
            }
            Self::CouldNotParse { raw } => write!(f, "could not parse value: '{raw}'"),
            Self::InvalidValue { message }
            | Self::Decimal { message }
            | Self::InvalidCharset { message } => f.write_str(message),
            Self::DecimalOutOfRange => write!(f, "DECIMAL value is out of range"),

            // Booleans
            Self::NotABoolean { value } => write!(f, "{value} is not a boolean"),

            // Environment
            Self::MissingBindVariable { name } => {
                write!(f, "query arguments missing for {name}")
            }
            Self::ColumnOutOfRange { offset, len } => {
                write!(f, "column offset {offset} out of range for row of {len}")
            }

            // Expressions
            Self::NotScalar => write!(f, "Operand should contain 1 column(s)"),

            Self::TypeNotPrecomputed { before, after } => write!(
                f,
                "did not pre-compute the right type: {before} before evaluation, {after} after"
            ),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub code: ErrorCode,
    pub kind: EvalErrorKind,
}

impl EvalError {
    #[inline]
    fn new(code: ErrorCode, kind: EvalErrorKind) -> Self {
        EvalError { code, kind }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.kind)
    }
}

impl std::error::Error for EvalError {}

impl From<ValueError> for EvalError {
    #[cold]
    fn from(err: ValueError) -> Self {
        EvalError::new(
            ErrorCode::InvalidArgument,
            EvalErrorKind::InvalidValue {
                message: err.to_string(),
            },
        )
    }
}

impl From<DecimalError> for EvalError {
    #[cold]
    fn from(err: DecimalError) -> Self {
        EvalError::new(
            ErrorCode::InvalidArgument,
            EvalErrorKind::Decimal {
                message: err.to_string(),
            },
        )
    }
}

impl From<CollationError> for EvalError {
    #[cold]
    fn from(err: CollationError) -> Self {
        EvalError::new(
            ErrorCode::InvalidArgument,
            EvalErrorKind::InvalidCharset {
                message: err.to_string(),
            },
        )
    }
}

// Factory functions

/// No common type exists for `left` and `right`.
#[cold]
pub fn unsupported_coercion(left: SqlType, right: SqlType) -> EvalError {
    EvalError::new(
        ErrorCode::Unimplemented,
        EvalErrorKind::UnsupportedCoercion { left, right },
    )
}

/// A value cannot be cast to `target`.
#[cold]
pub fn unsupported_cast(target: SqlType, value: impl fmt::Display) -> EvalError {
    EvalError::new(
        ErrorCode::Internal,
        EvalErrorKind::UnsupportedCast {
            target,
            value: value.to_string(),
        },
    )
}

#[cold]
pub fn unsupported_hash_type(ty: SqlType) -> EvalError {
    EvalError::new(
        ErrorCode::Unimplemented,
        EvalErrorKind::UnsupportedHashType { ty },
    )
}

#[cold]
pub fn unknown_collation(id: CollationId) -> EvalError {
    EvalError::new(ErrorCode::Internal, EvalErrorKind::UnknownCollation { id })
}

#[cold]
pub fn invalid_temporal(ty: SqlType, raw: &str) -> EvalError {
    EvalError::new(
        ErrorCode::InvalidArgument,
        EvalErrorKind::InvalidTemporal {
            ty,
            raw: raw.to_owned(),
        },
    )
}

#[cold]
pub fn unsupported_literal(ty: SqlType, value: impl fmt::Display) -> EvalError {
    EvalError::new(
        ErrorCode::Internal,
        EvalErrorKind::UnsupportedLiteral {
            ty,
            value: value.to_string(),
        },
    )
}

#[cold]
pub fn could_not_parse(raw: &str) -> EvalError {
    EvalError::new(
        ErrorCode::InvalidArgument,
        EvalErrorKind::CouldNotParse {
            raw: raw.to_owned(),
        },
    )
}

#[cold]
pub fn decimal_out_of_range() -> EvalError {
    EvalError::new(ErrorCode::InvalidArgument, EvalErrorKind::DecimalOutOfRange)
}

/// `value` is already rendered the way the message should show it
/// (`2`, `'yes'`).
#[cold]
pub fn not_a_boolean(value: impl Into<String>) -> EvalError {
    EvalError::new(
        ErrorCode::InvalidArgument,
        EvalErrorKind::NotABoolean {
            value: value.into(),
        },
    )
}

#[cold]
pub fn missing_bind_variable(name: &str) -> EvalError {
    EvalError::new(
        ErrorCode::InvalidArgument,
        EvalErrorKind::MissingBindVariable {
            name: name.to_owned(),
        },
    )
}

#[cold]
pub fn column_out_of_range(offset: usize, len: usize) -> EvalError {
    EvalError::new(
        ErrorCode::Internal,
        EvalErrorKind::ColumnOutOfRange { offset, len },
    )
}

#[cold]
pub fn not_scalar() -> EvalError {
    EvalError::new(ErrorCode::InvalidArgument, EvalErrorKind::NotScalar)
}

#[cold]
pub fn type_not_precomputed(before: SqlType, after: SqlType) -> EvalError {
    EvalError::new(
        ErrorCode::Internal,
        EvalErrorKind::TypeNotPrecomputed { before, after },
    )
}
