//! Errors raised while interpreting raw SQL values.

use crate::SqlType;

/// A raw value could not be interpreted as the requested type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    /// Integer text did not parse, or did not fit the target width.
    #[error("cannot parse {ty} value '{raw}' as {target}: {reason}")]
    Parse {
        ty: SqlType,
        raw: String,
        target: &'static str,
        reason: String,
    },

    /// Hex literal with characters outside `[0-9a-fA-F]` or a bad length.
    #[error("invalid hex literal '{raw}'")]
    InvalidHex { raw: String },
}
