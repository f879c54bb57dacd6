//! Collations for the query evaluation engine.
//!
//! A collation decides how bytes are read as characters, how two strings
//! compare, and how a string hashes. Strings that compare equal under a
//! collation hash identically under it, which is what lets the engine hash
//! `'abc'` and `'ABC'` to the same shard under a case-insensitive collation.
//!
//! This crate provides:
//! - `CollationId`, `TypedCollation`: identifiers plus coercibility metadata
//! - `Collation`: the capability every collation implements
//! - `CollationEnv`: registry of collations keyed by id and name
//! - `convert` / `slice`: charset re-encoding and character-safe slicing

mod charset;
mod collation;
mod convert;
mod env;

pub use charset::Charset;
pub use collation::{BinaryCollation, Collation, GeneralCiCollation, PadSpaceBinCollation};
pub use convert::{convert, slice};
pub use env::CollationEnv;

/// MySQL collation id.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollationId(pub u16);

impl CollationId {
    /// No collation assigned yet.
    pub const UNKNOWN: CollationId = CollationId(0);
    pub const LATIN1_SWEDISH_CI: CollationId = CollationId(8);
    pub const ASCII_GENERAL_CI: CollationId = CollationId(11);
    pub const UTF8MB4_GENERAL_CI: CollationId = CollationId(45);
    pub const UTF8MB4_BIN: CollationId = CollationId(46);
    pub const LATIN1_BIN: CollationId = CollationId(47);
    pub const BINARY: CollationId = CollationId(63);
    pub const ASCII_BIN: CollationId = CollationId(65);

    #[inline]
    pub fn is_unknown(self) -> bool {
        self == Self::UNKNOWN
    }
}

/// How strongly an operand's collation binds when two operands disagree.
/// Lower wins.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Coercibility {
    /// `COLLATE` clause.
    Explicit,
    /// Concatenation of two different collations.
    None,
    /// Column reference.
    Implicit,
    /// System constant such as `USER()`.
    SysConst,
    /// String literal.
    #[default]
    Coercible,
    /// Number converted to a string.
    Numeric,
    /// `NULL` or an expression derived from it.
    Ignorable,
}

/// The set of characters a value may contain.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Repertoire {
    /// Only 7-bit ASCII.
    Ascii,
    /// Anything the charset can hold.
    #[default]
    Unicode,
}

/// A collation id plus the metadata needed to pick a winner between two
/// operands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TypedCollation {
    pub collation: CollationId,
    pub coercibility: Coercibility,
    pub repertoire: Repertoire,
}

impl TypedCollation {
    /// Collation attached to numeric values.
    pub const NUMERIC: TypedCollation = TypedCollation {
        collation: CollationId::BINARY,
        coercibility: Coercibility::Numeric,
        repertoire: Repertoire::Ascii,
    };

    /// Collation attached to binary strings.
    pub const BINARY: TypedCollation = TypedCollation {
        collation: CollationId::BINARY,
        coercibility: Coercibility::Coercible,
        repertoire: Repertoire::Unicode,
    };

    /// A coercible literal in `collation`.
    pub const fn coercible(collation: CollationId) -> TypedCollation {
        TypedCollation {
            collation,
            coercibility: Coercibility::Coercible,
            repertoire: Repertoire::Unicode,
        }
    }
}

/// Bytes that are not valid in the source charset.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CollationError {
    #[error("invalid {charset} byte sequence at offset {offset}")]
    InvalidSequence { charset: Charset, offset: usize },
}
