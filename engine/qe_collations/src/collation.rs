//! The `Collation` capability and the built-in implementations.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hasher;

use rustc_hash::FxHasher;

use crate::{Charset, CollationId};

/// Weight given to a byte that does not decode in the collation's charset.
/// Sits above every Unicode scalar value so invalid input never ties with
/// a real character.
const INVALID_WEIGHT_BASE: u32 = 0x0011_0000;

/// Comparison and hashing rules for strings in one charset.
///
/// Invariant: `collate(a, b) == Equal` implies `hash(a, s) == hash(b, s)`
/// for every seed `s`.
pub trait Collation: Send + Sync + fmt::Debug {
    fn id(&self) -> CollationId;

    fn name(&self) -> &str;

    fn charset(&self) -> Charset;

    /// Whether the collation compares raw bytes with no padding rules.
    fn is_binary(&self) -> bool {
        false
    }

    fn collate(&self, left: &[u8], right: &[u8]) -> Ordering;

    fn hash(&self, bytes: &[u8], seed: u64) -> u64;
}

/// The `binary` collation: bytewise, no padding.
#[derive(Copy, Clone, Debug, Default)]
pub struct BinaryCollation;

impl Collation for BinaryCollation {
    fn id(&self) -> CollationId {
        CollationId::BINARY
    }

    fn name(&self) -> &str {
        "binary"
    }

    fn charset(&self) -> Charset {
        Charset::Binary
    }

    fn is_binary(&self) -> bool {
        true
    }

    fn collate(&self, left: &[u8], right: &[u8]) -> Ordering {
        left.cmp(right)
    }

    fn hash(&self, bytes: &[u8], seed: u64) -> u64 {
        let mut hasher = FxHasher::default();
        hasher.write_u64(seed);
        hasher.write(bytes);
        hasher.finish()
    }
}

/// `*_bin` collations: code point order, trailing spaces ignored.
#[derive(Clone, Debug)]
pub struct PadSpaceBinCollation {
    id: CollationId,
    name: &'static str,
    charset: Charset,
}

impl PadSpaceBinCollation {
    pub const fn new(id: CollationId, name: &'static str, charset: Charset) -> Self {
        PadSpaceBinCollation { id, name, charset }
    }
}

impl Collation for PadSpaceBinCollation {
    fn id(&self) -> CollationId {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn charset(&self) -> Charset {
        self.charset
    }

    fn collate(&self, left: &[u8], right: &[u8]) -> Ordering {
        weights(self.charset, left, false).cmp(weights(self.charset, right, false))
    }

    fn hash(&self, bytes: &[u8], seed: u64) -> u64 {
        hash_weights(weights(self.charset, bytes, false), seed)
    }
}

/// `*_general_ci` style collations: case-insensitive by simple uppercase
/// folding, trailing spaces ignored.
#[derive(Clone, Debug)]
pub struct GeneralCiCollation {
    id: CollationId,
    name: &'static str,
    charset: Charset,
}

impl GeneralCiCollation {
    pub const fn new(id: CollationId, name: &'static str, charset: Charset) -> Self {
        GeneralCiCollation { id, name, charset }
    }
}

impl Collation for GeneralCiCollation {
    fn id(&self) -> CollationId {
        self.id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn charset(&self) -> Charset {
        self.charset
    }

    fn collate(&self, left: &[u8], right: &[u8]) -> Ordering {
        weights(self.charset, left, true).cmp(weights(self.charset, right, true))
    }

    fn hash(&self, bytes: &[u8], seed: u64) -> u64 {
        hash_weights(weights(self.charset, bytes, true), seed)
    }
}

fn hash_weights(weights: impl Iterator<Item = u32>, seed: u64) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write_u64(seed);
    for weight in weights {
        hasher.write_u32(weight);
    }
    hasher.finish()
}

fn trim_trailing_spaces(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != b' ').map_or(0, |i| i + 1);
    &bytes[..end]
}

/// Per-character sort weights of `bytes` with trailing spaces removed.
fn weights(charset: Charset, bytes: &[u8], fold_case: bool) -> Weights<'_> {
    Weights {
        charset,
        rest: trim_trailing_spaces(bytes),
        fold_case,
    }
}

struct Weights<'a> {
    charset: Charset,
    rest: &'a [u8],
    fold_case: bool,
}

impl Iterator for Weights<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let first = *self.rest.first()?;
        let Some((c, width)) = self.charset.decode(self.rest) else {
            self.rest = &self.rest[1..];
            return Some(INVALID_WEIGHT_BASE + u32::from(first));
        };
        self.rest = &self.rest[width..];
        if self.fold_case {
            Some(u32::from(fold(c)))
        } else {
            Some(u32::from(c))
        }
    }
}

/// Simple one-to-one uppercase mapping; characters whose uppercase form
/// expands to several characters keep their own weight.
fn fold(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}
