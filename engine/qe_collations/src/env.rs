//! Registry of collations keyed by id and by name.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::collation::{BinaryCollation, Collation, GeneralCiCollation, PadSpaceBinCollation};
use crate::{Charset, CollationId};

#[derive(Default)]
struct Registry {
    by_id: FxHashMap<CollationId, Arc<dyn Collation>>,
    by_name: FxHashMap<String, CollationId>,
}

/// Thread-safe lookup table of the collations known to the engine.
///
/// Lookups take a shared read lock; `register` takes the write lock. The
/// process-wide instance from [`CollationEnv::local`] is seeded with the
/// built-in collations.
pub struct CollationEnv {
    registry: RwLock<Registry>,
}

impl CollationEnv {
    /// An environment holding only the built-in collations.
    pub fn new() -> Self {
        let env = CollationEnv {
            registry: RwLock::new(Registry::default()),
        };
        env.register(Arc::new(BinaryCollation));
        for (id, name, charset) in [
            (CollationId::UTF8MB4_GENERAL_CI, "utf8mb4_general_ci", Charset::Utf8mb4),
            (CollationId::LATIN1_SWEDISH_CI, "latin1_swedish_ci", Charset::Latin1),
            (CollationId::ASCII_GENERAL_CI, "ascii_general_ci", Charset::Ascii),
        ] {
            env.register(Arc::new(GeneralCiCollation::new(id, name, charset)));
        }
        for (id, name, charset) in [
            (CollationId::UTF8MB4_BIN, "utf8mb4_bin", Charset::Utf8mb4),
            (CollationId::LATIN1_BIN, "latin1_bin", Charset::Latin1),
            (CollationId::ASCII_BIN, "ascii_bin", Charset::Ascii),
        ] {
            env.register(Arc::new(PadSpaceBinCollation::new(id, name, charset)));
        }
        env
    }

    /// The shared process-wide environment.
    pub fn local() -> &'static CollationEnv {
        static LOCAL: OnceLock<CollationEnv> = OnceLock::new();
        LOCAL.get_or_init(CollationEnv::new)
    }

    pub fn lookup_by_id(&self, id: CollationId) -> Option<Arc<dyn Collation>> {
        self.registry.read().by_id.get(&id).cloned()
    }

    /// Case-insensitive name lookup.
    pub fn lookup_by_name(&self, name: &str) -> Option<Arc<dyn Collation>> {
        let registry = self.registry.read();
        let id = registry.by_name.get(&name.to_ascii_lowercase())?;
        registry.by_id.get(id).cloned()
    }

    /// Add or replace a collation. Returns the one previously registered
    /// under the same id.
    pub fn register(&self, collation: Arc<dyn Collation>) -> Option<Arc<dyn Collation>> {
        let id = collation.id();
        let name = collation.name().to_ascii_lowercase();
        let mut registry = self.registry.write();
        registry.by_name.insert(name, id);
        registry.by_id.insert(id, collation)
    }

    pub fn len(&self) -> usize {
        self.registry.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CollationEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CollationEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollationEnv")
            .field("collations", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
