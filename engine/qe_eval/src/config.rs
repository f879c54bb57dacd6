//! Evaluation settings.
//!
//! `EvalConfig` is built once per engine (usually through
//! [`EvalConfig::from_env`]) and shared by every `ExpressionEnv`.

use qe_collations::{CollationEnv, CollationId};

/// Environment variable enabling the post-evaluation type check.
pub const TYPECHECK_EVAL_VAR: &str = "QE_TYPECHECK_EVAL";
/// Environment variable naming the default collation (`utf8mb4_bin`, ...).
pub const DEFAULT_COLLATION_VAR: &str = "QE_DEFAULT_COLLATION";
/// Environment variable sizing the container pool.
pub const POOL_CAPACITY_VAR: &str = "QE_POOL_CAPACITY";

const DEFAULT_POOL_CAPACITY: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// After `resolve()`, fail if evaluation changed the type that was
    /// computed ahead of time.
    pub typecheck_eval: bool,
    /// Collation given to text literals that do not name one.
    pub default_collation: CollationId,
    /// Blank containers kept by `EvalValuePool`.
    pub pool_capacity: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            typecheck_eval: false,
            default_collation: CollationId::UTF8MB4_GENERAL_CI,
            pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

impl EvalConfig {
    #[must_use]
    pub fn with_typecheck_eval(mut self, enabled: bool) -> Self {
        self.typecheck_eval = enabled;
        self
    }

    #[must_use]
    pub fn with_default_collation(mut self, collation: CollationId) -> Self {
        self.default_collation = collation;
        self
    }

    #[must_use]
    pub fn with_pool_capacity(mut self, capacity: usize) -> Self {
        self.pool_capacity = capacity;
        self
    }

    /// Defaults overridden by `QE_TYPECHECK_EVAL`, `QE_DEFAULT_COLLATION`
    /// and `QE_POOL_CAPACITY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with an explicit variable source.
    ///
    /// Unparsable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = EvalConfig::default();

        if let Some(raw) = lookup(TYPECHECK_EVAL_VAR) {
            match parse_bool(&raw) {
                Some(enabled) => config.typecheck_eval = enabled,
                None => tracing::warn!(var = TYPECHECK_EVAL_VAR, value = %raw, "ignoring invalid flag"),
            }
        }

        if let Some(raw) = lookup(DEFAULT_COLLATION_VAR) {
            match CollationEnv::local().lookup_by_name(raw.trim()) {
                Some(collation) => config.default_collation = collation.id(),
                None => tracing::warn!(var = DEFAULT_COLLATION_VAR, value = %raw, "unknown collation"),
            }
        }

        if let Some(raw) = lookup(POOL_CAPACITY_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => config.pool_capacity = capacity,
                _ => tracing::warn!(var = POOL_CAPACITY_VAR, value = %raw, "ignoring invalid capacity"),
            }
        }

        config
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" | "" => Some(false),
        _ => None,
    }
}
