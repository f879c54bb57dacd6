//! The environment an expression tree is evaluated against.

use qe_collations::CollationId;
use qe_types::SqlValue;
use rustc_hash::FxHashMap;

use crate::errors::{column_out_of_range, missing_bind_variable, EvalResult};
use crate::EvalConfig;

/// Bound query parameters, the current row and engine settings.
///
/// Shared read-only (behind an `Arc`) by every container that evaluates
/// against it.
#[derive(Clone, Debug, Default)]
pub struct ExpressionEnv {
    bind_vars: FxHashMap<String, SqlValue>,
    row: Vec<SqlValue>,
    config: EvalConfig,
}

impl ExpressionEnv {
    pub fn new(config: EvalConfig) -> Self {
        ExpressionEnv {
            bind_vars: FxHashMap::default(),
            row: Vec::new(),
            config,
        }
    }

    #[must_use]
    pub fn with_bind_var(mut self, name: impl Into<String>, value: SqlValue) -> Self {
        self.bind_vars.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn with_row(mut self, row: Vec<SqlValue>) -> Self {
        self.row = row;
        self
    }

    pub fn set_bind_var(&mut self, name: impl Into<String>, value: SqlValue) {
        self.bind_vars.insert(name.into(), value);
    }

    pub fn set_row(&mut self, row: Vec<SqlValue>) {
        self.row = row;
    }

    pub fn bind_var(&self, name: &str) -> EvalResult<&SqlValue> {
        self.bind_vars
            .get(name)
            .ok_or_else(|| missing_bind_variable(name))
    }

    pub fn column(&self, offset: usize) -> EvalResult<&SqlValue> {
        self.row
            .get(offset)
            .ok_or_else(|| column_out_of_range(offset, self.row.len()))
    }

    #[inline]
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    #[inline]
    pub fn default_collation(&self) -> CollationId {
        self.config.default_collation
    }
}
