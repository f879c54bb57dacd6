//! Lazy, MySQL-compatible value evaluation.
//!
//! The central type is [`EvalValue`], a container that is either bound to
//! an expression that has not run yet or holds a typed payload. Reading the
//! payload runs the expression once; conversions then rewrite the value in
//! place following MySQL's rules for integer overflow, numeric promotion,
//! collations and hashing.
//!
//! # Modules
//!
//! - `value`: the container, its payload and accessors
//! - `numeric`: the numeric conversion ladder and negation
//! - `coerce`: common-type selection and casting for comparisons
//! - `hash`: hashing consistent with comparison
//! - `text`: byte rendering, text/binary re-typing, truncation
//! - `expr`: the `Expr` capability and the basic nodes
//! - `pool`: reuse of blank containers

mod coerce;
mod config;
mod env;
mod errors;
mod expr;
mod flags;
mod format;
mod hash;
mod numeric;
mod pool;
mod stack;
mod text;
mod value;

use std::sync::Once;

pub use coerce::choose_common_type;
pub use config::{EvalConfig, DEFAULT_COLLATION_VAR, POOL_CAPACITY_VAR, TYPECHECK_EVAL_VAR};
pub use env::ExpressionEnv;
pub use errors::{ErrorCode, EvalError, EvalErrorKind, EvalResult};
pub use expr::{
    BindVariable, Collate, Column, Convert, ConvertTarget, Expr, Literal, Negate, TupleExpr,
};
pub use flags::{ValueFlags, SIGNED_CAP};
pub use format::format_float;
pub use hash::{null_safe_hashcode_of, HashCode, NULL_HASH};
pub use pool::{EvalValuePool, PooledValue};
pub use stack::ensure_sufficient_stack;
pub use value::{Boolean, EvalValue, Payload};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set; later calls are no-ops.
/// `RUST_LOG=qe_eval=trace` shows every resolution.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
