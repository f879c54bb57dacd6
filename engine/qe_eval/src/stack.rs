//! Stack growth for recursive tuple handling.
//!
//! Tuples nest arbitrarily deep and resolving, rendering or flattening them
//! recurses once per level.

/// Run `f`, first growing the stack if less than the red zone is left.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Headroom to keep before recursing (100KB).
    const RED_ZONE: usize = 100 * 1024;

    /// Size of each newly allocated segment (1MB).
    const STACK_SEGMENT: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
