//! Optimizer Barriers
//!
//! Keep the compiler from deleting or hoisting work whose result is never
//! otherwise observed.

use std::sync::atomic::{Ordering, compiler_fence};

/// Treat `value` as used, forcing it to be computed.
#[inline(always)]
pub fn do_not_optimize<T>(value: T) -> T {
    std::hint::black_box(value)
}

/// Assume any memory may have been read or written at this point.
///
/// Stores issued before the call cannot be elided or moved past it.
#[inline(always)]
pub fn clobber_memory() {
    compiler_fence(Ordering::SeqCst);
}
