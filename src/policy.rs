//! Error policy: how a `StrictVec` reacts when an operation cannot proceed.
//!
//! Every plain (non-`try_`) operation routes its failure through the vector's
//! [`ErrorPolicy`]. Three kinds of failure are configurable and may be turned
//! into silent no-ops:
//!
//! - [`StrictVecError::NullArgument`] via [`ErrorPolicy::SUPPRESS_NULL`]
//! - [`StrictVecError::IndexOutOfRange`] via [`ErrorPolicy::SUPPRESS_OUT_OF_BOUNDS`]
//! - [`StrictVecError::CapacityOverflow`] via [`ErrorPolicy::SUPPRESS_OVERFLOW`]
//!
//! All other failures are fatal and reach [`ErrorPolicy::fatal`], which never
//! returns. The default terminates the process; [`Unwind`] instead raises a
//! condition that [`catch_fatal`] turns back into a `Result`.
//!
//! ```
//! use strictvec::{ErrorPolicy, StrictVec};
//!
//! struct QuietIndexing;
//!
//! impl ErrorPolicy for QuietIndexing {
//!     const SUPPRESS_OUT_OF_BOUNDS: bool = true;
//! }
//!
//! let mut vec: StrictVec<u32, QuietIndexing> = StrictVec::new();
//! vec.push(7);
//! vec.set(5, 1); // ignored
//! assert_eq!(vec.get(5), 0);
//! assert_eq!(vec.get(0), 7);
//! ```

use std::panic::{self, AssertUnwindSafe};

use crate::error::StrictVecError;

/// Compile-time failure policy for a `StrictVec`.
///
/// Implement this on a unit type to select which conditions are suppressed and
/// what a fatal condition does.
pub trait ErrorPolicy {
    /// Absent vector arguments become no-ops instead of fatal errors.
    const SUPPRESS_NULL: bool = false;
    /// Out-of-range `get`/`set`/`insert`/`delete` become no-ops (`get` yields
    /// `T::default()`) instead of fatal errors.
    const SUPPRESS_OUT_OF_BOUNDS: bool = false;
    /// Capacity requests that overflow the size domain become no-ops instead
    /// of fatal errors.
    const SUPPRESS_OVERFLOW: bool = false;

    /// Handles a condition the operation cannot recover from.
    fn fatal(error: StrictVecError) -> ! {
        abort_with(error)
    }
}

/// Every condition is fatal and terminates the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct Strict;

impl ErrorPolicy for Strict {}

/// Null, out-of-bounds and overflow conditions are ignored; the rest abort.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lenient;

impl ErrorPolicy for Lenient {
    const SUPPRESS_NULL: bool = true;
    const SUPPRESS_OUT_OF_BOUNDS: bool = true;
    const SUPPRESS_OVERFLOW: bool = true;
}

/// Every condition is fatal, but fatal paths unwind to the nearest
/// [`catch_fatal`] instead of terminating the process.
///
/// Intended for tests and diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unwind;

impl ErrorPolicy for Unwind {
    fn fatal(error: StrictVecError) -> ! {
        panic::resume_unwind(Box::new(error))
    }
}

/// Returns `true` if policy `P` turns `error` into a no-op.
#[must_use]
pub fn suppresses<P: ErrorPolicy>(error: &StrictVecError) -> bool {
    match error {
        StrictVecError::NullArgument { .. } => P::SUPPRESS_NULL,
        StrictVecError::IndexOutOfRange { .. } => P::SUPPRESS_OUT_OF_BOUNDS,
        StrictVecError::CapacityOverflow { .. } => P::SUPPRESS_OVERFLOW,
        _ => false,
    }
}

/// Returns normally only when `P` suppresses `error`.
pub(crate) fn resolve<P: ErrorPolicy>(error: StrictVecError) {
    if suppresses::<P>(&error) {
        tracing::debug!(%error, "vector error suppressed by policy");
        return;
    }
    P::fatal(error)
}

/// Default fatal handler: prints the diagnostic and aborts the process.
pub fn abort_with(error: StrictVecError) -> ! {
    tracing::error!(%error, "fatal vector error, aborting");
    eprintln!("{error}");
    std::process::abort()
}

/// Runs `f` as a recovery point for fatal conditions raised by [`Unwind`].
///
/// # Errors
///
/// Returns the `StrictVecError` that made an operation inside `f` fatal.
/// Panics that do not carry a `StrictVecError` are propagated unchanged.
pub fn catch_fatal<R>(f: impl FnOnce() -> R) -> Result<R, StrictVecError> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => match payload.downcast::<StrictVecError>() {
            Ok(error) => Err(*error),
            Err(other) => panic::resume_unwind(other),
        },
    }
}
