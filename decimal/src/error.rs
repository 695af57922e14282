//! Error types returned by the fallible corners of the decimal core.

use thiserror::Error;

/// Failure modes of the decimal arithmetic core.
///
/// Truncation of low-order digits past a value's `precision` is *not* an
/// error: it is the core's documented, silent loss mode. Only the two
/// conditions below stop an operation from producing a value at all.
#[derive(Debug, Error)]
pub enum DecimalError {
    /// `divide` (or one of its integer-argument wrappers) was asked to
    /// divide by a denominator whose value is exactly zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A digit buffer of the requested size could not be allocated.
    ///
    /// This can only happen when a caller asks for an unusually large
    /// `precision`; ordinary arithmetic never grows a buffer past the
    /// size fixed at construction.
    #[error("failed to allocate a digit buffer for {requested} digits")]
    Allocation { requested: usize },
}
