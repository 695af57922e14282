//! Failure modes of the quadrature kernel and driver.

use decimal::DecimalError;
use thiserror::Error;

/// Failure modes surfaced by a single worker or by the driver that owns it.
#[derive(Debug, Error)]
pub enum QuadratureError {
    /// An arithmetic operation inside the kernel failed.
    ///
    /// The kernel never inspects this itself (it trusts well-tested
    /// arithmetic); it is propagated up to the worker's join result,
    /// where the driver treats it as fatal for the whole run.
    #[error(transparent)]
    Arithmetic(#[from] DecimalError),

    /// The OS refused to create a worker thread.
    #[error("failed to launch worker {thread_id}")]
    LaunchFailure {
        /// Index of the worker that could not be started.
        thread_id: usize,
    },

    /// A worker thread panicked before publishing its partial sums.
    #[error("worker {thread_id} panicked before completing")]
    WorkerPanicked {
        /// Index of the worker that panicked.
        thread_id: usize,
    },
}
