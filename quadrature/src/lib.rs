//! Parallel composite quadrature of `4·∫₀¹ 1/(1+x²) dx` over the
//! [`decimal`] bignum core.
//!
//! [`driver::run`] splits the requested number of subintervals across a
//! fixed pool of OS threads, each of which runs [`kernel::run`] over its
//! own contiguous range and publishes a pair of partial sums once, at
//! completion. The driver then reduces those sums and applies Simpson's
//! rule to produce the final estimate.

mod error;
mod kernel;
mod driver;

pub use driver::{partition, run, Config, PiEstimate};
pub use error::QuadratureError;
pub use kernel::{PartialSums, WorkerDescriptor};
