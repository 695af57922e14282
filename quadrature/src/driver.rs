//! Splits the quadrature across worker threads and reduces their results.

use std::thread;

use decimal::Decimal;
use tracing::{debug, info};

use crate::error::QuadratureError;
use crate::kernel::{self, WorkerDescriptor};

const DEFAULT_ITERATIONS: u64 = 20000;
const DEFAULT_WORKERS: usize = 8;
const DEFAULT_DIGITS: usize = 25;

/// Validated run configuration, with defaults already applied.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Number of quadrature subintervals, `N`.
    pub iterations: u64,
    /// Number of worker threads, `W`.
    pub workers: usize,
    /// Significant-digit budget passed to every bignum in the run.
    pub digits: usize,
}

impl Config {
    /// Build a configuration from raw CLI-style values, substituting the
    /// documented default for any value that is absent or non-positive.
    pub fn from_raw(iterations: Option<i64>, workers: Option<i64>, digits: Option<i64>) -> Self {
        let iterations = iterations
            .filter(|&n| n > 0)
            .map(|n| n as u64)
            .unwrap_or(DEFAULT_ITERATIONS);
        let workers = workers
            .filter(|&n| n > 0)
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_WORKERS);
        let digits = digits
            .filter(|&n| n > 0)
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_DIGITS);
        Config { iterations, workers, digits }
    }
}

/// Partition `[0, n)` into `w` contiguous, non-overlapping ranges.
///
/// Any remainder of `n mod w` lands entirely in the last range; every
/// other range has exactly `n / w` elements.
pub fn partition(n: u64, w: usize) -> Vec<(u64, u64)> {
    assert!(w > 0, "worker count must be at least 1");
    let base = n / w as u64;
    let mut ranges = Vec::with_capacity(w);
    let mut lo = 0u64;
    for j in 0..w {
        let hi = if j + 1 == w { n } else { lo + base };
        ranges.push((lo, hi));
        lo = hi;
    }
    ranges
}

/// The combined result of a full quadrature run.
#[derive(Clone, Debug)]
pub struct PiEstimate {
    /// The Simpson-combined estimate of π.
    pub value: Decimal,
    /// The digit budget it was computed with.
    pub digits: usize,
}

/// Fan out `config.workers` threads over `config.iterations` subintervals,
/// join them, and combine their partial sums into a π estimate.
///
/// Any worker-time arithmetic failure, and any failure to launch or join
/// a worker, is fatal for the whole run.
pub fn run(config: Config) -> Result<PiEstimate, QuadratureError> {
    let ranges = partition(config.iterations, config.workers);
    debug!(
        iterations = config.iterations,
        workers = config.workers,
        digits = config.digits,
        "partitioned quadrature"
    );

    let mut handles = Vec::with_capacity(ranges.len());
    for (thread_id, (lo, hi)) in ranges.into_iter().enumerate() {
        let desc = WorkerDescriptor {
            thread_id,
            lo,
            hi,
            total_iterations: config.iterations,
            max_digits: config.digits,
        };
        let handle = thread::Builder::new()
            .name(format!("quad-worker-{thread_id}"))
            .spawn(move || kernel::run(&desc))
            .map_err(|_| QuadratureError::LaunchFailure { thread_id })?;
        handles.push((thread_id, handle));
    }

    let mut trap_sum = Decimal::try_new(config.digits)?;
    let mut mid_sum = Decimal::try_new(config.digits)?;
    let mut trap_next = Decimal::try_new(config.digits)?;
    let mut mid_next = Decimal::try_new(config.digits)?;

    // Reduced in ascending thread_id order so the final digits are
    // reproducible given the same N, W and precision.
    for (thread_id, handle) in handles {
        let partials = handle
            .join()
            .map_err(|_| QuadratureError::WorkerPanicked { thread_id })??;
        trap_next.add(&trap_sum, &partials.trap);
        std::mem::swap(&mut trap_sum, &mut trap_next);
        mid_next.add(&mid_sum, &partials.mid);
        std::mem::swap(&mut mid_sum, &mut mid_next);
    }

    // Simpson combine: pi_hat = 4 * (2*M + T) / 3.
    let mut tmp = Decimal::try_new(config.digits)?;
    tmp.mult_int(&mid_sum, 2);
    let mut combined = Decimal::try_new(config.digits)?;
    combined.add(&tmp, &trap_sum);
    tmp.divide_int(&combined, 3)?;
    let mut pi_hat = Decimal::try_new(config.digits)?;
    pi_hat.mult_int(&tmp, 4);

    info!(digits = config.digits, "quadrature complete");
    Ok(PiEstimate { value: pi_hat, digits: config.digits })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_covers_the_range_exactly() {
        let ranges = partition(23, 4);
        assert_eq!(ranges[0].0, 0);
        assert_eq!(ranges.last().unwrap().1, 23);
        for w in ranges.windows(2) {
            assert_eq!(w[0].1, w[1].0);
        }
    }

    #[test]
    fn partition_with_no_remainder_splits_evenly() {
        let ranges = partition(100, 4);
        assert_eq!(ranges, vec![(0, 25), (25, 50), (50, 75), (75, 100)]);
    }

    #[test]
    fn config_from_raw_applies_documented_defaults() {
        let cfg = Config::from_raw(None, Some(-3), Some(0));
        assert_eq!(cfg.iterations, DEFAULT_ITERATIONS);
        assert_eq!(cfg.workers, DEFAULT_WORKERS);
        assert_eq!(cfg.digits, DEFAULT_DIGITS);
    }

    #[test]
    fn single_iteration_agrees_with_pi_to_one_decimal() {
        let cfg = Config::from_raw(Some(10), Some(1), Some(25));
        let estimate = run(cfg).unwrap();
        assert!(estimate.value.to_string().starts_with("3.1"));
    }

    #[test]
    fn worker_count_does_not_change_the_leading_digits() {
        let single = run(Config::from_raw(Some(2000), Some(1), Some(25))).unwrap();
        let many = run(Config::from_raw(Some(2000), Some(8), Some(25))).unwrap();
        let a = single.value.to_string_limited(8);
        let b = many.value.to_string_limited(8);
        assert_eq!(a, b);
    }
}
