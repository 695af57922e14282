//! Per-worker quadrature loop: partial trapezoid and midpoint sums.
//!
//! Everything here operates purely in the decimal domain; the only
//! native-integer inputs are the subinterval index, its successor, `N`,
//! and the small constants 1 and 2 that the algebra calls for.

use decimal::Decimal;
use tracing::trace;

use crate::error::QuadratureError;

/// Describes one worker's share of the overall quadrature.
#[derive(Clone, Copy, Debug)]
pub struct WorkerDescriptor {
    /// Index of this worker in `[0, W)`.
    pub thread_id: usize,
    /// Start of this worker's half-open subinterval range.
    pub lo: u64,
    /// End (exclusive) of this worker's half-open subinterval range.
    pub hi: u64,
    /// Total subinterval count `N`, shared by every worker.
    pub total_iterations: u64,
    /// Significant-digit budget passed through to every bignum this
    /// worker constructs.
    pub max_digits: usize,
}

/// The two partial sums a worker publishes once, at completion.
#[derive(Clone, Debug)]
pub struct PartialSums {
    /// `Σ h / (1 + ((i·h + (i+1)·h)/2)²)` over this worker's range.
    pub trap: Decimal,
    /// `Σ h / (1 + ((i+0.5)·h)²)` over this worker's range.
    pub mid: Decimal,
}

/// Run one worker's share of the quadrature to completion.
///
/// Summation proceeds in strictly ascending `i`. This is an observable
/// part of the contract, not an implementation detail: truncation at
/// `max_digits` makes the accumulation order visible in the final
/// digits, so reordering this loop changes results.
pub fn run(desc: &WorkerDescriptor) -> Result<PartialSums, QuadratureError> {
    let d = desc.max_digits;

    let mut one = Decimal::try_new(d)?;
    one.set_int(1);
    let mut h = Decimal::try_new(d)?;
    h.divide_int(&one, desc.total_iterations)?;

    let mut trap = Decimal::try_new(d)?;
    let mut mid = Decimal::try_new(d)?;

    if desc.lo >= desc.hi {
        return Ok(PartialSums { trap, mid });
    }

    // Worker-local scratch. None of it is shared with another worker,
    // and all of it is released when this function returns.
    let mut left = Decimal::try_new(d)?; // i * h
    let mut right = Decimal::try_new(d)?; // (i + 1) * h
    let mut inc = Decimal::try_new(d)?; // (i + 0.5) * h, carried across iterations
    let mut inc_next = Decimal::try_new(d)?;
    let mut trap_next = Decimal::try_new(d)?;
    let mut mid_next = Decimal::try_new(d)?;
    let mut sum = Decimal::try_new(d)?;
    let mut avg = Decimal::try_new(d)?;
    let mut sq = Decimal::try_new(d)?;
    let mut denom = Decimal::try_new(d)?;
    let mut term = Decimal::try_new(d)?;
    let mut two = Decimal::try_new(d)?;
    two.set_int(2);

    left.mult_int(&h, desc.lo);

    // inc starts at (lo + 0.5) * h = ((2*lo + 1) * h) / 2; afterwards it
    // is only ever incremented by h, never recomputed from scratch.
    let mut half = Decimal::try_new(d)?;
    half.mult_int(&h, 2 * desc.lo + 1);
    inc.divide(&half, &two)?;

    let mut k = desc.lo;
    while k < desc.hi {
        // Trapezoid term for subinterval i, using i*h (`left`) and (i+1)*h.
        right.add(&left, &h);
        sum.add(&left, &right);
        avg.divide_int(&sum, 2)?;
        sq.mult(&avg, &avg);
        denom.add_int(&sq, 1);
        term.divide(&h, &denom)?;
        trap_next.add(&trap, &term);
        std::mem::swap(&mut trap, &mut trap_next);

        // k becomes i + 1 here, matching the accumulation order the
        // midpoint term below relies on.
        k += 1;

        // Midpoint term for subinterval i, using the carried `inc`.
        sq.mult(&inc, &inc);
        denom.add_int(&sq, 1);
        term.divide(&h, &denom)?;
        mid_next.add(&mid, &term);
        std::mem::swap(&mut mid, &mut mid_next);

        std::mem::swap(&mut left, &mut right);
        inc_next.add(&inc, &h);
        std::mem::swap(&mut inc, &mut inc_next);
    }

    trace!(thread_id = desc.thread_id, lo = desc.lo, hi = desc.hi, "worker completed");
    Ok(PartialSums { trap, mid })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_subinterval_runs_both_rules() {
        let desc = WorkerDescriptor { thread_id: 0, lo: 0, hi: 1, total_iterations: 1, max_digits: 25 };
        let out = run(&desc).unwrap();
        assert!(!out.trap.is_zero());
        assert!(!out.mid.is_zero());
    }

    #[test]
    fn empty_range_publishes_zero() {
        let desc = WorkerDescriptor { thread_id: 0, lo: 5, hi: 5, total_iterations: 10, max_digits: 25 };
        let out = run(&desc).unwrap();
        assert!(out.trap.is_zero());
        assert!(out.mid.is_zero());
    }
}
