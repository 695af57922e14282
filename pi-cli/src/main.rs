//! Entry point: parses CLI arguments, wires up logging, and delegates
//! to the [`quadrature`] driver to estimate π.

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use decimal::DecimalError;
use quadrature::{Config, QuadratureError};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// The 100-digit decimal expansion of π, with the leading `3.` removed.
///
/// Used only for the comparison line printed alongside the calculated
/// value; it never participates in a bignum operation.
const REFERENCE_PI_FRACTION: &str =
    "14159265358979323846264338327950288419716939937510\
     58209749445923078164062862089986280348253421170679";

/// Estimate π by parallel composite quadrature over an arbitrary-precision
/// decimal core.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Number of quadrature subintervals. Defaults to 20000 when absent
    /// or non-positive.
    iterations: Option<i64>,

    /// Number of worker threads. Defaults to 8 when absent or non-positive.
    workers: Option<i64>,

    /// Significant-digit budget for the decimal core. Defaults to 25 when
    /// absent or non-positive.
    digits: Option<i64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_raw(cli.iterations, cli.workers, cli.digits);
    info!(
        iterations = config.iterations,
        workers = config.workers,
        digits = config.digits,
        "starting quadrature"
    );

    let start = Instant::now();
    let estimate = match quadrature::run(config) {
        Ok(estimate) => estimate,
        Err(err) => return report_failure(&err),
    };
    let elapsed = start.elapsed();

    println!("The calculated value of pi is {}", estimate.value);
    let fraction_digits = (config.digits.saturating_sub(1)).min(REFERENCE_PI_FRACTION.len());
    println!(
        "The actual value of pi is     3.{}",
        &REFERENCE_PI_FRACTION[..fraction_digits]
    );
    println!(
        "The time taken to calculate this was {:.2} seconds",
        elapsed.as_secs_f64()
    );

    ExitCode::SUCCESS
}

/// Log the failure and pick an exit code that distinguishes why the run
/// never reached completion, rather than collapsing everything to one
/// generic non-zero status.
fn report_failure(err: &QuadratureError) -> ExitCode {
    error!(error = %err, "quadrature run failed");
    let code = match err {
        QuadratureError::LaunchFailure { .. } | QuadratureError::WorkerPanicked { .. } => 2,
        QuadratureError::Arithmetic(DecimalError::Allocation { .. }) => 3,
        QuadratureError::Arithmetic(DecimalError::DivisionByZero) => 4,
    };
    ExitCode::from(code)
}
