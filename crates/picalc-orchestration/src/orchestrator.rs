//! Core orchestration: execution with timing, and result analysis.

use std::time::Instant;

use tracing::{info, warn};

use picalc_core::calculator::Calculator;
use picalc_core::constants::LARGE_RUN_DIGITS;
use picalc_core::memory_budget::MemoryEstimate;
use picalc_core::observer::ProgressObserver;
use picalc_core::options::Options;
use picalc_core::result::PiResult;

use crate::interfaces::{CalculationResult, ResultWarning};

/// Expected leading characters of any result with at least five digits.
const PI_PREFIX: &str = "3.14159";

/// Share of the digits that may be trailing zeros before warning.
const TRAILING_ZERO_RATIO: f64 = 0.1;

/// Execute one calculation and capture its end-to-end duration.
pub fn execute_calculation(
    calculator: &dyn Calculator,
    digits: u64,
    opts: &Options,
    observer: &dyn ProgressObserver,
) -> CalculationResult {
    let opts = opts.clone().normalize();
    let start = Instant::now();
    let outcome = calculator.calculate(observer, digits, &opts);
    let duration = start.elapsed();

    match &outcome {
        Ok(result) => info!(
            algorithm = calculator.name(),
            digits,
            attempts = result.attempts,
            terms = result.terms,
            elapsed = ?duration,
            "Calculation complete"
        ),
        Err(e) => warn!(algorithm = calculator.name(), digits, error = %e, "Calculation failed"),
    }

    CalculationResult {
        algorithm: calculator.name().to_string(),
        requested_digits: digits,
        workers: opts.workers,
        outcome,
        duration,
    }
}

/// Warnings worth showing before a run starts.
#[must_use]
pub fn pre_run_warnings(digits: u64) -> Vec<ResultWarning> {
    if digits > LARGE_RUN_DIGITS {
        vec![ResultWarning::LargeMemory {
            estimated_gib: MemoryEstimate::estimate(digits).total_gib(),
        }]
    } else {
        Vec::new()
    }
}

/// Sanity checks on a verified result: trailing zeros, prefix, length.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn analyze_result(result: &PiResult) -> Vec<ResultWarning> {
    let mut warnings = Vec::new();
    let fraction = result.fraction();

    let trailing_zeros = fraction.len() - fraction.trim_end_matches('0').len();
    if trailing_zeros as f64 > result.requested_digits as f64 * TRAILING_ZERO_RATIO {
        warnings.push(ResultWarning::TrailingZeros {
            count: trailing_zeros,
        });
    }

    let expected_prefix = &PI_PREFIX[..PI_PREFIX.len().min(result.digits.len())];
    if !result.digits.starts_with(expected_prefix) {
        warnings.push(ResultWarning::UnexpectedPrefix {
            prefix: result.digits.chars().take(10).collect(),
        });
    }

    if fraction.len() as u64 != result.requested_digits {
        warnings.push(ResultWarning::LengthMismatch {
            expected: result.requested_digits,
            actual: fraction.len(),
        });
    }

    warnings
}
