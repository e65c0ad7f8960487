//! Precision-adequacy controller.
//!
//! Each attempt runs partition → parallel split → merge → √10005 →
//! assembly → verification. A convergence shortfall or a failed attempt
//! grows the term count (`⌊n·1.2⌋ + 5`) and retries, up to
//! `Options::max_attempts`. Only a verified result leaves this module.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::assembler::{assemble, sqrt_10005, Verification};
use crate::calculator::{Calculator, PiError};
use crate::constants::MAX_DIGITS;
use crate::executor::SplitExecutor;
use crate::observer::ProgressObserver;
use crate::options::Options;
use crate::partition::partition;
use crate::precision::{convergence_digits, grow_terms, initial_term_estimate, Precision};
use crate::progress::{Phase, ProgressUpdate, TaskId};
use crate::reducer::reduce;
use crate::result::{PiResult, Timings};

/// Units reported by the assembly task: quotient, verification, formatting.
const ASSEMBLE_STEPS: u64 = 3;

/// Chudnovsky binary-splitting calculator.
///
/// # Example
/// ```
/// use picalc_core::calculator::Calculator;
/// use picalc_core::controller::ChudnovskyCalculator;
/// use picalc_core::observers::NoOpObserver;
/// use picalc_core::options::Options;
///
/// let calc = ChudnovskyCalculator::new();
/// let result = calc.calculate(&NoOpObserver::new(), 10, &Options::default()).unwrap();
/// assert_eq!(result.digits, "3.1415926535");
/// ```
pub struct ChudnovskyCalculator;

impl ChudnovskyCalculator {
    /// Create a new calculator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for ChudnovskyCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator for ChudnovskyCalculator {
    fn calculate(
        &self,
        observer: &dyn ProgressObserver,
        digits: u64,
        opts: &Options,
    ) -> Result<PiResult, PiError> {
        compute_pi_with(digits, opts, observer)
    }

    fn name(&self) -> &str {
        "Chudnovsky"
    }
}

/// Reject digit counts outside `1..=MAX_DIGITS`.
pub fn validate_digits(digits: u64) -> Result<(), PiError> {
    if digits == 0 {
        return Err(PiError::InvalidInput(
            "digit count must be positive".into(),
        ));
    }
    if digits > MAX_DIGITS {
        return Err(PiError::InvalidInput(format!(
            "digit count {digits} exceeds the maximum of {MAX_DIGITS}"
        )));
    }
    Ok(())
}

/// Compute π to exactly `digits` fractional digits.
pub fn compute_pi_with(
    digits: u64,
    opts: &Options,
    observer: &dyn ProgressObserver,
) -> Result<PiResult, PiError> {
    validate_digits(digits)?;
    let opts = opts.clone().normalize();
    let executor = SplitExecutor::new(opts.workers)?;
    run_attempts(digits, &opts, |terms, attempt| {
        run_attempt(&executor, digits, terms, attempt, &opts, observer)
    })
}

/// Attempt loop: grows the term count after every shortfall or failed
/// attempt until one verifies or `max_attempts` is reached.
fn run_attempts(
    digits: u64,
    opts: &Options,
    mut attempt_fn: impl FnMut(u64, u32) -> Result<Attempt, PiError>,
) -> Result<PiResult, PiError> {
    let mut terms = opts
        .initial_terms
        .unwrap_or_else(|| initial_term_estimate(digits));

    for attempt in 1..=opts.max_attempts {
        info!(attempt, digits, terms, workers = opts.workers, "Starting attempt");
        match attempt_fn(terms, attempt) {
            Ok(Attempt::Accepted(result)) => {
                info!(attempt, terms, "Digits verified");
                return Ok(result);
            }
            Ok(Attempt::Shortfall(v)) => {
                warn!(
                    attempt,
                    terms,
                    reliable = v.reliable_digits,
                    significant = v.significant_digits,
                    requested = digits,
                    "Convergence shortfall, growing term count"
                );
            }
            Err(err @ (PiError::Worker(_) | PiError::Calculation(_))) => {
                warn!(attempt, terms, error = %err, "Attempt failed, retrying");
            }
            Err(err) => return Err(err),
        }
        terms = grow_terms(terms);
    }

    Err(PiError::AttemptsExhausted {
        digits,
        attempts: opts.max_attempts,
    })
}

enum Attempt {
    Accepted(PiResult),
    Shortfall(Verification),
}

fn run_attempt(
    executor: &SplitExecutor,
    digits: u64,
    terms: u64,
    attempt: u32,
    opts: &Options,
    observer: &dyn ProgressObserver,
) -> Result<Attempt, PiError> {
    let precision = Precision::for_attempt(digits, attempt);
    let chunks = partition(
        1,
        terms + 1,
        opts.workers,
        opts.oversubscription,
        opts.memory_budget,
    );
    debug!(
        attempt,
        chunks = chunks.len(),
        precision_bits = precision.bits(),
        "Partitioned term range"
    );

    let start = Instant::now();
    let results = executor.split_chunks(&chunks, observer, attempt)?;
    let split = start.elapsed();

    let start = Instant::now();
    let merged = executor.install(|| reduce(results, observer, attempt))?;
    let merge = start.elapsed();

    let sqrt_task = TaskId::new(attempt, Phase::Sqrt);
    observer.on_progress(&ProgressUpdate::Started {
        task: sqrt_task,
        total: 1,
    });
    let start = Instant::now();
    let sqrt = sqrt_10005(precision);
    let sqrt_time = start.elapsed();
    observer.advance(sqrt_task, 1);
    observer.on_progress(&ProgressUpdate::Finished { task: sqrt_task });

    let assemble_task = TaskId::new(attempt, Phase::Assemble);
    observer.on_progress(&ProgressUpdate::Started {
        task: assemble_task,
        total: ASSEMBLE_STEPS,
    });
    let start = Instant::now();
    let candidate = assemble(&merged, &sqrt, precision)?;
    observer.advance(assemble_task, 1);

    let verification = candidate.verify(digits, convergence_digits(&merged, terms));
    observer.advance(assemble_task, 1);

    let text = verification
        .stable
        .then(|| candidate.to_decimal_string(digits));
    observer.advance(assemble_task, 1);
    let assemble_time = start.elapsed();
    observer.on_progress(&ProgressUpdate::Finished {
        task: assemble_task,
    });

    let timings = Timings {
        split,
        merge,
        sqrt: sqrt_time,
        assemble: assemble_time,
    };
    debug!(attempt, ?timings, "Attempt timings");

    Ok(match text {
        Some(digits_text) => Attempt::Accepted(PiResult {
            digits: digits_text,
            requested_digits: digits,
            terms,
            attempts: attempt,
            chunks: chunks.len(),
            timings,
        }),
        None => Attempt::Shortfall(verification),
    })
}
