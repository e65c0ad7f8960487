//! # picalc-core
//!
//! Core library for the PiCalc-rs calculator.
//! Computes π with the Chudnovsky series, evaluated by binary splitting
//! over chunks split in parallel and merged pairwise, under a
//! verify-and-grow precision controller.

pub mod assembler;
pub mod calculator;
pub mod constants;
pub mod controller;
pub mod executor;
pub mod memory_budget;
pub mod observer;
pub mod observers;
pub mod options;
pub mod partition;
pub mod precision;
pub mod progress;
pub mod reducer;
pub mod result;
pub mod split;

// Re-exports
pub use calculator::{Calculator, PiError};
pub use constants::{exit_codes, MAX_DIGITS};
pub use controller::{compute_pi_with, ChudnovskyCalculator};
pub use observer::{ProgressObserver, ProgressSubject};
pub use options::Options;
pub use progress::{Phase, ProgressUpdate, TaskId};
pub use result::{PiResult, Timings};
pub use split::{split, Pqr};

/// Compute π to exactly `digits` fractional digits with default options.
///
/// For progress reporting or tuning, use [`compute_pi_with`] or the
/// [`Calculator`] trait.
///
/// # Example
/// ```
/// let pi = picalc_core::compute_pi(5).unwrap();
/// assert_eq!(pi.digits, "3.14159");
/// assert!(picalc_core::compute_pi(0).is_err());
/// ```
pub fn compute_pi(digits: u64) -> Result<PiResult, PiError> {
    compute_pi_with(digits, &Options::default(), &observers::NoOpObserver::new())
}
