//! Orchestration interfaces.

use std::time::Duration;

use picalc_core::calculator::PiError;
use picalc_core::result::PiResult;

/// Trait for presenting results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present a finished calculation (success or failure).
    fn present_result(&self, result: &CalculationResult, details: bool);

    /// Present warnings raised before or after the calculation.
    fn present_warnings(&self, warnings: &[ResultWarning]);

    /// Present an error.
    fn present_error(&self, error: &str);
}

/// Result of a single calculation.
#[derive(Debug, Clone)]
pub struct CalculationResult {
    /// Calculator name.
    pub algorithm: String,
    /// Requested fractional digits.
    pub requested_digits: u64,
    /// Worker threads used.
    pub workers: usize,
    /// The computed digits or a structured error.
    pub outcome: Result<PiResult, PiError>,
    /// End-to-end duration, including failed attempts.
    pub duration: Duration,
}

/// Non-fatal findings about a run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResultWarning {
    /// The run is expected to need a lot of memory.
    #[error("this calculation may require approximately {estimated_gib:.1} GB of memory")]
    LargeMemory {
        /// Estimated footprint in GiB.
        estimated_gib: f64,
    },

    /// The fractional part ends in an unusually long run of zeros.
    #[error("result has {count} trailing zeros, which may indicate precision issues")]
    TrailingZeros {
        /// Length of the trailing zero run.
        count: usize,
    },

    /// The result does not start like π.
    #[error("result may be incorrect: expected 3.14159..., got {prefix}...")]
    UnexpectedPrefix {
        /// Leading characters of the result.
        prefix: String,
    },

    /// The fractional part has the wrong length.
    #[error("output length incorrect: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Requested fractional digits.
        expected: u64,
        /// Fractional digits produced.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_messages() {
        let w = ResultWarning::TrailingZeros { count: 12 };
        assert_eq!(
            w.to_string(),
            "result has 12 trailing zeros, which may indicate precision issues"
        );

        let w = ResultWarning::LargeMemory { estimated_gib: 1.25 };
        assert!(w.to_string().contains("1.2 GB") || w.to_string().contains("1.3 GB"));
    }

    #[test]
    fn calculation_result_holds_error() {
        let result = CalculationResult {
            algorithm: "Chudnovsky".into(),
            requested_digits: 0,
            workers: 1,
            outcome: Err(PiError::InvalidInput("zero".into())),
            duration: Duration::from_millis(1),
        };
        assert!(result.outcome.is_err());
    }
}
