//! Calculator trait and the library error type.
//!
//! `Calculator` is the public trait consumed by orchestration.
//! `ChudnovskyCalculator` (in `controller`) is the only implementation.

use crate::observer::ProgressObserver;
use crate::options::Options;
use crate::result::PiResult;

/// Error type for π calculations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PiError {
    /// The requested digit count was rejected before computing.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A worker failed while splitting a chunk.
    #[error("worker failure: {0}")]
    Worker(String),

    /// The controller ran out of attempts before the digits converged.
    #[error("failed to compute {digits} digits of pi after {attempts} attempts")]
    AttemptsExhausted {
        /// Requested digit count.
        digits: u64,
        /// Attempts performed.
        attempts: u32,
    },

    /// A calculation error occurred.
    #[error("calculation error: {0}")]
    Calculation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Public trait for π calculators, consumed by orchestration.
pub trait Calculator: Send + Sync {
    /// Calculate π to exactly `digits` fractional digits.
    fn calculate(
        &self,
        observer: &dyn ProgressObserver,
        digits: u64,
        opts: &Options,
    ) -> Result<PiResult, PiError>;

    /// Get the name of this calculator.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pi_error_display() {
        let err = PiError::InvalidInput("digits must be positive".into());
        assert_eq!(err.to_string(), "invalid input: digits must be positive");

        let err = PiError::AttemptsExhausted {
            digits: 100,
            attempts: 50,
        };
        assert_eq!(
            err.to_string(),
            "failed to compute 100 digits of pi after 50 attempts"
        );
    }

    #[test]
    fn worker_error_display() {
        let err = PiError::Worker("chunk [1, 5) panicked".into());
        assert!(err.to_string().starts_with("worker failure"));
    }
}
