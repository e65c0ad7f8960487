//! Error handling and exit codes.

use picalc_core::calculator::PiError;
use picalc_core::constants::exit_codes;

/// Map a calculation error to its exit code.
pub fn handle_error(err: &PiError) -> i32 {
    match err {
        PiError::InvalidInput(_) => exit_codes::ERROR_INVALID_INPUT,
        PiError::AttemptsExhausted { .. } => exit_codes::ERROR_CONVERGENCE,
        PiError::Config(_) => exit_codes::ERROR_CONFIG,
        PiError::Worker(_) | PiError::Calculation(_) => exit_codes::ERROR_GENERIC,
    }
}

/// Exit code for any application error.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<PiError>()
        .map_or(exit_codes::ERROR_GENERIC, handle_error)
}
