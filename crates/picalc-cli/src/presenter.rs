//! CLI result presenter.

use picalc_orchestration::interfaces::{CalculationResult, ResultPresenter, ResultWarning};

use crate::output::{format_digits, format_duration, format_number};
use crate::ui;

/// CLI result presenter.
pub struct CLIResultPresenter {
    verbose: bool,
    quiet: bool,
}

impl CLIResultPresenter {
    /// Create a presenter; `quiet` prints only the digits.
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }
}

impl ResultPresenter for CLIResultPresenter {
    fn present_result(&self, result: &CalculationResult, details: bool) {
        let pi = match &result.outcome {
            Ok(pi) => pi,
            Err(e) => {
                self.present_error(&e.to_string());
                return;
            }
        };

        if self.quiet {
            println!("{}", pi.digits);
            return;
        }

        println!("Algorithm: {}", result.algorithm);
        println!("Digits: {}", format_number(result.requested_digits));
        println!("Cores: {}", result.workers);
        println!("Duration: {}", format_duration(result.duration));

        if details {
            println!("Terms: {}", format_number(pi.terms));
            println!("Attempts: {}", pi.attempts);
            println!("Chunks: {}", pi.chunks);
            println!("Timing breakdown:");
            println!("  Split:    {}", format_duration(pi.timings.split));
            println!("  Merge:    {}", format_duration(pi.timings.merge));
            println!("  Sqrt:     {}", format_duration(pi.timings.sqrt));
            println!("  Assemble: {}", format_duration(pi.timings.assemble));
        }

        println!("π = {}", format_digits(&pi.digits, self.verbose));
    }

    fn present_warnings(&self, warnings: &[ResultWarning]) {
        if self.quiet {
            return;
        }
        for warning in warnings {
            ui::print_warning(&warning.to_string());
        }
    }

    fn present_error(&self, error: &str) {
        ui::print_error(error);
    }
}
