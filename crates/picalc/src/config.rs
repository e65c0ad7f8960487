//! Application configuration from CLI flags and environment.

use clap::Parser;
use tracing::Level;

use picalc_core::constants::{DEFAULT_MAX_ATTEMPTS, DEFAULT_OVERSUBSCRIPTION};
use picalc_core::memory_budget::parse_memory_limit;
use picalc_core::options::Options;

/// PiCalc-rs: parallel Chudnovsky π calculator.
#[derive(Parser, Debug)]
#[command(name = "picalc", version, about)]
pub struct AppConfig {
    /// Number of fractional digits to compute (prompted for when omitted).
    #[arg(env = "PICALC_DIGITS")]
    pub digits: Option<u64>,

    /// Write the digits to this file.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the digits to pi_<digits>.txt in the current directory.
    #[arg(long)]
    pub save: bool,

    /// Quiet mode (only output the digits).
    #[arg(short, long)]
    pub quiet: bool,

    /// Print every digit and enable info logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Show terms, attempts, chunks and the timing breakdown.
    #[arg(short, long)]
    pub details: bool,

    /// Print a JSON summary instead of the text report.
    #[arg(long, conflicts_with = "quiet")]
    pub json: bool,

    /// Worker threads (0 = all cores).
    #[arg(long, default_value_t = 0)]
    pub workers: usize,

    /// Chunks scheduled per worker.
    #[arg(long, default_value_t = DEFAULT_OVERSUBSCRIPTION)]
    pub oversubscription: usize,

    /// Memory limit (e.g., "8G", "512M"); empty uses available memory.
    #[arg(long, default_value = "")]
    pub memory_limit: String,

    /// Attempts before giving up on convergence.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// Initial series term count (0 = derived from the digit count).
    #[arg(long, default_value_t = 0)]
    pub initial_terms: u64,

    /// Disable progress bars.
    #[arg(long)]
    pub no_progress: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Explicit memory limit from `--memory-limit`, if any.
    ///
    /// # Errors
    ///
    /// Returns the parse error message for malformed limits.
    pub fn memory_limit(&self) -> Result<Option<usize>, String> {
        parse_memory_limit(&self.memory_limit)
    }

    /// Calculation options for the given memory budget.
    #[must_use]
    pub fn options(&self, memory_budget: Option<usize>) -> Options {
        Options {
            workers: self.workers,
            oversubscription: self.oversubscription,
            memory_budget,
            max_attempts: self.max_attempts,
            initial_terms: (self.initial_terms > 0).then_some(self.initial_terms),
        }
        .normalize()
    }

    /// Default log level; `-v` raises it so progress lines are shown.
    #[must_use]
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::INFO
        } else {
            Level::WARN
        }
    }

    /// Whether progress bars should be drawn.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        !(self.no_progress || self.quiet || self.json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppConfig {
        AppConfig::try_parse_from(std::iter::once("picalc").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&["100"]);
        assert_eq!(config.digits, Some(100));
        assert_eq!(config.oversubscription, DEFAULT_OVERSUBSCRIPTION);
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.memory_limit().unwrap(), None);
        assert!(config.show_progress());

        let opts = config.options(None);
        assert!(opts.workers >= 1);
        assert_eq!(opts.initial_terms, None);
    }

    #[test]
    fn tuning_flags() {
        let config = parse(&[
            "50",
            "--workers",
            "3",
            "--oversubscription",
            "4",
            "--max-attempts",
            "7",
            "--initial-terms",
            "2",
            "--memory-limit",
            "512M",
        ]);
        assert_eq!(config.memory_limit().unwrap(), Some(512 * 1024 * 1024));
        let opts = config.options(Some(1024));
        assert_eq!(opts.workers, 3);
        assert_eq!(opts.oversubscription, 4);
        assert_eq!(opts.max_attempts, 7);
        assert_eq!(opts.initial_terms, Some(2));
        assert_eq!(opts.memory_budget, Some(1024));
    }

    #[test]
    fn output_modes_disable_progress() {
        assert!(!parse(&["10", "-q"]).show_progress());
        assert!(!parse(&["10", "--json"]).show_progress());
        assert!(!parse(&["10", "--no-progress"]).show_progress());
    }

    #[test]
    fn verbose_shows_progress_logs() {
        use picalc_core::observers::PROGRESS_LOG_LEVEL;

        assert!(parse(&["10", "-v"]).log_level() >= PROGRESS_LOG_LEVEL);
        assert!(parse(&["10"]).log_level() < PROGRESS_LOG_LEVEL);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(AppConfig::try_parse_from(["picalc", "ten"]).is_err());
        assert!(AppConfig::try_parse_from(["picalc", "10", "--max-attempts", "0"]).is_err());
        assert!(AppConfig::try_parse_from(["picalc", "10", "--json", "-q"]).is_err());
    }

    #[test]
    fn malformed_memory_limit() {
        assert!(parse(&["10", "--memory-limit", "lots"]).memory_limit().is_err());
    }
}
