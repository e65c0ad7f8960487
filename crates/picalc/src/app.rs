//! Application entry point and dispatch.

use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use console::Term;
use tracing::debug;

use picalc_cli::output::{format_number, save_file_name, write_to_file};
use picalc_cli::presenter::CLIResultPresenter;
use picalc_cli::progress::IndicatifObserver;
use picalc_cli::ui;
use picalc_core::calculator::PiError;
use picalc_core::controller::{validate_digits, ChudnovskyCalculator};
use picalc_core::memory_budget::{available_memory, MemoryEstimate};
use picalc_core::observer::ProgressSubject;
use picalc_core::observers::LoggingObserver;
use picalc_core::result::PiResult;
use picalc_orchestration::interfaces::{CalculationResult, ResultPresenter, ResultWarning};
use picalc_orchestration::orchestrator::{analyze_result, execute_calculation, pre_run_warnings};

use crate::config::AppConfig;

/// Minimum interval between progress log lines in verbose mode.
const PROGRESS_LOG_INTERVAL_MS: u64 = 250;

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        picalc_cli::completion::generate_completion(&mut cmd, shell, &mut std::io::stdout());
        return Ok(());
    }

    let digits = resolve_digits(config)?;
    validate_digits(digits)?;

    let explicit_limit = config.memory_limit().map_err(PiError::Config)?;
    let estimate = MemoryEstimate::estimate(digits);
    if !estimate.fits_in(explicit_limit) {
        return Err(PiError::Config(format!(
            "estimated memory ({} MB) exceeds limit ({} MB)",
            estimate.total_bytes / (1024 * 1024),
            explicit_limit.unwrap_or(0) / (1024 * 1024)
        ))
        .into());
    }

    let opts = config.options(explicit_limit.or_else(available_memory));
    debug!(?opts, estimated_bytes = estimate.total_bytes, "Resolved options");

    let presenter = CLIResultPresenter::new(config.verbose, config.quiet);
    let report = !(config.quiet || config.json);
    if report {
        ui::print_header(&format!("π to {} digits", format_number(digits)));
        presenter.present_warnings(&pre_run_warnings(digits));
    }

    let subject = ProgressSubject::new();
    let bars = config.show_progress().then(|| Arc::new(IndicatifObserver::new()));
    if let Some(bars) = &bars {
        subject.register(bars.clone());
    }
    if config.verbose {
        subject.register(Arc::new(LoggingObserver::new(PROGRESS_LOG_INTERVAL_MS)));
    }

    let calculator = ChudnovskyCalculator::new();
    let result = execute_calculation(&calculator, digits, &opts, &subject);
    if let Some(bars) = &bars {
        bars.clear();
    }

    let pi = result.outcome.clone()?;
    let warnings = analyze_result(&pi);

    if config.json {
        println!("{}", json_summary(&result, &pi, &warnings)?);
    } else {
        presenter.present_result(&result, config.details);
        presenter.present_warnings(&warnings);
    }

    if let Some(path) = &config.output {
        save(Path::new(path), &pi.digits, report)?;
    }
    if config.save {
        save(&save_file_name(digits), &pi.digits, report)?;
    }

    Ok(())
}

/// Digit count from the arguments, or from an interactive prompt.
fn resolve_digits(config: &AppConfig) -> Result<u64> {
    if let Some(digits) = config.digits {
        return Ok(digits);
    }
    if !std::io::stdin().is_terminal() || !console::user_attended_stderr() {
        return Err(PiError::InvalidInput(
            "missing digit count: pass DIGITS or set PICALC_DIGITS".into(),
        )
        .into());
    }

    let term = Term::stderr();
    term.write_str("Number of digits to compute: ")?;
    let line = term.read_line()?;
    let line = line.trim();
    line.parse::<u64>()
        .map_err(|e| PiError::InvalidInput(format!("'{line}' is not a digit count: {e}")).into())
}

fn save(path: &Path, digits: &str, report: bool) -> Result<()> {
    write_to_file(path, digits).with_context(|| format!("writing {}", path.display()))?;
    if report {
        ui::print_success(&format!("Digits saved to {}", path.display()));
    }
    Ok(())
}

fn json_summary(
    result: &CalculationResult,
    pi: &PiResult,
    warnings: &[ResultWarning],
) -> Result<String> {
    let summary = serde_json::json!({
        "algorithm": result.algorithm,
        "workers": result.workers,
        "elapsed": result.duration.as_secs_f64(),
        "result": pi,
        "warnings": warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
    });
    Ok(serde_json::to_string_pretty(&summary)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> AppConfig {
        AppConfig::try_parse_from(std::iter::once("picalc").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn run_quiet() {
        run(&config(&["50", "-q"])).unwrap();
    }

    #[test]
    fn run_rejects_zero_digits() {
        let err = run(&config(&["0", "-q"])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PiError>(),
            Some(PiError::InvalidInput(_))
        ));
    }

    #[test]
    fn run_refuses_over_memory_limit() {
        let err = run(&config(&["100000", "-q", "--memory-limit", "1K"])).unwrap_err();
        assert!(matches!(err.downcast_ref::<PiError>(), Some(PiError::Config(_))));
    }

    #[test]
    fn run_reports_exhaustion() {
        let err = run(&config(&[
            "100",
            "-q",
            "--initial-terms",
            "1",
            "--max-attempts",
            "1",
        ]))
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PiError>(),
            Some(PiError::AttemptsExhausted { .. })
        ));
    }

    #[test]
    fn run_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pi.txt");
        let path_str = path.to_str().unwrap();
        run(&config(&["10", "-q", "-o", path_str])).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "3.1415926535\n");
    }

    #[test]
    fn json_summary_contains_digits() {
        let calc = ChudnovskyCalculator::new();
        let opts = config(&["10"]).options(None);
        let result = execute_calculation(
            &calc,
            10,
            &opts,
            &picalc_core::observers::NoOpObserver::new(),
        );
        let pi = result.outcome.clone().unwrap();
        let warnings = [ResultWarning::TrailingZeros { count: 2 }];
        let json: serde_json::Value =
            serde_json::from_str(&json_summary(&result, &pi, &warnings).unwrap()).unwrap();
        assert_eq!(json["result"]["digits"], "3.1415926535");
        assert_eq!(json["algorithm"], "Chudnovsky");
        assert!(json["result"]["timings"]["split"].is_number());
        assert_eq!(json["warnings"].as_array().map(Vec::len), Some(1));
    }
}
