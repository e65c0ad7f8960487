//! # picalc-orchestration
//!
//! Calculation execution, timing capture, and result analysis.

pub mod interfaces;
pub mod orchestrator;

pub use interfaces::{CalculationResult, ResultPresenter, ResultWarning};
pub use orchestrator::{analyze_result, execute_calculation, pre_run_warnings};
