//! Golden file integration tests.
//!
//! Reads tests/testdata/pi_golden.json and verifies that every route to π
//! (default options, single worker, many small chunks, retries from a
//! poor initial estimate) yields the same truncated digits.

use serde::Deserialize;

use picalc_core::calculator::Calculator;
use picalc_core::controller::ChudnovskyCalculator;
use picalc_core::observers::{CountingObserver, NoOpObserver};
use picalc_core::options::Options;
use picalc_core::progress::{Phase, TaskId};
use picalc_core::{compute_pi, compute_pi_with};
use picalc_orchestration::orchestrator::{analyze_result, execute_calculation};

// ---------------------------------------------------------------------------
// Golden data structures
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct GoldenData {
    #[allow(dead_code)]
    description: String,
    values: Vec<GoldenEntry>,
}

#[derive(Deserialize)]
struct GoldenEntry {
    digits: u64,
    #[serde(default)]
    pi: Option<String>,
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    suffix: Option<String>,
}

impl GoldenEntry {
    fn check(&self, got: &str, route: &str) {
        let d = self.digits;
        assert_eq!(
            got.len() as u64,
            d + 2,
            "{route}: wrong length for {d} digits"
        );
        if let Some(expected) = &self.pi {
            assert_eq!(got, expected, "{route}: mismatch for {d} digits");
        }
        if let Some(prefix) = &self.prefix {
            assert!(got.starts_with(prefix.as_str()), "{route}: prefix mismatch for {d} digits");
        }
        if let Some(suffix) = &self.suffix {
            assert!(got.ends_with(suffix.as_str()), "{route}: suffix mismatch for {d} digits");
        }
    }
}

fn load_golden_data() -> GoldenData {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/testdata/pi_golden.json");
    let data = std::fs::read_to_string(path).expect("failed to read golden file");
    serde_json::from_str(&data).expect("failed to parse golden JSON")
}

fn compute_with(digits: u64, opts: &Options) -> String {
    compute_pi_with(digits, opts, &NoOpObserver::new())
        .unwrap()
        .digits
}

// ---------------------------------------------------------------------------
// Golden: every route agrees with the reference digits
// ---------------------------------------------------------------------------

#[test]
fn golden_default_options() {
    for entry in &load_golden_data().values {
        entry.check(&compute_pi(entry.digits).unwrap().digits, "default");
    }
}

#[test]
fn golden_single_worker() {
    let opts = Options {
        workers: 1,
        oversubscription: 1,
        ..Options::default()
    };
    for entry in &load_golden_data().values {
        entry.check(&compute_with(entry.digits, &opts), "single worker");
    }
}

#[test]
fn golden_many_small_chunks() {
    let opts = Options {
        workers: 8,
        oversubscription: 3,
        ..Options::default()
    };
    for entry in &load_golden_data().values {
        entry.check(&compute_with(entry.digits, &opts), "many chunks");
    }
}

#[test]
fn golden_after_retries() {
    let opts = Options {
        initial_terms: Some(1),
        ..Options::default()
    };
    for entry in &load_golden_data().values {
        entry.check(&compute_with(entry.digits, &opts), "retries");
    }
}

#[test]
fn golden_through_orchestration() {
    let calc = ChudnovskyCalculator::new();
    for entry in load_golden_data().values.iter().filter(|e| e.digits <= 100) {
        let result = execute_calculation(&calc, entry.digits, &Options::default(), &NoOpObserver::new());
        let pi = result.outcome.unwrap();
        entry.check(&pi.digits, "orchestration");
        assert!(analyze_result(&pi).is_empty(), "warnings for {} digits", entry.digits);
    }
}

// ---------------------------------------------------------------------------
// Progress accounting on a real run
// ---------------------------------------------------------------------------

#[test]
fn progress_reaches_announced_totals() {
    let calc = ChudnovskyCalculator::new();
    let observer = CountingObserver::new();
    let opts = Options {
        workers: 4,
        ..Options::default()
    };
    let result = calc.calculate(&observer, 1000, &opts).unwrap();

    for phase in [Phase::Split, Phase::Merge, Phase::Sqrt, Phase::Assemble] {
        let counts = observer
            .counts(TaskId::new(result.attempts, phase))
            .expect("task announced");
        assert_eq!(counts.done, counts.total, "{phase}");
        assert!(counts.finished, "{phase}");
    }

    let split = observer
        .counts(TaskId::new(result.attempts, Phase::Split))
        .unwrap();
    let merge = observer
        .counts(TaskId::new(result.attempts, Phase::Merge))
        .unwrap();
    assert_eq!(split.total, result.chunks as u64);
    assert_eq!(merge.total, result.chunks as u64 - 1);
}
