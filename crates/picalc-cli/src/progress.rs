//! Terminal progress bars driven by progress updates.

use std::collections::HashMap;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use parking_lot::Mutex;

use picalc_core::observer::ProgressObserver;
use picalc_core::progress::{ProgressUpdate, TaskId};

const BAR_TEMPLATE: &str =
    "{prefix:>10.bold} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}";

/// Observer rendering one bar per task (attempt and phase).
///
/// Bars of superseded attempts stay on screen so retries are visible.
pub struct IndicatifObserver {
    multi: MultiProgress,
    bars: Mutex<HashMap<TaskId, ProgressBar>>,
    style: ProgressStyle,
}

impl IndicatifObserver {
    /// Render bars to stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// Render bars to the given target (hidden in tests).
    #[must_use]
    pub fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        Self {
            multi: MultiProgress::with_draw_target(target),
            bars: Mutex::new(HashMap::new()),
            style,
        }
    }

    /// Number of bars created so far.
    #[must_use]
    pub fn bar_count(&self) -> usize {
        self.bars.lock().len()
    }

    /// Position of the bar for `task`, if it exists.
    #[must_use]
    pub fn position(&self, task: TaskId) -> Option<u64> {
        self.bars.lock().get(&task).map(ProgressBar::position)
    }

    /// Clear all bars from the terminal.
    pub fn clear(&self) {
        let _ = self.multi.clear();
    }

    fn start(&self, task: TaskId, total: u64) {
        let bar = self.multi.add(ProgressBar::new(total));
        bar.set_style(self.style.clone());
        bar.set_prefix(format!("attempt {}", task.attempt));
        bar.set_message(task.phase.label());
        if total > 1 {
            bar.enable_steady_tick(Duration::from_millis(100));
        }
        if let Some(old) = self.bars.lock().insert(task, bar) {
            old.finish_and_clear();
        }
    }
}

impl Default for IndicatifObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for IndicatifObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        match *update {
            ProgressUpdate::Started { task, total } => self.start(task, total),
            ProgressUpdate::Advanced { task, delta } => {
                if let Some(bar) = self.bars.lock().get(&task) {
                    bar.inc(delta);
                }
            }
            ProgressUpdate::Finished { task } => {
                if let Some(bar) = self.bars.lock().get(&task) {
                    bar.finish();
                }
            }
        }
    }
}
