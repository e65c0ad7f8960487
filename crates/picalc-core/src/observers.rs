//! Concrete observer implementations.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::Sender;
use parking_lot::Mutex;
use tracing::{event, info, Level};

use crate::observer::ProgressObserver;
use crate::progress::{ProgressUpdate, TaskId};

/// Observer that sends updates through a channel (non-blocking).
///
/// Updates are dropped when the channel is full.
pub struct ChannelObserver {
    sender: Sender<ProgressUpdate>,
}

impl ChannelObserver {
    /// Create a new channel observer.
    #[must_use]
    pub fn new(sender: Sender<ProgressUpdate>) -> Self {
        Self { sender }
    }
}

impl ProgressObserver for ChannelObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        let _ = self.sender.try_send(*update);
    }
}

/// Level of the throttled progress lines emitted by [`LoggingObserver`].
pub const PROGRESS_LOG_LEVEL: Level = Level::INFO;

/// Observer that logs task boundaries, and advances with temporal throttling.
pub struct LoggingObserver {
    min_interval_ms: u64,
    last_time: AtomicU64,
}

impl LoggingObserver {
    /// Create a new logging observer with the given minimum interval.
    #[must_use]
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms,
            last_time: AtomicU64::new(0),
        }
    }
}

impl ProgressObserver for LoggingObserver {
    #[allow(clippy::cast_possible_truncation)]
    fn on_progress(&self, update: &ProgressUpdate) {
        match *update {
            ProgressUpdate::Started { task, total } => {
                info!(attempt = task.attempt, phase = %task.phase, total, "Task started");
            }
            ProgressUpdate::Finished { task } => {
                info!(attempt = task.attempt, phase = %task.phase, "Task finished");
            }
            ProgressUpdate::Advanced { task, delta } => {
                let now = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_millis() as u64;
                let last = self.last_time.load(Ordering::Relaxed);
                if now.saturating_sub(last) < self.min_interval_ms {
                    return;
                }
                self.last_time.store(now, Ordering::Relaxed);
                event!(
                    PROGRESS_LOG_LEVEL,
                    attempt = task.attempt,
                    phase = %task.phase,
                    delta,
                    "Progress update"
                );
            }
        }
    }
}

/// Null object pattern: does nothing with progress updates.
pub struct NoOpObserver;

impl NoOpObserver {
    /// Create a new no-op observer that discards all progress updates.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for NoOpObserver {
    fn on_progress(&self, _update: &ProgressUpdate) {}
}

/// Per-task progress counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    /// Total announced by `Started`.
    pub total: u64,
    /// Sum of all `Advanced` deltas.
    pub done: u64,
    /// Whether `Finished` was received.
    pub finished: bool,
}

/// Observer that tallies announced totals and completed units per task.
#[derive(Default)]
pub struct CountingObserver {
    tasks: Mutex<HashMap<TaskId, TaskCounts>>,
}

impl CountingObserver {
    /// Create an empty counting observer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters recorded for `task`, if any update referenced it.
    #[must_use]
    pub fn counts(&self, task: TaskId) -> Option<TaskCounts> {
        self.tasks.lock().get(&task).copied()
    }

    /// Number of distinct tasks seen.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.lock().len()
    }
}

impl ProgressObserver for CountingObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        let mut tasks = self.tasks.lock();
        let entry = tasks.entry(update.task()).or_default();
        match *update {
            ProgressUpdate::Started { total, .. } => entry.total = total,
            ProgressUpdate::Advanced { delta, .. } => entry.done += delta,
            ProgressUpdate::Finished { .. } => entry.finished = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Phase;

    fn split_task() -> TaskId {
        TaskId::new(1, Phase::Split)
    }

    #[test]
    fn noop_observer_does_nothing() {
        let observer = NoOpObserver::default();
        observer.advance(split_task(), 1);
    }

    #[test]
    fn channel_observer_sends() {
        let (tx, rx) = crossbeam_channel::bounded(10);
        let observer = ChannelObserver::new(tx);

        observer.on_progress(&ProgressUpdate::Started {
            task: split_task(),
            total: 4,
        });
        observer.advance(split_task(), 1);

        assert_eq!(
            rx.try_recv().unwrap(),
            ProgressUpdate::Started {
                task: split_task(),
                total: 4
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            ProgressUpdate::Advanced {
                task: split_task(),
                delta: 1
            }
        );
    }

    #[test]
    fn channel_observer_full_channel_does_not_panic() {
        let (tx, _rx) = crossbeam_channel::bounded(1);
        let observer = ChannelObserver::new(tx);
        observer.advance(split_task(), 1);
        observer.advance(split_task(), 1);
    }

    #[test]
    fn logging_observer_throttles_without_panicking() {
        let observer = LoggingObserver::new(60_000);
        observer.advance(split_task(), 1);
        observer.advance(split_task(), 1);
        observer.on_progress(&ProgressUpdate::Finished { task: split_task() });
    }

    #[test]
    fn counting_observer_tallies_per_task() {
        let observer = CountingObserver::new();
        let merge = TaskId::new(1, Phase::Merge);

        observer.on_progress(&ProgressUpdate::Started {
            task: split_task(),
            total: 3,
        });
        for _ in 0..3 {
            observer.advance(split_task(), 1);
        }
        observer.on_progress(&ProgressUpdate::Finished { task: split_task() });
        observer.advance(merge, 2);

        assert_eq!(
            observer.counts(split_task()),
            Some(TaskCounts {
                total: 3,
                done: 3,
                finished: true
            })
        );
        assert_eq!(observer.counts(merge).map(|c| c.done), Some(2));
        assert_eq!(observer.task_count(), 2);
        assert!(observer.counts(TaskId::new(2, Phase::Split)).is_none());
    }
}
