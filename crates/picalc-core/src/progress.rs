//! Progress tracking types.
//!
//! Every attempt runs four tasks in order: split, merge, square root and
//! assembly. A task announces its total up front with `Started`, reports
//! units of work with `Advanced`, and closes with `Finished`.

use std::fmt;

/// Phase of one controller attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// One unit per chunk split by the executor.
    Split,
    /// One unit per pairwise combine performed by the reducer.
    Merge,
    /// Square root of 10005 at working precision (single unit).
    Sqrt,
    /// Final quotient assembly.
    Assemble,
}

impl Phase {
    /// Human-readable label of the phase.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Split => "Splitting terms",
            Self::Merge => "Merging terms",
            Self::Sqrt => "Computing √10005",
            Self::Assemble => "Assembling π",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies one progress task: a phase within a given attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    /// 1-based controller attempt.
    pub attempt: u32,
    /// Phase within the attempt.
    pub phase: Phase,
}

impl TaskId {
    /// Create a task id.
    #[must_use]
    pub fn new(attempt: u32, phase: Phase) -> Self {
        Self { attempt, phase }
    }
}

/// Progress update sent from the controller to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressUpdate {
    /// A task begins; `total` units of work are expected.
    Started {
        /// Task that started.
        task: TaskId,
        /// Expected number of units.
        total: u64,
    },
    /// `delta` units of work completed.
    Advanced {
        /// Task that advanced.
        task: TaskId,
        /// Completed units.
        delta: u64,
    },
    /// A task completed all its units.
    Finished {
        /// Task that finished.
        task: TaskId,
    },
}

impl ProgressUpdate {
    /// Task this update refers to.
    #[must_use]
    pub fn task(&self) -> TaskId {
        match *self {
            Self::Started { task, .. } | Self::Advanced { task, .. } | Self::Finished { task } => {
                task
            }
        }
    }
}
