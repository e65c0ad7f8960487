//! Parallel split executor.
//!
//! Owns a bounded rayon pool and runs one `split` per chunk on it. The
//! returned triples follow chunk order regardless of completion order.

use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::calculator::PiError;
use crate::observer::ProgressObserver;
use crate::partition::Chunk;
use crate::progress::{Phase, ProgressUpdate, TaskId};
use crate::split::{split, Pqr};

/// Runs chunk splits on a dedicated worker pool.
pub struct SplitExecutor {
    pool: ThreadPool,
}

impl SplitExecutor {
    /// Build an executor with `workers` threads.
    pub fn new(workers: usize) -> Result<Self, PiError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("picalc-worker-{i}"))
            .build()
            .map_err(|e| PiError::Worker(format!("failed to build worker pool: {e}")))?;
        Ok(Self { pool })
    }

    /// Number of worker threads.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `op` inside the worker pool, so nested rayon calls use it.
    pub fn install<R: Send>(&self, op: impl FnOnce() -> R + Send) -> R {
        self.pool.install(op)
    }

    /// Split every chunk in parallel and return the triples in chunk order.
    ///
    /// Announces `chunks.len()` split units and advances one per finished
    /// chunk. Blocks until every chunk completes; if any chunk panics the
    /// whole call fails with [`PiError::Worker`].
    pub fn split_chunks(
        &self,
        chunks: &[Chunk],
        observer: &dyn ProgressObserver,
        attempt: u32,
    ) -> Result<Vec<Pqr>, PiError> {
        let task = TaskId::new(attempt, Phase::Split);
        observer.on_progress(&ProgressUpdate::Started {
            task,
            total: chunks.len() as u64,
        });

        let results = self.pool.install(|| {
            chunks
                .par_iter()
                .map(|chunk| {
                    let pqr = split_chunk(*chunk)?;
                    observer.advance(task, 1);
                    Ok(pqr)
                })
                .collect::<Result<Vec<_>, PiError>>()
        })?;

        observer.on_progress(&ProgressUpdate::Finished { task });
        debug!(attempt, chunks = chunks.len(), "Split phase complete");
        Ok(results)
    }
}

/// Split one chunk, converting a panic into a worker error.
fn split_chunk(chunk: Chunk) -> Result<Pqr, PiError> {
    if chunk.is_empty() {
        return Err(PiError::Worker(format!(
            "empty chunk [{}, {})",
            chunk.start, chunk.end
        )));
    }
    panic::catch_unwind(AssertUnwindSafe(|| split(chunk.start, chunk.end))).map_err(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        PiError::Worker(format!(
            "chunk [{}, {}) failed: {reason}",
            chunk.start, chunk.end
        ))
    })
}
