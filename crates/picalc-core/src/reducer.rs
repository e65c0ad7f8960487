//! Merge reducer: balanced pairwise combination of ordered chunk results.
//!
//! Each round pairs `(r[0], r[1]), (r[2], r[3]), …` and combines every pair
//! with [`Pqr::combine`]; an odd element out is carried to the next round
//! unchanged. Pairs of one round are independent and run on the current
//! rayon pool; rounds are strictly sequential.

use rayon::prelude::*;
use tracing::trace;

use crate::calculator::PiError;
use crate::observer::ProgressObserver;
use crate::progress::{Phase, ProgressUpdate, TaskId};
use crate::split::Pqr;

/// Number of pairwise combines needed to reduce `count` results to one.
#[must_use]
pub fn merge_count(count: usize) -> usize {
    count.saturating_sub(1)
}

/// Reduce ordered chunk triples to the single triple of the whole range.
///
/// Announces `results.len() - 1` merge units and advances one per combine.
pub fn reduce(
    results: Vec<Pqr>,
    observer: &dyn ProgressObserver,
    attempt: u32,
) -> Result<Pqr, PiError> {
    if results.is_empty() {
        return Err(PiError::Calculation("nothing to merge".into()));
    }

    let task = TaskId::new(attempt, Phase::Merge);
    observer.on_progress(&ProgressUpdate::Started {
        task,
        total: merge_count(results.len()) as u64,
    });

    let mut level = results;
    let mut round = 0u32;
    while level.len() > 1 {
        round += 1;
        trace!(attempt, round, width = level.len(), "Merge round");
        level = merge_round(level, observer, task);
    }

    observer.on_progress(&ProgressUpdate::Finished { task });
    level
        .pop()
        .ok_or_else(|| PiError::Calculation("merge produced no result".into()))
}

fn merge_round(level: Vec<Pqr>, observer: &dyn ProgressObserver, task: TaskId) -> Vec<Pqr> {
    let mut pairs = Vec::with_capacity(level.len().div_ceil(2));
    let mut items = level.into_iter();
    while let Some(left) = items.next() {
        pairs.push((left, items.next()));
    }

    pairs
        .into_par_iter()
        .map(|(left, right)| match right {
            Some(right) => {
                let merged = left.combine(right);
                observer.advance(task, 1);
                merged
            }
            None => left,
        })
        .collect()
}
