//! Division of the term range into contiguous, ordered chunks.

use serde::Serialize;

use crate::constants::BYTES_PER_TERM;

/// Half-open term range `[start, end)` assigned to exactly one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// First term index (inclusive).
    pub start: u64,
    /// One past the last term index.
    pub end: u64,
}

impl Chunk {
    /// Create a chunk. The caller guarantees `start < end`.
    #[must_use]
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start < end, "empty chunk [{start}, {end})");
        Self { start, end }
    }

    /// Number of terms in the chunk.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Whether the chunk covers no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Largest chunk (in terms) that keeps `workers` concurrent leaf ranges
/// inside `memory_budget` bytes. Never below one term.
#[must_use]
pub fn memory_capped_chunk_size(memory_budget: usize, workers: usize) -> u64 {
    let per_worker = memory_budget / workers.max(1);
    (per_worker / BYTES_PER_TERM).max(1) as u64
}

/// Partition `[start, end)` into ordered chunks.
///
/// The target is `workers · oversubscription` chunks. When a memory budget
/// is known the chunk size is further capped so that `workers` chunks in
/// flight stay within it. Chunks are at least one term long; an empty range
/// yields no chunks.
#[must_use]
pub fn partition(
    start: u64,
    end: u64,
    workers: usize,
    oversubscription: usize,
    memory_budget: Option<usize>,
) -> Vec<Chunk> {
    if start >= end {
        return Vec::new();
    }
    let target = (workers.max(1) * oversubscription.max(1)) as u64;
    let mut size = ((end - start) / target).max(1);
    if let Some(budget) = memory_budget {
        size = size.min(memory_capped_chunk_size(budget, workers));
    }
    chunks_of_size(start, end, size)
}

/// Partition `[start, end)` into exactly `count` ordered chunks whose sizes
/// differ by at most one term. `count` is clamped to `[1, end - start]`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn partition_into(start: u64, end: u64, count: usize) -> Vec<Chunk> {
    if start >= end {
        return Vec::new();
    }
    let len = end - start;
    let count = (count as u64).clamp(1, len);
    let base = len / count;
    let extra = len % count;

    let mut chunks = Vec::with_capacity(count as usize);
    let mut cursor = start;
    for i in 0..count {
        let size = base + u64::from(i < extra);
        chunks.push(Chunk::new(cursor, cursor + size));
        cursor += size;
    }
    chunks
}

#[allow(clippy::cast_possible_truncation)]
fn chunks_of_size(start: u64, end: u64, size: u64) -> Vec<Chunk> {
    let mut chunks = Vec::with_capacity(((end - start).div_ceil(size)) as usize);
    let mut cursor = start;
    while cursor < end {
        let next = (cursor + size).min(end);
        chunks.push(Chunk::new(cursor, next));
        cursor = next;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covers(chunks: &[Chunk], start: u64, end: u64) {
        assert!(!chunks.is_empty());
        assert_eq!(chunks[0].start, start);
        assert_eq!(chunks[chunks.len() - 1].end, end);
        for pair in chunks.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "gap or overlap");
        }
        assert!(chunks.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn partition_targets_workers_times_oversubscription() {
        let chunks = partition(1, 801, 4, 2, None);
        assert_covers(&chunks, 1, 801);
        assert_eq!(chunks.len(), 8);
        assert!(chunks.iter().all(|c| c.len() == 100));
    }

    #[test]
    fn partition_uneven_range_keeps_remainder_chunk() {
        let chunks = partition(1, 11, 2, 2, None);
        assert_covers(&chunks, 1, 11);
        // size = 10 / 4 = 2 -> five chunks
        assert_eq!(chunks.len(), 5);
    }

    #[test]
    fn partition_range_smaller_than_workers() {
        let chunks = partition(1, 3, 16, 2, None);
        assert_covers(&chunks, 1, 3);
        assert_eq!(chunks.len(), 2);
    }

    #[test]
    fn partition_single_term() {
        let chunks = partition(5, 6, 8, 2, None);
        assert_eq!(chunks, vec![Chunk::new(5, 6)]);
    }

    #[test]
    fn partition_empty_range() {
        assert!(partition(4, 4, 2, 2, None).is_empty());
    }

    #[test]
    fn partition_memory_cap_shrinks_chunks() {
        let uncapped = partition(1, 10_001, 2, 1, None);
        assert_eq!(uncapped.len(), 2);

        // 2 workers, 10 terms each at most.
        let budget = 2 * 10 * BYTES_PER_TERM;
        let capped = partition(1, 10_001, 2, 1, Some(budget));
        assert_covers(&capped, 1, 10_001);
        assert!(capped.iter().all(|c| c.len() <= 10));
        assert_eq!(capped.len(), 1000);
    }

    #[test]
    fn memory_cap_never_below_one_term() {
        assert_eq!(memory_capped_chunk_size(0, 8), 1);
        let chunks = partition(1, 6, 1, 1, Some(0));
        assert_eq!(chunks.len(), 5);
    }

    #[test]
    fn partition_into_exact_counts() {
        for count in [1, 2, 3, 8] {
            let chunks = partition_into(1, 41, count);
            assert_covers(&chunks, 1, 41);
            assert_eq!(chunks.len(), count);
            let max = chunks.iter().map(Chunk::len).max().unwrap();
            let min = chunks.iter().map(Chunk::len).min().unwrap();
            assert!(max - min <= 1);
        }
    }

    #[test]
    fn partition_into_clamps_count() {
        assert_eq!(partition_into(1, 4, 10).len(), 3);
        assert_eq!(partition_into(1, 4, 0).len(), 1);
    }
}
