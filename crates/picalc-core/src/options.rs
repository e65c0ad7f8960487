//! Calculation options and configuration.

use crate::constants::{DEFAULT_MAX_ATTEMPTS, DEFAULT_OVERSUBSCRIPTION};

/// Options for a π calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Worker threads (0 = available parallelism).
    pub workers: usize,
    /// Chunks scheduled per worker for load balancing.
    pub oversubscription: usize,
    /// Memory available to in-flight chunks, in bytes (`None` = uncapped).
    pub memory_budget: Option<usize>,
    /// Bound on controller attempts before giving up.
    pub max_attempts: u32,
    /// Override of the initial term-count estimate.
    pub initial_terms: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            workers: 0,
            oversubscription: DEFAULT_OVERSUBSCRIPTION,
            memory_budget: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_terms: None,
        }
    }
}

impl Options {
    /// Normalize options, applying defaults where values are zero.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.workers == 0 {
            self.workers = available_workers();
        }
        if self.oversubscription == 0 {
            self.oversubscription = DEFAULT_OVERSUBSCRIPTION;
        }
        if self.max_attempts == 0 {
            self.max_attempts = DEFAULT_MAX_ATTEMPTS;
        }
        if self.initial_terms == Some(0) {
            self.initial_terms = None;
        }
        self
    }
}

/// Number of hardware threads, falling back to one.
#[must_use]
pub fn available_workers() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = Options::default();
        assert_eq!(opts.workers, 0);
        assert_eq!(opts.oversubscription, DEFAULT_OVERSUBSCRIPTION);
        assert_eq!(opts.max_attempts, 50);
        assert!(opts.memory_budget.is_none());
        assert!(opts.initial_terms.is_none());
    }

    #[test]
    fn normalize_zero_values() {
        let opts = Options {
            workers: 0,
            oversubscription: 0,
            max_attempts: 0,
            initial_terms: Some(0),
            ..Default::default()
        }
        .normalize();
        assert!(opts.workers >= 1);
        assert_eq!(opts.oversubscription, DEFAULT_OVERSUBSCRIPTION);
        assert_eq!(opts.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert!(opts.initial_terms.is_none());
    }

    #[test]
    fn normalize_keeps_explicit_values() {
        let opts = Options {
            workers: 3,
            oversubscription: 4,
            memory_budget: Some(1 << 20),
            max_attempts: 7,
            initial_terms: Some(12),
        }
        .normalize();
        assert_eq!(opts.workers, 3);
        assert_eq!(opts.oversubscription, 4);
        assert_eq!(opts.memory_budget, Some(1 << 20));
        assert_eq!(opts.max_attempts, 7);
        assert_eq!(opts.initial_terms, Some(12));
    }
}
