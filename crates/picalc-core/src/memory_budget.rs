//! Memory budget estimation and validation.

use sysinfo::System;

use crate::constants::BYTES_PER_DIGIT;

/// Memory estimate for a π computation.
#[derive(Debug, Clone)]
pub struct MemoryEstimate {
    /// Estimated memory for the decimal result itself (in bytes).
    pub result_bytes: usize,
    /// Estimated memory for the split triples and temporaries (in bytes).
    pub temp_bytes: usize,
    /// Total estimated memory (in bytes).
    pub total_bytes: usize,
}

impl MemoryEstimate {
    /// Estimate memory usage for computing `digits` digits of π.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn estimate(digits: u64) -> Self {
        let digits = digits as usize;
        // "3." plus the fractional digits.
        let result_bytes = digits + 2;
        let temp_bytes = digits.saturating_mul(BYTES_PER_DIGIT);
        Self {
            result_bytes,
            temp_bytes,
            total_bytes: result_bytes.saturating_add(temp_bytes),
        }
    }

    /// Check if the computation fits within the given memory limit.
    ///
    /// `None` means unlimited (always fits).
    #[must_use]
    pub fn fits_in(&self, limit: Option<usize>) -> bool {
        match limit {
            None => true,
            Some(l) => self.total_bytes <= l,
        }
    }

    /// Total estimate in GiB, for display.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_gib(&self) -> f64 {
        self.total_bytes as f64 / (1024.0 * 1024.0 * 1024.0)
    }
}

/// Memory currently available to the process, as reported by the OS.
///
/// Returns `None` when the platform does not report it.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn available_memory() -> Option<usize> {
    let mut system = System::new();
    system.refresh_memory();
    match system.available_memory() {
        0 => None,
        bytes => Some(bytes as usize),
    }
}

/// Parse a memory limit string (e.g., "8G", "512M", "1024K").
///
/// An empty string parses to `None`.
///
/// # Errors
///
/// Returns an error string if the format is invalid or the number cannot be parsed.
pub fn parse_memory_limit(s: &str) -> Result<Option<usize>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('B') {
        (n, 1)
    } else {
        (s, 1)
    };

    let value: usize = num_str
        .trim()
        .parse()
        .map_err(|e| format!("invalid memory limit: {e}"))?;
    value
        .checked_mul(multiplier)
        .map(Some)
        .ok_or_else(|| format!("memory limit {s} overflows"))
}
