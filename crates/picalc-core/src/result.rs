//! Result and timing breakdown of a successful calculation.

use std::time::Duration;

use serde::{Serialize, Serializer};

/// Wall-clock time of each phase of the accepted attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Timings {
    /// Parallel split of all chunks.
    #[serde(serialize_with = "as_secs")]
    pub split: Duration,
    /// Pairwise merge of the chunk results.
    #[serde(serialize_with = "as_secs")]
    pub merge: Duration,
    /// Square root of 10005 at working precision.
    #[serde(serialize_with = "as_secs")]
    pub sqrt: Duration,
    /// Final quotient and formatting.
    #[serde(serialize_with = "as_secs")]
    pub assemble: Duration,
}

impl Timings {
    /// Sum of the four phases.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.split + self.merge + self.sqrt + self.assemble
    }
}

fn as_secs<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// Digits of π together with how they were obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PiResult {
    /// `"3."` followed by exactly `requested_digits` fractional digits.
    pub digits: String,
    /// Fractional digits that were requested.
    pub requested_digits: u64,
    /// Series terms summed by the accepted attempt.
    pub terms: u64,
    /// Attempts used, including the accepted one.
    pub attempts: u32,
    /// Chunks split by the accepted attempt.
    pub chunks: usize,
    /// Timing breakdown of the accepted attempt.
    pub timings: Timings,
}

impl PiResult {
    /// Fractional part of the digit string.
    #[must_use]
    pub fn fraction(&self) -> &str {
        self.digits.split_once('.').map_or("", |(_, f)| f)
    }
}
