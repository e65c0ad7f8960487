//! Constants of the Chudnovsky series and tuning defaults.

/// `640320³ / 24`, the per-term factor of the `Q` accumulator.
pub const CHUDNOVSKY_C: u64 = 10_939_058_860_032_000;

/// Linear coefficient of the series numerator term (`545140134·k`).
pub const CHUDNOVSKY_A: u64 = 545_140_134;

/// Constant part of the series numerator term.
pub const CHUDNOVSKY_B: u64 = 13_591_409;

/// Scale factor of the final quotient: `π = 426880·√10005·Q / (13591409·Q + R)`.
pub const CHUDNOVSKY_SCALE: u64 = 426_880;

/// Radicand of the square-root constant.
pub const SQRT_RADICAND: u64 = 10_005;

/// Decimal digits gained per series term, `log10(640320³ / 1728)`.
pub const DIGITS_PER_TERM: f64 = 14.181_647_462_725_477;

/// Extra terms added on top of the convergence-rate estimate.
pub const TERM_ESTIMATE_MARGIN: u64 = 2;

/// Growth factor applied to the term count after a convergence shortfall.
pub const TERM_GROWTH_FACTOR: f64 = 1.2;

/// Additive growth applied after the multiplicative factor.
pub const TERM_GROWTH_INCREMENT: u64 = 5;

/// Default bound on controller attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;

/// Default number of chunks scheduled per worker.
pub const DEFAULT_OVERSUBSCRIPTION: usize = 2;

/// Largest accepted digit count.
pub const MAX_DIGITS: u64 = 100_000_000;

/// Working precision in bits per requested decimal digit.
pub const PRECISION_BITS_PER_DIGIT: u64 = 4;

/// Fixed extra working precision in bits.
pub const PRECISION_EXTRA_BITS: u64 = 64;

/// Extra working precision granted to each retry, in bits.
pub const PRECISION_RETRY_BITS: u64 = 32;

/// Trailing digits of the fixed-point quotient treated as noise.
pub const GUARD_DIGITS: u64 = 2;

/// Conservative memory cost of one leaf term while a chunk is being split.
pub const BYTES_PER_TERM: usize = 256;

/// Rough memory footprint per requested digit for a whole run.
pub const BYTES_PER_DIGIT: usize = 15;

/// Digit count above which the presentation layer warns about memory use.
pub const LARGE_RUN_DIGITS: u64 = 10_000_000;

/// Exit codes of the `picalc` binary.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Requested digit count was rejected.
    pub const ERROR_INVALID_INPUT: i32 = 2;
    /// The attempt budget ran out before the digits converged.
    pub const ERROR_CONVERGENCE: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
}
