//! Working precision and term-count estimates.
//!
//! The working precision is an explicit value scoped to one attempt; there
//! is no global precision context.

use num_bigint::BigInt;

use crate::constants::{
    CHUDNOVSKY_A, CHUDNOVSKY_B, DIGITS_PER_TERM, PRECISION_BITS_PER_DIGIT, PRECISION_EXTRA_BITS,
    PRECISION_RETRY_BITS, TERM_ESTIMATE_MARGIN, TERM_GROWTH_FACTOR, TERM_GROWTH_INCREMENT,
};
use crate::split::Pqr;

const LOG10_2: f64 = std::f64::consts::LOG10_2;

/// Working precision of one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
    bits: u64,
}

impl Precision {
    /// Precision with an explicit number of bits.
    #[must_use]
    pub fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// Precision for computing `digits` fractional digits on the given
    /// 1-based attempt. Each retry gets a few more guard bits.
    #[must_use]
    pub fn for_attempt(digits: u64, attempt: u32) -> Self {
        let retries = u64::from(attempt.saturating_sub(1));
        Self::from_bits(
            digits * PRECISION_BITS_PER_DIGIT + PRECISION_EXTRA_BITS + retries * PRECISION_RETRY_BITS,
        )
    }

    /// Working precision in bits.
    #[must_use]
    pub fn bits(self) -> u64 {
        self.bits
    }

    /// Fractional decimal digits carried by the fixed-point representation.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn decimal_digits(self) -> u64 {
        (self.bits as f64 * LOG10_2).floor() as u64
    }
}

/// Initial term count for `digits` fractional digits, from the series'
/// convergence rate of ~14.18 digits per term.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn initial_term_estimate(digits: u64) -> u64 {
    (digits as f64 / DIGITS_PER_TERM).ceil() as u64 + TERM_ESTIMATE_MARGIN
}

/// Enlarged term count after a convergence shortfall: `⌊n·1.2⌋ + 5`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn grow_terms(terms: u64) -> u64 {
    (terms as f64 * TERM_GROWTH_FACTOR).floor() as u64 + TERM_GROWTH_INCREMENT
}

/// Decimal digits of π guaranteed by summing terms `0..=terms`.
///
/// The first omitted term is bounded by `|P|/Q · 72/C · (A·(n+1) + B)`
/// relative to the leading term `B`, and `72/C < 10⁻¹⁴`. `Q/|P|` is
/// bounded below from the bit lengths of the merged triple.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn convergence_digits(pqr: &Pqr, terms: u64) -> u64 {
    let q_bits = pqr.q.bits();
    let p_bits = pqr.p.magnitude().bits();
    let ratio_bits = q_bits.saturating_sub(1).saturating_sub(p_bits);

    let growth = (CHUDNOVSKY_A as f64 * (terms + 2) as f64) / CHUDNOVSKY_B as f64 + 1.0;
    // One more digit absorbs the factor π ≈ 3.14 between relative and absolute error.
    let digits = ratio_bits as f64 * LOG10_2 + 14.0 - growth.log10() - 1.0;
    if digits <= 0.0 {
        0
    } else {
        digits.floor() as u64
    }
}

/// Whether `value` is a valid merged `Q` (strictly positive).
pub(crate) fn is_positive(value: &BigInt) -> bool {
    value.sign() == num_bigint::Sign::Plus
}
