//! Final assembly of π from the merged triple.
//!
//! All arithmetic is fixed-point over integers scaled by `10^w`, where `w`
//! is the working precision in decimal digits:
//!
//! ```text
//! s = ⌊√(10005 · 10^(2w))⌋
//! π·10^w ≈ ⌊426880 · s · Q / (13591409·Q + R)⌋
//! ```
//!
//! Both floors round down, so the scaled value is at most two units below
//! the exact quotient.

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Roots;
use num_traits::Pow;

use crate::calculator::PiError;
use crate::constants::{CHUDNOVSKY_B, CHUDNOVSKY_SCALE, GUARD_DIGITS, SQRT_RADICAND};
use crate::precision::{is_positive, Precision};
use crate::split::Pqr;

/// `√10005` as a fixed-point integer scaled by `10^w`.
#[must_use]
pub fn sqrt_10005(precision: Precision) -> BigUint {
    let scale = pow10(precision.decimal_digits() * 2);
    Roots::sqrt(&(scale * SQRT_RADICAND))
}

/// Fixed-point candidate value of π.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PiCandidate {
    integer: String,
    fraction: String,
}

/// Outcome of the digit-stability check on a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    /// Fractional digits that are within the combined error bound.
    pub reliable_digits: u64,
    /// Length of the fractional part with trailing zeros removed.
    pub significant_digits: u64,
    /// Whether the requested digits can be emitted.
    pub stable: bool,
}

/// Assemble the candidate `426880·√10005·Q / (13591409·Q + R)`.
pub fn assemble(pqr: &Pqr, sqrt: &BigUint, precision: Precision) -> Result<PiCandidate, PiError> {
    if !is_positive(&pqr.q) {
        return Err(PiError::Calculation("merged Q is not positive".into()));
    }
    let numerator = BigInt::from_biguint(Sign::Plus, sqrt * CHUDNOVSKY_SCALE) * &pqr.q;
    let denominator = &pqr.q * CHUDNOVSKY_B + &pqr.r;
    if !is_positive(&denominator) {
        return Err(PiError::Calculation(
            "series denominator is not positive".into(),
        ));
    }
    let scaled = numerator / denominator;
    PiCandidate::from_scaled(&scaled.to_string(), precision.decimal_digits())
}

impl PiCandidate {
    /// Split the decimal text of `π·10^w` into integer and fractional parts.
    #[allow(clippy::cast_possible_truncation)]
    fn from_scaled(text: &str, working_digits: u64) -> Result<Self, PiError> {
        let w = working_digits as usize;
        if text.len() <= w || text.starts_with('-') {
            return Err(PiError::Calculation(format!(
                "assembled value {text} has no integer part at {w} digits"
            )));
        }
        let (integer, fraction) = text.split_at(text.len() - w);
        Ok(Self {
            integer: integer.to_string(),
            fraction: fraction.to_string(),
        })
    }

    /// Integer part (`"3"` for a converged value).
    #[must_use]
    pub fn integer_part(&self) -> &str {
        &self.integer
    }

    /// Fractional digits carried at working precision.
    #[must_use]
    pub fn fraction(&self) -> &str {
        &self.fraction
    }

    /// Render with exactly `digits` fractional digits, truncating or
    /// padding with zeros.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_decimal_string(&self, digits: u64) -> String {
        let digits = digits as usize;
        let mut out = String::with_capacity(self.integer.len() + 1 + digits);
        out.push_str(&self.integer);
        out.push('.');
        if self.fraction.len() >= digits {
            out.push_str(&self.fraction[..digits]);
        } else {
            out.push_str(&self.fraction);
            out.extend(std::iter::repeat('0').take(digits - self.fraction.len()));
        }
        out
    }

    /// Check whether the first `digits` fractional digits are settled.
    ///
    /// Reliable digits are the working digits bounded by the series
    /// convergence, minus the guard digits absorbing fixed-point rounding.
    /// The requested digits are stable when more than `digits` are reliable,
    /// the trimmed fraction is long enough, and the reliable tail after
    /// digit `digits` is not a run of all `0` or all `9` (a carry or borrow
    /// within the error bound could still change digit `digits`).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn verify(&self, digits: u64, convergence_digits: u64) -> Verification {
        let working = self.fraction.len() as u64;
        let reliable = working
            .min(convergence_digits)
            .saturating_sub(GUARD_DIGITS);
        let significant = self.fraction.trim_end_matches('0').len() as u64;

        let stable = reliable > digits && significant >= digits && {
            let tail = &self.fraction[digits as usize..reliable as usize];
            !(tail.bytes().all(|b| b == b'0') || tail.bytes().all(|b| b == b'9'))
        };

        Verification {
            reliable_digits: reliable,
            significant_digits: significant,
            stable,
        }
    }
}

fn pow10(exp: u64) -> BigUint {
    Pow::pow(BigUint::from(10u32), exp)
}
