//! Binary splitting of the Chudnovsky series.
//!
//! For a half-open term range `[a, b)` the triple `(P, Q, R)` satisfies:
//!
//! ```text
//! leaf a:      P = -(6a-5)(2a-1)(6a-1)
//!              Q = C·a³                      C = 640320³/24
//!              R = P·(545140134·a + 13591409)
//!
//! combine:     P = P₁·P₂
//!              Q = Q₁·Q₂
//!              R = Q₂·R₁ + P₁·R₂
//! ```
//!
//! `combine` is associative but not commutative, so sub-range results must
//! be merged in ascending order. The same rule drives both the recursion
//! inside a chunk and the cross-chunk reducer.

use num_bigint::BigInt;

use crate::constants::{CHUDNOVSKY_A, CHUDNOVSKY_B, CHUDNOVSKY_C};

/// Binary-splitting accumulator for one contiguous term range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pqr {
    /// Product of the term numerators (sign alternates with term count).
    pub p: BigInt,
    /// Product of the term denominators (always positive).
    pub q: BigInt,
    /// Partial series sum scaled by `Q`.
    pub r: BigInt,
}

impl Pqr {
    /// Triple for the single term `a`.
    #[must_use]
    pub fn leaf(a: u64) -> Self {
        let a = BigInt::from(a);
        let six_a = &a * 6u32;
        let p = -((&six_a - 5u32) * (&a * 2u32 - 1u32) * (&six_a - 1u32));
        let q = &a * &a * &a * CHUDNOVSKY_C;
        let r = &p * (&a * CHUDNOVSKY_A + CHUDNOVSKY_B);
        Self { p, q, r }
    }

    /// Merge the triple of `[a, m)` (`self`) with the triple of `[m, b)`.
    #[must_use]
    pub fn combine(self, right: Pqr) -> Self {
        let r = &right.q * &self.r + &self.p * &right.r;
        Self {
            p: self.p * right.p,
            q: self.q * right.q,
            r,
        }
    }
}

/// Compute the triple for the term range `[a, b)`.
///
/// The caller guarantees `1 <= a < b`. Recursion depth is `log2(b - a)`.
#[must_use]
pub fn split(a: u64, b: u64) -> Pqr {
    debug_assert!(a >= 1 && a < b, "split requires 1 <= a < b, got [{a}, {b})");
    if b - a == 1 {
        return Pqr::leaf(a);
    }
    let m = a + (b - a) / 2;
    split(a, m).combine(split(m, b))
}
