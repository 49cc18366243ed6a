//! Solvency curve integral and solvency scores
//!
//! `F(r)` is the definite integral of the pool's solvency-penalty curve from
//! the coverage ratio `r` up to full collateralization:
//!
//! ```text
//! r <= r*       F = (1 - r*) / 5 + (r* - r)
//! r* < r < 1    F = (1 - r)^5 / (5 * (1 - r*)^4)
//! r >= 1        F = 0
//! ```
//!
//! Both branches meet at `r = r*` with value `(1 - r*) / 5`. The fifth-power
//! branch is evaluated as one 512-bit quotient of WAD integers, so the only
//! rounding is the final truncation and the two branches agree exactly at
//! the threshold.

use crate::error::{QuoteError, QuoteResult};
use crate::wad::{WadMath, WAD};
use primitive_types::{U256, U512};

/// Piecewise solvency curve of the pool
pub struct SolvencyCurve;

impl SolvencyCurve {
    /// Integral `F(r_threshold, r)`, all values WAD-scaled
    pub fn integral(r_threshold: U256, r: U256) -> QuoteResult<U256> {
        if r_threshold.is_zero() {
            return Err(QuoteError::ZeroThreshold);
        }
        if r.is_zero() {
            return Err(QuoteError::ZeroRatio);
        }
        if r_threshold >= WAD {
            return Err(QuoteError::InvalidConfig("r_threshold must be below 1.0"));
        }

        if r <= r_threshold {
            Ok((WAD - r_threshold) / 5 + (r_threshold - r))
        } else if r < WAD {
            let shortfall = U512::from(WAD - r);
            let slack = U512::from(WAD - r_threshold);
            // x^5 / (5 y^4) keeps one factor of WAD in the quotient
            let numerator = shortfall.pow(U512::from(5u8));
            let denominator = slack.pow(U512::from(4u8)) * U512::from(5u8);
            WadMath::narrow(numerator / denominator)
        } else {
            Ok(U256::zero())
        }
    }

    /// Solvency score of moving `cash` by `cash_change` against a fixed
    /// `liability`.
    ///
    /// The score is the average slope of `F` across the coverage transition,
    /// always non-negative: a reward factor for the asset receiving cash, a
    /// penalty factor for the asset paying it out.
    pub fn score(
        r_threshold: U256,
        cash: U256,
        liability: U256,
        cash_change: U256,
        add_cash: bool,
    ) -> QuoteResult<U256> {
        if liability.is_zero() {
            return Err(QuoteError::ZeroLiability);
        }

        let cash_after = if add_cash {
            cash.checked_add(cash_change).ok_or(QuoteError::Overflow)?
        } else {
            cash.checked_sub(cash_change).ok_or(QuoteError::InsufficientCash)?
        };

        let cov_before = WadMath::div_wad(cash, liability)?;
        let cov_after = WadMath::div_wad(cash_after, liability)?;

        if cov_before == cov_after {
            return Ok(U256::zero());
        }

        let integral_before = Self::integral(r_threshold, cov_before)?;
        let integral_after = Self::integral(r_threshold, cov_after)?;

        WadMath::div_wad(
            abs_diff(integral_after, integral_before),
            abs_diff(cov_before, cov_after),
        )
    }
}

fn abs_diff(a: U256, b: U256) -> U256 {
    if a >= b {
        a - b
    } else {
        b - a
    }
}
