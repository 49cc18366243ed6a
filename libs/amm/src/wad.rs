//! WAD fixed-point arithmetic
//!
//! Canonical amounts carry 18 fractional digits (`1.0 == 10^18`), matching
//! the integer ledger the pool lives on. Every division truncates toward
//! zero, and products are formed at 512 bits so only the final division
//! step loses precision.

use crate::error::{QuoteError, QuoteResult};
use primitive_types::{U256, U512};

/// Number of fractional digits in the canonical representation
pub const WAD_DECIMALS: u8 = 18;

/// `1.0` in canonical scale
pub const WAD: U256 = U256([1_000_000_000_000_000_000, 0, 0, 0]);

/// Fixed-point helpers mirroring the ledger's integer math
pub struct WadMath;

impl WadMath {
    /// `10^exp`, or `None` once the power no longer fits in 256 bits
    pub fn pow10(exp: u32) -> Option<U256> {
        let ten = U256::from(10u8);
        (0..exp).try_fold(U256::one(), |acc, _| acc.checked_mul(ten))
    }

    /// Convert an amount in `decimals` native precision to canonical scale
    pub fn to_wad(amount: U256, decimals: u8) -> QuoteResult<U256> {
        if decimals < WAD_DECIMALS {
            let factor = Self::pow10(u32::from(WAD_DECIMALS - decimals)).ok_or(QuoteError::Overflow)?;
            amount.checked_mul(factor).ok_or(QuoteError::Overflow)
        } else if decimals > WAD_DECIMALS {
            // A divisor wider than 256 bits truncates every representable amount to zero
            Ok(Self::pow10(u32::from(decimals - WAD_DECIMALS))
                .map(|factor| amount / factor)
                .unwrap_or_default())
        } else {
            Ok(amount)
        }
    }

    /// Convert a canonical amount back to `decimals` native precision
    pub fn from_wad(amount: U256, decimals: u8) -> QuoteResult<U256> {
        if decimals < WAD_DECIMALS {
            let factor = Self::pow10(u32::from(WAD_DECIMALS - decimals)).ok_or(QuoteError::Overflow)?;
            Ok(amount / factor)
        } else if decimals > WAD_DECIMALS {
            if amount.is_zero() {
                return Ok(amount);
            }
            let factor = Self::pow10(u32::from(decimals - WAD_DECIMALS)).ok_or(QuoteError::Overflow)?;
            amount.checked_mul(factor).ok_or(QuoteError::Overflow)
        } else {
            Ok(amount)
        }
    }

    /// `a * b / WAD`
    pub fn mul_wad(a: U256, b: U256) -> QuoteResult<U256> {
        Self::mul_div(a, b, WAD)
    }

    /// `a * WAD / b`
    pub fn div_wad(a: U256, b: U256) -> QuoteResult<U256> {
        Self::mul_div(a, WAD, b)
    }

    /// `a * b / denominator` with a 512-bit intermediate product
    pub fn mul_div(a: U256, b: U256, denominator: U256) -> QuoteResult<U256> {
        if denominator.is_zero() {
            return Err(QuoteError::DivisionByZero);
        }
        let quotient = a.full_mul(b) / U512::from(denominator);
        Self::narrow(quotient)
    }

    /// Fit a 512-bit intermediate back into the canonical width
    pub fn narrow(value: U512) -> QuoteResult<U256> {
        U256::try_from(value).map_err(|_| QuoteError::Overflow)
    }

    /// Convert a signed native amount into an unsigned one, rejecting
    /// zero and negative input
    pub fn positive_amount(amount: i128) -> QuoteResult<U256> {
        if amount <= 0 {
            return Err(QuoteError::InvalidAmount);
        }
        Ok(U256::from(amount.unsigned_abs()))
    }
}
