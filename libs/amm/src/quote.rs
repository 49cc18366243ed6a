//! Swap quote pipeline
//!
//! Pure functions over a snapshot of two assets and the pool configuration.
//! Locking and asset lookup live in [`crate::pool`]; everything here is
//! deterministic integer math.

use crate::asset::{AssetState, PoolConfig, PoolType};
use crate::error::{QuoteError, QuoteResult};
use crate::serde_helpers::u256_dec;
use crate::solvency::SolvencyCurve;
use crate::wad::{WadMath, WAD};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Quote result in the destination token's native units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuote {
    /// Net amount the caller receives
    #[serde(with = "u256_dec")]
    pub amount: U256,
    /// Fee withheld from the gross amount
    #[serde(with = "u256_dec")]
    pub haircut: U256,
}

/// Canonical-scale breakdown of a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    #[serde(with = "u256_dec")]
    pub from_amount: U256,
    #[serde(with = "u256_dec")]
    pub ideal_to_amount: U256,
    #[serde(with = "u256_dec")]
    pub solvency_from: U256,
    #[serde(with = "u256_dec")]
    pub solvency_to: U256,
    #[serde(with = "u256_dec")]
    pub gross_to_amount: U256,
    #[serde(with = "u256_dec")]
    pub haircut: U256,
    #[serde(with = "u256_dec")]
    pub net_to_amount: U256,
}

impl QuoteBreakdown {
    /// Net amount and haircut in the destination token's native units
    pub fn to_native(&self, to_decimals: u8) -> QuoteResult<SwapQuote> {
        Ok(SwapQuote {
            amount: WadMath::from_wad(self.net_to_amount, to_decimals)?,
            haircut: WadMath::from_wad(self.haircut, to_decimals)?,
        })
    }
}

/// Turns a requested source amount into a net destination amount and fee
pub struct SwapQuoteEngine;

impl SwapQuoteEngine {
    /// Quote `from_amount` (native units of `from`) into `to`
    pub fn quote(
        config: &PoolConfig,
        from: &AssetState,
        to: &AssetState,
        from_amount: i128,
    ) -> QuoteResult<SwapQuote> {
        let quote = Self::quote_detailed(config, from, to, from_amount)?.to_native(to.decimals)?;

        debug!(
            from_amount = %from_amount,
            to_amount = %quote.amount,
            haircut = %quote.haircut,
            "quoted swap"
        );
        Ok(quote)
    }

    /// Full canonical breakdown of a quote, before conversion to native units
    pub fn quote_detailed(
        config: &PoolConfig,
        from: &AssetState,
        to: &AssetState,
        from_amount: i128,
    ) -> QuoteResult<QuoteBreakdown> {
        if !from.shares_account_with(to) {
            return Err(QuoteError::AggregateAccountMismatch);
        }
        let from_amount = WadMath::to_wad(WadMath::positive_amount(from_amount)?, from.decimals)?;

        let ideal_to_amount = Self::ideal_to_amount(config, from, to, from_amount)?;
        if to.cash < ideal_to_amount {
            return Err(QuoteError::InsufficientCash);
        }

        let solvency_from = SolvencyCurve::score(
            config.r_threshold(),
            from.cash,
            from.liability,
            from_amount,
            true,
        )?;
        let solvency_to = SolvencyCurve::score(
            config.r_threshold(),
            to.cash,
            to.liability,
            ideal_to_amount,
            false,
        )?;

        let gross_to_amount = Self::apply_solvency(ideal_to_amount, solvency_from, solvency_to)?;
        let haircut = WadMath::mul_wad(gross_to_amount, config.haircut_rate())?;
        let net_to_amount = gross_to_amount
            .checked_sub(haircut)
            .ok_or(QuoteError::InsufficientCash)?;

        Ok(QuoteBreakdown {
            from_amount,
            ideal_to_amount,
            solvency_from,
            solvency_to,
            gross_to_amount,
            haircut,
            net_to_amount,
        })
    }

    /// Destination amount before solvency adjustment and fee.
    ///
    /// 1:1 in a stable pool; `amount * from_price / to_price` in a variant
    /// pool.
    pub fn ideal_to_amount(
        config: &PoolConfig,
        from: &AssetState,
        to: &AssetState,
        from_amount: U256,
    ) -> QuoteResult<U256> {
        match config.pool_type() {
            PoolType::Stable => Ok(from_amount),
            PoolType::Variant => {
                let from_price = from.kind.price()?;
                let to_price = to.kind.price()?;
                if from_price.is_zero() || to_price.is_zero() {
                    return Err(QuoteError::ZeroPrice);
                }
                WadMath::mul_div(from_amount, from_price, to_price)
            }
        }
    }

    /// `ideal * (1 + solvency_from - solvency_to)`
    fn apply_solvency(ideal: U256, solvency_from: U256, solvency_to: U256) -> QuoteResult<U256> {
        let reward = WAD.checked_add(solvency_from).ok_or(QuoteError::Overflow)?;
        // A penalty beyond the whole amount would make the output negative
        let multiplier = reward
            .checked_sub(solvency_to)
            .ok_or(QuoteError::InsufficientCash)?;
        WadMath::mul_wad(ideal, multiplier)
    }

    /// Whether a swap is currently possible.
    ///
    /// Asset mismatch, non-positive input and insufficient destination cash
    /// are answered with `Ok(false)`; a malformed pool state (missing or
    /// zero price, arithmetic overflow) is returned as an error.
    pub fn validate(
        config: &PoolConfig,
        from: &AssetState,
        to: &AssetState,
        from_amount: i128,
    ) -> QuoteResult<bool> {
        match Self::check_swap(config, from, to, from_amount) {
            Ok(()) => Ok(true),
            Err(err) if err.is_validation_failure() => {
                debug!(error = %err, "swap failed validation");
                Ok(false)
            }
            Err(err) => {
                warn!(error = %err, "swap validation hit malformed pool state");
                Err(err)
            }
        }
    }

    fn check_swap(
        config: &PoolConfig,
        from: &AssetState,
        to: &AssetState,
        from_amount: i128,
    ) -> QuoteResult<()> {
        if !from.shares_account_with(to) {
            return Err(QuoteError::AggregateAccountMismatch);
        }
        let from_amount = WadMath::to_wad(WadMath::positive_amount(from_amount)?, from.decimals)?;
        let ideal_to_amount = Self::ideal_to_amount(config, from, to, from_amount)?;
        if to.cash < ideal_to_amount {
            return Err(QuoteError::InsufficientCash);
        }
        Ok(())
    }
}
