//! Hand-off to the transaction builder
//!
//! The builder that encodes and submits the pool's `swap` call is external.
//! This module only shapes a quote into the parameters that call takes.

use crate::asset::Address;
use crate::error::{QuoteError, QuoteResult};
use crate::quote::SwapQuote;
use crate::serde_helpers::{address_hex, u256_dec};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Signature of the pool's swap entry point
pub const SWAP_FUNCTION_SIGNATURE: &str = "swap(address,address,uint256,uint256,address,uint256)";

const BPS_DENOMINATOR: u32 = 10_000;

/// Parameters of one pool `swap` call, in call order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapIntent {
    #[serde(with = "address_hex")]
    pub from_token: Address,
    #[serde(with = "address_hex")]
    pub to_token: Address,
    #[serde(with = "u256_dec")]
    pub from_amount: U256,
    #[serde(with = "u256_dec")]
    pub minimum_to_amount: U256,
    #[serde(with = "address_hex")]
    pub recipient: Address,
    pub deadline: u64,
}

impl SwapIntent {
    /// Build the call parameters from a quote, tolerating `slippage_bps` of
    /// downward movement (`50` = 0.5%). The minimum amount truncates.
    pub fn from_quote(
        from_token: Address,
        to_token: Address,
        from_amount: U256,
        quote: &SwapQuote,
        slippage_bps: u32,
        recipient: Address,
        deadline: u64,
    ) -> QuoteResult<Self> {
        if slippage_bps > BPS_DENOMINATOR {
            return Err(QuoteError::InvalidConfig("slippage must not exceed 10000 bps"));
        }
        let kept = U256::from(BPS_DENOMINATOR - slippage_bps);
        let minimum_to_amount = quote
            .amount
            .checked_mul(kept)
            .ok_or(QuoteError::Overflow)?
            / U256::from(BPS_DENOMINATOR);

        Ok(Self {
            from_token,
            to_token,
            from_amount,
            minimum_to_amount,
            recipient,
            deadline,
        })
    }
}
