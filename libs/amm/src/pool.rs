//! Per-pool state holder
//!
//! Owns the token -> asset state map for one pool behind a single
//! `parking_lot::RwLock`. State-sync writes take the write guard; quotes copy
//! both assets out under one read guard so a quote never sees cash from one
//! sync and a price from another.

use crate::asset::{Address, AssetKind, AssetState, PoolConfig};
use crate::error::{QuoteError, QuoteResult};
use crate::quote::{QuoteBreakdown, SwapQuote, SwapQuoteEngine};
use crate::serde_helpers::format_address;
use crate::traits::{AssetStateSink, AssetUpdate};
use crate::wad::WadMath;
use parking_lot::RwLock;
use primitive_types::U256;
use std::collections::HashMap;
use tracing::{debug, info};

/// Off-chain replica of one on-chain pool
pub struct MobiusPool {
    address: Address,
    config: PoolConfig,
    assets: RwLock<HashMap<Address, AssetState>>,
}

impl MobiusPool {
    pub fn new(address: Address, config: PoolConfig) -> Self {
        info!(
            pool = %format_address(&address),
            pool_type = ?config.pool_type(),
            "created pool replica"
        );
        Self {
            address,
            config,
            assets: RwLock::new(HashMap::new()),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Current state of `token`, `None` when the pool does not hold it
    pub fn get_asset_state(&self, token: &Address) -> Option<AssetState> {
        self.assets.read().get(token).cloned()
    }

    /// Asset contract registered for `token`
    pub fn get_asset_contract(&self, token: &Address) -> Option<Address> {
        self.assets.read().get(token).map(|state| state.asset)
    }

    /// True for a held asset quoted without an oracle price
    pub fn is_stable_asset(&self, token: &Address) -> bool {
        self.assets
            .read()
            .get(token)
            .is_some_and(|state| state.kind.is_stable())
    }

    /// All held assets ordered by token address
    pub fn list_assets(&self) -> Vec<AssetState> {
        let mut assets: Vec<AssetState> = self.assets.read().values().cloned().collect();
        assets.sort_by(|a, b| a.token.cmp(&b.token));
        assets
    }

    /// Quote a swap of `from_amount` native units of `from` into `to`
    pub fn quote_swap(&self, from: &Address, to: &Address, from_amount: i128) -> QuoteResult<SwapQuote> {
        let (from_state, to_state) = self.snapshot_pair(from, to)?;
        SwapQuoteEngine::quote(&self.config, &from_state, &to_state, from_amount)
    }

    /// Same as [`MobiusPool::quote_swap`] but returns the canonical breakdown
    pub fn quote_swap_detailed(
        &self,
        from: &Address,
        to: &Address,
        from_amount: i128,
    ) -> QuoteResult<QuoteBreakdown> {
        let (from_state, to_state) = self.snapshot_pair(from, to)?;
        SwapQuoteEngine::quote_detailed(&self.config, &from_state, &to_state, from_amount)
    }

    /// Native quote together with its canonical breakdown, both taken from
    /// the same snapshot
    pub fn quote_swap_with_breakdown(
        &self,
        from: &Address,
        to: &Address,
        from_amount: i128,
    ) -> QuoteResult<(SwapQuote, QuoteBreakdown)> {
        let (from_state, to_state) = self.snapshot_pair(from, to)?;
        let breakdown =
            SwapQuoteEngine::quote_detailed(&self.config, &from_state, &to_state, from_amount)?;
        Ok((breakdown.to_native(to_state.decimals)?, breakdown))
    }

    /// Whether the swap is currently possible; see [`SwapQuoteEngine::validate`]
    pub fn validate_swap(&self, from: &Address, to: &Address, from_amount: i128) -> QuoteResult<bool> {
        match self.snapshot_pair(from, to) {
            Ok((from_state, to_state)) => {
                SwapQuoteEngine::validate(&self.config, &from_state, &to_state, from_amount)
            }
            Err(QuoteError::AssetNotFound) => Ok(false),
            Err(err) => Err(err),
        }
    }

    fn snapshot_pair(&self, from: &Address, to: &Address) -> QuoteResult<(AssetState, AssetState)> {
        let assets = self.assets.read();
        let from_state = assets.get(from).cloned().ok_or(QuoteError::AssetNotFound)?;
        let to_state = assets.get(to).cloned().ok_or(QuoteError::AssetNotFound)?;
        Ok((from_state, to_state))
    }
}

impl AssetStateSink for MobiusPool {
    fn update_asset_state(&self, update: AssetUpdate) -> QuoteResult<()> {
        let (cash, liability) = if update.values_in_wad {
            (update.cash, update.liability)
        } else {
            (
                WadMath::to_wad(update.cash, update.decimals)?,
                WadMath::to_wad(update.liability, update.decimals)?,
            )
        };

        let state = AssetState {
            token: update.token,
            asset: update.asset,
            cash,
            liability,
            decimals: update.decimals,
            aggregate_account: update.aggregate_account,
            kind: AssetKind::from_price(update.price),
        };

        debug!(
            token = %format_address(&state.token),
            cash = %state.cash,
            liability = %state.liability,
            "synced asset state"
        );
        self.assets.write().insert(state.token, state);
        Ok(())
    }

    fn update_asset_price(&self, token: &Address, price: U256) -> QuoteResult<()> {
        let mut assets = self.assets.write();
        let state = assets.get_mut(token).ok_or(QuoteError::AssetNotFound)?;
        state.kind = AssetKind::Variant { price };

        debug!(token = %format_address(token), price = %price, "synced asset price");
        Ok(())
    }
}
