//! Collaborator contracts
//!
//! The replica never reads the ledger itself. A state-sync collaborator pushes
//! asset balances and oracle prices through [`AssetStateSink`].

use crate::asset::Address;
use crate::error::QuoteResult;
use primitive_types::U256;

/// One full asset record as read from the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUpdate {
    pub token: Address,
    pub asset: Address,
    pub cash: U256,
    pub liability: U256,
    pub decimals: u8,
    pub aggregate_account: Address,
    /// `cash` and `liability` are already WAD-scaled when set, native otherwise
    pub values_in_wad: bool,
    /// Oracle price in WAD; `None` for stable assets
    pub price: Option<U256>,
}

/// Write side of a pool replica, driven by state-sync collaborators
pub trait AssetStateSink {
    /// Replace the whole state of one asset
    fn update_asset_state(&self, update: AssetUpdate) -> QuoteResult<()>;

    /// Replace only the oracle price of an existing asset
    fn update_asset_price(&self, token: &Address, price: U256) -> QuoteResult<()>;
}
