//! Pool data model: per-asset ledger state and pool parameters

use crate::error::{QuoteError, QuoteResult};
use crate::serde_helpers::{address_hex, u256_dec};
use crate::wad::{WadMath, WAD};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// 20-byte ledger address (token, asset contract, aggregate account, pool)
pub type Address = [u8; 20];

/// Pricing class of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetKind {
    /// Pegged asset, swapped 1:1 in a stable pool
    Stable,
    /// Asset with a WAD-scaled exchange rate against the pool's reference asset
    Variant {
        #[serde(with = "u256_dec")]
        price: U256,
    },
}

impl AssetKind {
    /// Build the kind from an optional oracle price, `None` meaning stable
    pub fn from_price(price: Option<U256>) -> Self {
        match price {
            Some(price) => AssetKind::Variant { price },
            None => AssetKind::Stable,
        }
    }

    /// Price of a variant asset, failing for stable assets
    pub fn price(&self) -> QuoteResult<U256> {
        match self {
            AssetKind::Variant { price } => Ok(*price),
            AssetKind::Stable => Err(QuoteError::PriceNotSet),
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(self, AssetKind::Stable)
    }
}

/// Ledger state of one asset participating in a pool.
///
/// `cash` and `liability` are always held in canonical (WAD) scale,
/// regardless of the underlying token's native precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetState {
    #[serde(with = "address_hex")]
    pub token: Address,
    /// Asset contract holding the pool's position in `token`
    #[serde(with = "address_hex")]
    pub asset: Address,
    #[serde(with = "u256_dec")]
    pub cash: U256,
    #[serde(with = "u256_dec")]
    pub liability: U256,
    pub decimals: u8,
    #[serde(with = "address_hex")]
    pub aggregate_account: Address,
    #[serde(flatten)]
    pub kind: AssetKind,
}

impl AssetState {
    /// Coverage ratio `cash / liability` in WAD
    pub fn coverage_ratio(&self) -> QuoteResult<U256> {
        if self.liability.is_zero() {
            return Err(QuoteError::ZeroLiability);
        }
        WadMath::div_wad(self.cash, self.liability)
    }

    /// Whether two assets share a risk-pooling group and may be swapped
    pub fn shares_account_with(&self, other: &AssetState) -> bool {
        self.aggregate_account == other.aggregate_account
    }
}

/// Selects how the ideal destination amount is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolType {
    /// Same-value assets, 1:1 ideal amount
    Stable,
    /// Multi-value assets, ideal amount converted through prices
    Variant,
}

/// Tunable pool parameters, all WAD-scaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolConfig {
    #[serde(with = "u256_dec")]
    r_threshold: U256,
    #[serde(with = "u256_dec")]
    haircut_rate: U256,
    #[serde(with = "u256_dec")]
    retention_ratio: U256,
    pool_type: PoolType,
}

impl PoolConfig {
    /// Validate and assemble a pool configuration.
    ///
    /// `r_threshold` must lie strictly inside `(0, 1)`; the haircut and
    /// retention rates may not exceed `1.0`.
    pub fn new(
        r_threshold: U256,
        haircut_rate: U256,
        retention_ratio: U256,
        pool_type: PoolType,
    ) -> QuoteResult<Self> {
        if r_threshold.is_zero() {
            return Err(QuoteError::ZeroThreshold);
        }
        if r_threshold >= WAD {
            return Err(QuoteError::InvalidConfig("r_threshold must be below 1.0"));
        }
        if haircut_rate > WAD {
            return Err(QuoteError::InvalidConfig("haircut_rate must not exceed 1.0"));
        }
        if retention_ratio > WAD {
            return Err(QuoteError::InvalidConfig("retention_ratio must not exceed 1.0"));
        }
        Ok(Self {
            r_threshold,
            haircut_rate,
            retention_ratio,
            pool_type,
        })
    }

    pub fn r_threshold(&self) -> U256 {
        self.r_threshold
    }

    pub fn haircut_rate(&self) -> U256 {
        self.haircut_rate
    }

    /// Carried for parity with the on-chain parameter set; quoting never reads it
    pub fn retention_ratio(&self) -> U256 {
        self.retention_ratio
    }

    pub fn pool_type(&self) -> PoolType {
        self.pool_type
    }
}
