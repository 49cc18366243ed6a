//! Pool Settings Module
//!
//! Loads a pool's parameters and an asset snapshot from a TOML file, with
//! `MOBIUS__`-prefixed environment variables layered on top, and turns them
//! into a seeded [`MobiusPool`].

use crate::error::ConfigError;
use crate::units::{decimal_to_wad, parse_address_field, parse_amount};
use config_crate::{Config, Environment, File, FileFormat};
use mobius_amm::{
    serde_helpers::parse_address, Address, AssetStateSink, AssetUpdate, MobiusPool, PoolConfig,
    PoolType,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable prefix for overrides (`MOBIUS__POOL__HAIRCUT_RATE`)
pub const ENV_PREFIX: &str = "MOBIUS";

/// Separator between nested keys in override variable names
pub const ENV_SEPARATOR: &str = "__";

/// Complete settings file: pool parameters plus an asset snapshot
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PoolSettings {
    pub pool: PoolSection,

    #[serde(default)]
    pub assets: Vec<AssetSettings>,
}

/// `[pool]` table
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PoolSection {
    pub address: String,
    pub pool_type: PoolType,
    /// Decimal coverage ratio, e.g. `"0.23"`
    pub r_threshold: String,
    /// Decimal fee fraction, e.g. `"0.00005"`
    pub haircut_rate: String,
    pub retention_ratio: String,
}

/// One `[[assets]]` entry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssetSettings {
    pub symbol: String,
    pub token: String,
    pub asset: String,
    pub aggregate_account: String,
    pub decimals: u8,
    /// Integer amount, WAD-scaled when `values_in_wad` is set
    pub cash: String,
    pub liability: String,
    #[serde(default)]
    pub values_in_wad: bool,
    /// Decimal oracle price; present for variant assets only
    #[serde(default)]
    pub price: Option<String>,
}

impl PoolSettings {
    /// Load settings from `path`, then apply environment overrides
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading pool settings: {:?}", path);

        let config = Config::builder()
            .add_source(File::from(path).required(true))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Parse settings from TOML text without touching the environment
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn pool_address(&self) -> Result<Address, ConfigError> {
        parse_address_field("pool.address", &self.pool.address)
    }

    /// Validated WAD-scaled pool configuration
    pub fn pool_config(&self) -> Result<PoolConfig, ConfigError> {
        let config = PoolConfig::new(
            decimal_to_wad("pool.r_threshold", &self.pool.r_threshold)?,
            decimal_to_wad("pool.haircut_rate", &self.pool.haircut_rate)?,
            decimal_to_wad("pool.retention_ratio", &self.pool.retention_ratio)?,
            self.pool.pool_type,
        )?;
        Ok(config)
    }

    /// State-sync records for every configured asset, in file order
    pub fn asset_updates(&self) -> Result<Vec<AssetUpdate>, ConfigError> {
        self.assets.iter().map(AssetSettings::to_update).collect()
    }

    /// Construct the pool and replay the asset snapshot into it
    pub fn build_pool(&self) -> Result<MobiusPool, ConfigError> {
        let updates = self.asset_updates()?;
        let pool = MobiusPool::new(self.pool_address()?, self.pool_config()?);
        for update in updates {
            pool.update_asset_state(update)?;
        }

        info!(
            "Seeded {:?} pool with {} assets",
            self.pool.pool_type,
            self.assets.len()
        );
        Ok(pool)
    }

    /// Resolve a token by symbol (case-insensitive) or by hex address
    pub fn resolve_token(&self, key: &str) -> Result<Address, ConfigError> {
        if let Some(entry) = self
            .assets
            .iter()
            .find(|entry| entry.symbol.eq_ignore_ascii_case(key))
        {
            return parse_address_field("assets.token", &entry.token);
        }
        parse_address(key).map_err(|_| ConfigError::UnknownToken(key.to_string()))
    }

    /// Symbol configured for `token`, if any
    pub fn symbol_of(&self, token: &Address) -> Option<&str> {
        self.assets
            .iter()
            .find(|entry| parse_address(&entry.token).ok().as_ref() == Some(token))
            .map(|entry| entry.symbol.as_str())
    }
}

impl AssetSettings {
    fn to_update(&self) -> Result<AssetUpdate, ConfigError> {
        let field = |name: &str| format!("assets.{}.{}", self.symbol, name);

        let price = self
            .price
            .as_deref()
            .map(|raw| decimal_to_wad(&field("price"), raw))
            .transpose()?;

        debug!(symbol = %self.symbol, variant = price.is_some(), "parsed asset settings");

        Ok(AssetUpdate {
            token: parse_address_field(&field("token"), &self.token)?,
            asset: parse_address_field(&field("asset"), &self.asset)?,
            cash: parse_amount(&field("cash"), &self.cash)?,
            liability: parse_amount(&field("liability"), &self.liability)?,
            decimals: self.decimals,
            aggregate_account: parse_address_field(&field("aggregate_account"), &self.aggregate_account)?,
            values_in_wad: self.values_in_wad,
            price,
        })
    }
}
