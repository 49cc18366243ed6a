//! # Mobius Pool Settings
//!
//! Loads the parameters and asset snapshot a quote replica is seeded from.
//!
//! ## Sources
//!
//! - **Settings file**: TOML with one `[pool]` table and any number of
//!   `[[assets]]` entries
//! - **Environment**: `MOBIUS__`-prefixed variables override file values,
//!   nested keys separated by `__` (`MOBIUS__POOL__HAIRCUT_RATE=0.0001`)
//!
//! Ratios and prices are written as decimals (`"0.23"`) and converted to
//! exact WAD integers; balances are written as integer strings since they
//! routinely exceed 64 bits.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mobius_config::PoolSettings;
//! use std::path::Path;
//!
//! let settings = PoolSettings::load(Path::new("config/stable_pool.toml")).unwrap();
//! let pool = settings.build_pool().unwrap();
//! let usde = settings.resolve_token("USDe").unwrap();
//! let usdc = settings.resolve_token("USDC").unwrap();
//! let quote = pool.quote_swap(&usde, &usdc, 100 * 10i128.pow(18)).unwrap();
//! ```

pub mod error;
pub mod settings;
pub mod units;

pub use error::ConfigError;
pub use settings::{AssetSettings, PoolSection, PoolSettings, ENV_PREFIX, ENV_SEPARATOR};
pub use units::{decimal_to_wad, parse_address_field, parse_amount};
