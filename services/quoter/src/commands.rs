//! Quoter command implementations
//!
//! Each command runs against a [`Session`]: the settings file plus the pool
//! seeded from it. Results are plain serializable reports; printing is left
//! to `main`.

use anyhow::{anyhow, bail, Context, Result};
use mobius_amm::{
    serde_helpers::{address_hex, format_address, u256_dec},
    Address, AssetState, AssetStateSink, MobiusPool, QuoteBreakdown, SwapIntent, WadMath, U256,
};
use mobius_config::{decimal_to_wad, PoolSettings};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Loaded settings and the pool replica built from them
pub struct Session {
    settings: PoolSettings,
    pool: MobiusPool,
}

/// `quote` output
#[derive(Debug, Serialize)]
pub struct QuoteReport {
    #[serde(with = "address_hex")]
    pub pool: Address,
    pub from: String,
    pub to: String,
    pub from_amount: String,
    #[serde(with = "u256_dec")]
    pub amount: U256,
    #[serde(with = "u256_dec")]
    pub haircut: U256,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<QuoteBreakdown>,
}

#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub from: String,
    pub to: String,
    pub from_amount: String,
    pub valid: bool,
}

/// One asset in `state` output
#[derive(Debug, Serialize)]
pub struct AssetReport {
    pub symbol: Option<String>,
    #[serde(flatten)]
    pub state: AssetState,
    /// Coverage ratio in WAD; absent when liability is zero
    #[serde(with = "option_u256_dec", skip_serializing_if = "Option::is_none")]
    pub coverage_ratio: Option<U256>,
}

#[derive(Debug, Serialize)]
pub struct IntentReport {
    pub function: &'static str,
    #[serde(with = "u256_dec")]
    pub quoted_amount: U256,
    pub slippage_bps: u32,
    #[serde(flatten)]
    pub intent: SwapIntent,
}

mod option_u256_dec {
    use mobius_amm::U256;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Option<U256>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_str(&value.to_string()),
            None => serializer.serialize_none(),
        }
    }
}

/// Parse a `SYMBOL=PRICE` override
pub fn parse_price_override(raw: &str) -> Result<(String, String)> {
    let (token, price) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("price override must be TOKEN=PRICE, got {:?}", raw))?;
    if token.trim().is_empty() || price.trim().is_empty() {
        bail!("price override must be TOKEN=PRICE, got {:?}", raw);
    }
    Ok((token.trim().to_string(), price.trim().to_string()))
}

impl Session {
    /// Load `path`, seed the pool, then apply oracle price overrides
    pub fn open(path: &Path, price_overrides: &[(String, String)]) -> Result<Self> {
        let settings = PoolSettings::load(path)
            .with_context(|| format!("Failed to load pool settings from {:?}", path))?;
        Self::from_settings(settings, price_overrides)
    }

    pub fn from_settings(settings: PoolSettings, price_overrides: &[(String, String)]) -> Result<Self> {
        let pool = settings.build_pool().context("Failed to seed pool")?;

        for (key, raw_price) in price_overrides {
            let token = settings.resolve_token(key)?;
            let price = decimal_to_wad("price", raw_price)?;
            pool.update_asset_price(&token, price)
                .with_context(|| format!("Failed to override price of {}", key))?;
            info!("Price override: {} = {}", key, raw_price);
        }

        Ok(Self { settings, pool })
    }

    pub fn pool(&self) -> &MobiusPool {
        &self.pool
    }

    pub fn quote(&self, from: &str, to: &str, from_amount: i128, detailed: bool) -> Result<QuoteReport> {
        let from_token = self.settings.resolve_token(from)?;
        let to_token = self.settings.resolve_token(to)?;

        let (quote, breakdown) = self
            .pool
            .quote_swap_with_breakdown(&from_token, &to_token, from_amount)
            .with_context(|| format!("Cannot quote {} {} -> {}", from_amount, from, to))?;
        let breakdown = detailed.then_some(breakdown);

        Ok(QuoteReport {
            pool: self.pool.address(),
            from: self.label(&from_token),
            to: self.label(&to_token),
            from_amount: from_amount.to_string(),
            amount: quote.amount,
            haircut: quote.haircut,
            breakdown,
        })
    }

    pub fn validate(&self, from: &str, to: &str, from_amount: i128) -> Result<ValidationReport> {
        let from_token = self.settings.resolve_token(from)?;
        let to_token = self.settings.resolve_token(to)?;
        let valid = self.pool.validate_swap(&from_token, &to_token, from_amount)?;
        debug!(valid, "validated swap");

        Ok(ValidationReport {
            from: self.label(&from_token),
            to: self.label(&to_token),
            from_amount: from_amount.to_string(),
            valid,
        })
    }

    /// Every asset, or just `token` when given
    pub fn state(&self, token: Option<&str>) -> Result<Vec<AssetReport>> {
        let assets = match token {
            Some(key) => {
                let address = self.settings.resolve_token(key)?;
                let state = self
                    .pool
                    .get_asset_state(&address)
                    .ok_or_else(|| anyhow!("Pool holds no asset for token {}", key))?;
                vec![state]
            }
            None => self.pool.list_assets(),
        };

        Ok(assets
            .into_iter()
            .map(|state| AssetReport {
                symbol: self.settings.symbol_of(&state.token).map(str::to_string),
                coverage_ratio: state.coverage_ratio().ok(),
                state,
            })
            .collect())
    }

    pub fn intent(
        &self,
        from: &str,
        to: &str,
        from_amount: i128,
        slippage_bps: u32,
        recipient: &str,
        deadline: u64,
    ) -> Result<IntentReport> {
        let from_token = self.settings.resolve_token(from)?;
        let to_token = self.settings.resolve_token(to)?;
        let recipient = mobius_config::parse_address_field("recipient", recipient)?;

        let quote = self
            .pool
            .quote_swap(&from_token, &to_token, from_amount)
            .with_context(|| format!("Cannot quote {} {} -> {}", from_amount, from, to))?;
        let intent = SwapIntent::from_quote(
            from_token,
            to_token,
            WadMath::positive_amount(from_amount)?,
            &quote,
            slippage_bps,
            recipient,
            deadline,
        )?;

        Ok(IntentReport {
            function: mobius_amm::SWAP_FUNCTION_SIGNATURE,
            quoted_amount: quote.amount,
            slippage_bps,
            intent,
        })
    }

    fn label(&self, token: &Address) -> String {
        self.settings
            .symbol_of(token)
            .map(str::to_string)
            .unwrap_or_else(|| format_address(token))
    }
}
