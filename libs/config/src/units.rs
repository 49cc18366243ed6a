//! Conversions from human-written settings values to ledger integers

use crate::error::ConfigError;
use mobius_amm::{serde_helpers::parse_address, Address, WadMath, U256, WAD_DECIMALS};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Exact WAD value of a non-negative decimal such as `"0.23"` or `"1.07269"`
pub fn decimal_to_wad(field: &str, raw: &str) -> Result<U256, ConfigError> {
    let value = Decimal::from_str(raw.trim()).map_err(|_| ConfigError::Decimal {
        field: field.to_string(),
        value: raw.to_string(),
    })?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ConfigError::Negative {
            field: field.to_string(),
        });
    }

    let scale = value.scale();
    if scale > u32::from(WAD_DECIMALS) {
        return Err(ConfigError::TooPrecise {
            field: field.to_string(),
        });
    }

    // Decimal mantissas are at most 96 bits and the factor at most 10^18
    let factor = WadMath::pow10(u32::from(WAD_DECIMALS) - scale).unwrap_or_default();
    Ok(U256::from(value.mantissa().unsigned_abs()) * factor)
}

/// Integer ledger amount written as a decimal string
pub fn parse_amount(field: &str, raw: &str) -> Result<U256, ConfigError> {
    U256::from_dec_str(raw.trim()).map_err(|_| ConfigError::Amount {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

pub fn parse_address_field(field: &str, raw: &str) -> Result<Address, ConfigError> {
    parse_address(raw.trim()).map_err(|_| ConfigError::Address {
        field: field.to_string(),
        value: raw.to_string(),
    })
}
