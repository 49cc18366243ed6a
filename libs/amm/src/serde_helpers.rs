//! Serde adapters for ledger-shaped values
//!
//! `U256` travels as a decimal string and addresses as `0x`-prefixed hex so
//! snapshots and quotes stay readable next to a block explorer.

use crate::asset::Address;
use primitive_types::U256;
use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

/// Parse a 20-byte address from hex, with or without the `0x` prefix
pub fn parse_address(value: &str) -> Result<Address, hex::FromHexError> {
    let cleaned = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    let mut bytes = [0u8; 20];
    hex::decode_to_slice(cleaned, &mut bytes)?;
    Ok(bytes)
}

/// Render an address as lowercase `0x` hex
pub fn format_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

pub mod u256_dec {
    use super::*;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        U256::from_dec_str(raw.trim()).map_err(D::Error::custom)
    }
}

pub mod address_hex {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Address, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_address(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_address(raw.trim()).map_err(D::Error::custom)
    }
}
