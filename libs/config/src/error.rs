use mobius_amm::QuoteError;
use thiserror::Error;

/// Settings loading and conversion failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config_crate::ConfigError),

    #[error("Invalid address for {field}: {value}")]
    Address { field: String, value: String },

    #[error("Invalid decimal for {field}: {value}")]
    Decimal { field: String, value: String },

    #[error("{field} has more than 18 fractional digits")]
    TooPrecise { field: String },

    #[error("{field} cannot be negative")]
    Negative { field: String },

    #[error("Invalid integer amount for {field}: {value}")]
    Amount { field: String, value: String },

    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error(transparent)]
    Quote(#[from] QuoteError),
}
