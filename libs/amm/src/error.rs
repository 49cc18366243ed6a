//! Quote engine error kinds

use thiserror::Error;

/// Every failure the quote engine can surface to a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuoteError {
    #[error("Asset not found in pool")]
    AssetNotFound,

    #[error("Assets must be in the same aggregate account")]
    AggregateAccountMismatch,

    #[error("Liability cannot be zero")]
    ZeroLiability,

    #[error("R threshold cannot be zero")]
    ZeroThreshold,

    #[error("Coverage ratio cannot be zero")]
    ZeroRatio,

    #[error("Price not set for variant asset")]
    PriceNotSet,

    #[error("Price cannot be zero")]
    ZeroPrice,

    #[error("Insufficient cash in destination asset")]
    InsufficientCash,

    #[error("Swap amount must be positive")]
    InvalidAmount,

    #[error("Division by zero in fixed-point arithmetic")]
    DivisionByZero,

    #[error("Arithmetic overflow in fixed-point arithmetic")]
    Overflow,

    #[error("Invalid pool configuration: {0}")]
    InvalidConfig(&'static str),
}

impl QuoteError {
    /// Expected "swap not currently possible" outcomes, as opposed to a
    /// malformed pool state or an arithmetic defect.
    pub fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            QuoteError::AssetNotFound
                | QuoteError::AggregateAccountMismatch
                | QuoteError::InvalidAmount
                | QuoteError::InsufficientCash
        )
    }
}

pub type QuoteResult<T> = Result<T, QuoteError>;
