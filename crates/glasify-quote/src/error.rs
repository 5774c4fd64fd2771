//! # Quote Error Types
//!
//! Error types for the quote workflow and configuration loading.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Pricing      │  │     Workflow            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Io             │  │  PricingError   │  │  ItemNotFound           │ │
//! │  │  Parse          │  │  (from core)    │  │  TooManyItems           │ │
//! │  │  InvalidValue   │  │                 │  │  QuantityOutOfRange     │ │
//! │  │                 │  │                 │  │  InvalidStatus / Empty  │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use glasify_core::PricingError;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::quote::QuoteStatus;

/// Result type alias for quote operations.
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Quote workflow errors.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The pricing core rejected the item input.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// No item with this id in the quote.
    #[error("Quote item not found: {0}")]
    ItemNotFound(String),

    /// Quote already holds the maximum number of items.
    #[error("Quote cannot have more than {max} items")]
    TooManyItems { max: usize },

    /// Quantity outside `1..=max`.
    #[error("Quantity {requested} must be between 1 and {max}")]
    QuantityOutOfRange { requested: u32, max: u32 },

    /// Operation not allowed in the quote's current status.
    #[error("Quote is {current}, cannot {operation}")]
    InvalidStatus {
        current: QuoteStatus,
        operation: &'static str,
    },

    /// An item subtotal too large for the quote total to stay exact.
    #[error("Item subtotal exceeds {limit} for a quote of this size")]
    SubtotalTooLarge { limit: Decimal },

    /// `validity_days` pushes `valid_until` past the representable dates.
    #[error("Quote validity of {days} days is out of range")]
    InvalidValidity { days: u32 },

    /// Sending a quote with no items.
    #[error("Quote has no items")]
    EmptyQuote,

    /// Item name missing.
    #[error("Item name is required")]
    MissingItemName,
}

impl QuoteError {
    /// Machine-readable code for the calling layer.
    pub fn code(&self) -> &'static str {
        match self {
            QuoteError::Pricing(e) => e.code(),
            QuoteError::ItemNotFound(_) => "NOT_FOUND",
            QuoteError::TooManyItems { .. } => "TOO_MANY_ITEMS",
            QuoteError::QuantityOutOfRange { .. } => "QUANTITY_OUT_OF_RANGE",
            QuoteError::InvalidStatus { .. } => "INVALID_STATUS",
            QuoteError::SubtotalTooLarge { .. } => "INVALID_MONEY_VALUE",
            QuoteError::InvalidValidity { .. } => "INVALID_VALIDITY",
            QuoteError::EmptyQuote => "EMPTY_QUOTE",
            QuoteError::MissingItemName => "VALIDATION_ERROR",
        }
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("No config path available")]
    NoConfigPath,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pricing_error_passes_through() {
        let err: QuoteError = PricingError::InvalidMargin { margin: dec!(1) }.into();
        assert_eq!(err.code(), "INVALID_MARGIN");
        assert_eq!(
            err.to_string(),
            "Invalid margin 1: must be at least 0 and below 1 (100%)"
        );
    }

    #[test]
    fn test_error_messages() {
        let err = QuoteError::QuantityOutOfRange {
            requested: 0,
            max: 999,
        };
        assert_eq!(err.to_string(), "Quantity 0 must be between 1 and 999");

        let err = QuoteError::InvalidStatus {
            current: QuoteStatus::Sent,
            operation: "add items",
        };
        assert_eq!(err.to_string(), "Quote is sent, cannot add items");

        let err = QuoteError::InvalidValidity { days: 200_000_000 };
        assert_eq!(err.to_string(), "Quote validity of 200000000 days is out of range");
        assert_eq!(err.code(), "INVALID_VALIDITY");
    }
}
