//! # Error Types
//!
//! Domain-specific error types for glasify-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  glasify-core errors (this file)                                        │
//! │  ├── PricingError     - Rejection of a whole calculation                │
//! │  └── ValidationError  - Field-level input rule failures                 │
//! │                                                                         │
//! │  glasify-quote errors (separate crate)                                  │
//! │  ├── QuoteError       - Quote workflow failures                         │
//! │  └── ConfigError      - Configuration loading failures                  │
//! │                                                                         │
//! │  Flow: ValidationError → PricingError → QuoteError → caller            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending value in the message
//! 3. Errors are enum variants, never String
//! 4. Each variant has a stable code the caller maps to a user message
//!
//! Degenerate but valid inputs (a glass discount wider than the opening,
//! no selected services, an empty adjustment list) are NOT errors; they
//! resolve to zero or empty results.

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Errors that reject an entire price calculation.
///
/// Raised synchronously before any result is produced. The core never
/// returns a partial breakdown alongside one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// A monetary amount could not be represented.
    ///
    /// ## When This Occurs
    /// - Built from NaN or ±Infinity
    /// - A price or rate is negative or above `MAX_INPUT_AMOUNT`
    /// - A checked sum or product leaves the decimal range
    /// - Text that does not parse as a decimal
    /// - Division into zero units
    #[error("Invalid money value: {reason}")]
    InvalidMoneyValue { reason: String },

    /// Width/height input is unusable.
    ///
    /// Zero or negative raw sizes are always rejected, even when the
    /// billable minimum would lift them to a positive value.
    #[error("Invalid dimensions: {reason}")]
    InvalidDimensions { reason: String },

    /// A coordinate lies outside WGS84 bounds.
    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Profit margin outside `[0, 1)`.
    ///
    /// ## Why 1 is excluded
    /// ```text
    /// margin_amount = cost × m / (1 − m)
    ///
    ///   m = 0.30 → cost × 0.4286
    ///   m = 0.99 → cost × 99
    ///   m = 1.00 → division by zero ❌
    /// ```
    #[error("Invalid margin {margin}: must be at least 0 and below 1 (100%)")]
    InvalidMargin { margin: Decimal },

    /// Field-level validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl PricingError {
    /// Machine-readable code for the calling layer.
    pub fn code(&self) -> &'static str {
        match self {
            PricingError::InvalidMoneyValue { .. } => "INVALID_MONEY_VALUE",
            PricingError::InvalidDimensions { .. } => "INVALID_DIMENSIONS",
            PricingError::InvalidCoordinates { .. } => "INVALID_COORDINATES",
            PricingError::InvalidMargin { .. } => "INVALID_MARGIN",
            PricingError::Validation(_) => "VALIDATION_ERROR",
        }
    }

    pub(crate) fn invalid_money(reason: impl Into<String>) -> Self {
        PricingError::InvalidMoneyValue {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_dimensions(reason: impl Into<String>) -> Self {
        PricingError::InvalidDimensions {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for individual fields of a calculation input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Value is above the accepted maximum.
    #[error("{field} must not exceed {max}")]
    TooLarge { field: String, max: Decimal },

    /// Two entries share the same identifier.
    #[error("{field} '{value}' is duplicated")]
    Duplicate { field: String, value: String },

    /// An identifier does not refer to any known entry.
    #[error("{field} '{value}' does not match any available entry")]
    UnknownReference { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================
