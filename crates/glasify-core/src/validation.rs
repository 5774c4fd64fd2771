//! # Validation Module
//!
//! Input rules checked before any price is computed.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Client (TypeScript)                                          │
//! │  ├── Form checks (empty, ranges)                                       │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Deserialization (serde)                                      │
//! │  └── Types, unit labels, decimal syntax                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  ├── margin ∈ [0, 1)                                                   │
//! │  ├── prices, rates, discounts, multipliers ≥ 0 and bounded             │
//! │  ├── ids present and unique; selected services exist                   │
//! │  └── coordinates within WGS84                                          │
//! │                                                                         │
//! │  All of it runs before the first calculator: a rejected input never    │
//! │  produces a partial breakdown.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::adjustment::Adjustment;
use crate::error::{PricingError, PricingResult, ValidationError};
use crate::glass_area::GlassDiscounts;
use crate::money::Money;
use crate::service::Service;
use crate::transportation::TransportationInput;
use crate::{MAX_COLOR_MULTIPLIER, MAX_INPUT_AMOUNT};

/// Result type for field-level validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a profit margin expressed as a fraction of the sale price.
///
/// ## Rules
/// - Must be ≥ 0
/// - Must be < 1 (100% would divide by zero in `m / (1 − m)`)
///
/// ## Example
/// ```rust
/// use glasify_core::validation::validate_margin;
/// use rust_decimal::Decimal;
///
/// assert!(validate_margin(Decimal::new(30, 2)).is_ok());   // 30%
/// assert!(validate_margin(Decimal::ONE).is_err());         // 100%
/// ```
pub fn validate_margin(margin: Decimal) -> PricingResult<()> {
    if margin < Decimal::ZERO || margin >= Decimal::ONE {
        return Err(PricingError::InvalidMargin { margin });
    }
    Ok(())
}

/// Validates an amount that can only be a price or a rate.
///
/// ## Rules
/// - Must be ≥ 0
/// - Must be ≤ [`MAX_INPUT_AMOUNT`], so no product or sum in the breakdown
///   can leave the decimal range
///
/// Both failures are `InvalidMoneyValue`.
pub fn validate_price(field: &str, amount: Money) -> PricingResult<()> {
    let amount = amount.ensure_non_negative(field)?;
    if amount.amount() > MAX_INPUT_AMOUNT {
        return Err(PricingError::invalid_money(format!(
            "{} must not exceed {}, got {}",
            field,
            MAX_INPUT_AMOUNT,
            amount.amount()
        )));
    }
    Ok(())
}

/// Validates a non-negative scalar (multiplier, discount, threshold).
pub fn validate_non_negative(field: &str, value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates the color surcharge factor: `0 ≤ multiplier ≤ MAX_COLOR_MULTIPLIER`.
pub fn validate_color_multiplier(multiplier: Decimal) -> ValidationResult<()> {
    validate_non_negative("color_multiplier", multiplier)?;
    if multiplier > MAX_COLOR_MULTIPLIER {
        return Err(ValidationError::TooLarge {
            field: "color_multiplier".to_string(),
            max: MAX_COLOR_MULTIPLIER,
        });
    }
    Ok(())
}

/// Validates profile discounts. Oversized discounts are fine; negative
/// ones would enlarge the glass.
pub fn validate_glass_discounts(discounts: &GlassDiscounts) -> ValidationResult<()> {
    validate_non_negative("glass_discounts.width_mm", discounts.width_mm)?;
    validate_non_negative("glass_discounts.height_mm", discounts.height_mm)
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that every id is non-empty and appears once.
pub fn validate_unique_ids<'a>(
    field: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> ValidationResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: format!("{} id", field),
            });
        }
        if !seen.insert(id) {
            return Err(ValidationError::Duplicate {
                field: field.to_string(),
                value: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Validates the adjustment list.
///
/// ## Rules
/// - Ids present and unique
/// - `value` ≥ 0 (direction comes from `is_positive` alone)
pub fn validate_adjustments(adjustments: &[Adjustment]) -> PricingResult<()> {
    validate_unique_ids("adjustment", adjustments.iter().map(|a| a.id.as_str()))?;
    for adjustment in adjustments {
        validate_price(&format!("adjustment '{}' value", adjustment.id), adjustment.value)?;
    }
    Ok(())
}

/// Validates available services and the customer's selection.
///
/// ## Rules
/// - Service ids present and unique
/// - Rates ≥ 0 (services are never discounts)
/// - Every selected id names an available service
pub fn validate_services(services: &[Service], selected_ids: &[String]) -> PricingResult<()> {
    validate_unique_ids("service", services.iter().map(|s| s.id.as_str()))?;
    for service in services {
        validate_price(&format!("service '{}' rate", service.id), service.rate)?;
    }

    let available: HashSet<&str> = services.iter().map(|s| s.id.as_str()).collect();
    if let Some(unknown) = selected_ids.iter().find(|id| !available.contains(id.as_str())) {
        return Err(ValidationError::UnknownReference {
            field: "selected_service_ids".to_string(),
            value: unknown.clone(),
        }
        .into());
    }
    Ok(())
}

/// Validates a delivery leg: coordinates first, then rates.
pub fn validate_transportation(input: &TransportationInput) -> PricingResult<()> {
    input.warehouse.validate()?;
    input.destination.validate()?;
    validate_price("transportation.base_rate", input.base_rate)?;
    validate_price("transportation.per_km_rate", input.per_km_rate)?;
    if let Some(threshold) = input.review_threshold_km {
        validate_non_negative("transportation.review_threshold_km", threshold)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
