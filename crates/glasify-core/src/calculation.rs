//! # Price Calculation
//!
//! The orchestrator: composes every calculator into one itemized breakdown.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PriceCalculationInput                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. margin ∈ [0, 1)  ─────────────────────────► InvalidMargin           │
//! │  2. Dimensions::from_input ───────────────────► InvalidDimensions       │
//! │     + field rules (validation.rs) ────────────► Validation / Coordinates│
//! │                                                 / InvalidMoneyValue     │
//! │       │                                                                 │
//! │       ▼     (bounded inputs: only steps 10-11 can overflow)             │
//! │  3. profile     = (w·rate_w + h·rate_h) × color                        │
//! │  4. glass       = glass_area × price_m² × color                        │
//! │  5. accessory   = accessory_price × color                              │
//! │  6. adjustments = Σ ±value × qty(unit)                                 │
//! │  7. services    = Σ selected rate × qty(unit)                          │
//! │  8. transport   = base + per_km × km            (or 0)                 │
//! │  9. cost basis  = base + 3..8                                          │
//! │ 10. margin      = cost basis × m / (1 − m)                             │
//! │ 11. total       = cost basis + margin                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Margin Convention (markup on revenue)
//! The margin is a fraction of the FINAL price, so
//! `margin_amount / total == m`. With a 30% margin and a 700 cost basis the
//! total is 1000, not 910.
//!
//! A margin just below 1 can push `m / (1 − m)` past the decimal range. That
//! is reported as `InvalidMargin` instead of overflowing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::accessory::calculate_accessory_cost;
use crate::adjustment::{calculate_adjustments, sum_adjustments, Adjustment, AdjustmentResult};
use crate::dimensions::{Dimensions, DimensionsInput};
use crate::error::{PricingError, PricingResult};
use crate::glass_area::{calculate_glass_area, GlassDiscounts};
use crate::money::Money;
use crate::profile::calculate_profile_cost;
use crate::service::{calculate_services, sum_services, Service, ServiceResult};
use crate::transportation::{calculate_transportation_leg, TransportationCost, TransportationInput};
use crate::validation::{
    validate_adjustments, validate_color_multiplier, validate_glass_discounts, validate_margin,
    validate_price, validate_services, validate_transportation,
};

fn default_color_multiplier() -> Decimal {
    Decimal::ONE
}

// =============================================================================
// Input
// =============================================================================

/// Everything one price calculation needs, fully resolved by the caller
/// (catalog records loaded, delivery address geocoded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceCalculationInput {
    pub dimensions: DimensionsInput,

    /// Model base price.
    pub base_price: Money,

    /// Profile cost per millimetre of width.
    pub cost_per_mm_width: Money,

    /// Profile cost per millimetre of height.
    pub cost_per_mm_height: Money,

    #[serde(default)]
    pub accessory_price: Money,

    /// Glass type price per m².
    pub glass_price_per_sqm: Money,

    #[serde(default)]
    pub glass_discounts: GlassDiscounts,

    /// 1 = standard color; 1.15 = 15% surcharge.
    #[serde(default = "default_color_multiplier")]
    #[ts(type = "string")]
    pub color_multiplier: Decimal,

    /// Profit margin as a fraction of the final price, in `[0, 1)`.
    #[ts(type = "string")]
    pub margin: Decimal,

    #[serde(default)]
    pub adjustments: Vec<Adjustment>,

    /// Services offered for the model.
    #[serde(default)]
    pub services: Vec<Service>,

    /// Ids of the services the customer picked.
    #[serde(default)]
    pub selected_service_ids: Vec<String>,

    #[serde(default)]
    pub transportation: Option<TransportationInput>,
}

// =============================================================================
// Result
// =============================================================================

/// Itemized breakdown of one calculation.
///
/// `total == cost_basis + margin_amount` and `cost_basis` is the exact sum
/// of the components above it; no component is rounded.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceCalculationResult {
    pub dimensions: Dimensions,
    pub base_price: Money,
    pub profile_cost: Money,
    #[ts(type = "string")]
    pub glass_area_m2: Decimal,
    pub glass_cost: Money,
    pub accessory_cost: Money,
    pub adjustments: Vec<AdjustmentResult>,
    pub adjustments_total: Money,
    pub services: Vec<ServiceResult>,
    pub services_total: Money,
    pub transportation: Option<TransportationCost>,
    pub transportation_cost: Money,
    pub cost_basis: Money,
    #[ts(type = "string")]
    pub margin: Decimal,
    pub margin_amount: Money,
    pub total: Money,
}

/// Kind of a display row in a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    Base,
    Profile,
    Glass,
    Accessory,
    Adjustment,
    Service,
    Transportation,
    Margin,
}

/// One display row of a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub kind: LineItemKind,
    pub label: String,
    pub amount: Money,
}

impl PriceCalculationResult {
    /// Ordered rows for a quote, PDF or spreadsheet.
    ///
    /// The accessory row is skipped when zero and the transportation row
    /// when there is no delivery leg. Each adjustment and service gets its
    /// own row. The rows sum to `total`.
    pub fn line_items(&self) -> Vec<LineItem> {
        let mut rows = vec![
            LineItem {
                kind: LineItemKind::Base,
                label: "Base price".to_string(),
                amount: self.base_price,
            },
            LineItem {
                kind: LineItemKind::Profile,
                label: "Profile".to_string(),
                amount: self.profile_cost,
            },
            LineItem {
                kind: LineItemKind::Glass,
                label: format!("Glass ({} m²)", self.glass_area_m2.normalize()),
                amount: self.glass_cost,
            },
        ];

        if !self.accessory_cost.is_zero() {
            rows.push(LineItem {
                kind: LineItemKind::Accessory,
                label: "Accessories".to_string(),
                amount: self.accessory_cost,
            });
        }

        rows.extend(self.adjustments.iter().map(|a| LineItem {
            kind: LineItemKind::Adjustment,
            label: a.concept.clone(),
            amount: a.amount,
        }));

        rows.extend(self.services.iter().map(|s| LineItem {
            kind: LineItemKind::Service,
            label: s.name.clone(),
            amount: s.amount,
        }));

        if let Some(leg) = &self.transportation {
            rows.push(LineItem {
                kind: LineItemKind::Transportation,
                label: format!("Transportation ({} km)", leg.distance_km.normalize()),
                amount: leg.cost,
            });
        }

        rows.push(LineItem {
            kind: LineItemKind::Margin,
            label: "Margin".to_string(),
            amount: self.margin_amount,
        });

        rows
    }

    /// Total rounded half-up for display.
    pub fn total_rounded(&self, decimals: u32) -> Money {
        self.total.round_dp(decimals)
    }
}

// =============================================================================
// Orchestrator
// =============================================================================

/// Runs every check in [`validation`](crate::validation) on an input.
///
/// The margin is checked first so an impossible margin is reported even
/// when other fields are also wrong.
pub fn validate_input(input: &PriceCalculationInput) -> PricingResult<Dimensions> {
    validate_margin(input.margin)?;
    let dimensions = Dimensions::from_input(&input.dimensions)?;

    validate_price("base_price", input.base_price)?;
    validate_price("cost_per_mm_width", input.cost_per_mm_width)?;
    validate_price("cost_per_mm_height", input.cost_per_mm_height)?;
    validate_price("accessory_price", input.accessory_price)?;
    validate_price("glass_price_per_sqm", input.glass_price_per_sqm)?;
    validate_color_multiplier(input.color_multiplier)?;
    validate_glass_discounts(&input.glass_discounts)?;
    validate_adjustments(&input.adjustments)?;
    validate_services(&input.services, &input.selected_service_ids)?;
    if let Some(leg) = &input.transportation {
        validate_transportation(leg)?;
    }

    Ok(dimensions)
}

/// Prices one opening.
///
/// Pure and deterministic: identical input gives an identical result, and
/// concurrent calls share nothing.
///
/// ## Errors
/// `InvalidMargin`, `InvalidDimensions`, `InvalidCoordinates`,
/// `InvalidMoneyValue` or `Validation`, before any computation. The one
/// exception is `InvalidMargin` for a margin so close to 1 that the total
/// leaves the decimal range.
pub fn calculate_price(input: &PriceCalculationInput) -> PricingResult<PriceCalculationResult> {
    let dimensions = validate_input(input)?;
    let color = input.color_multiplier;

    let profile_cost = calculate_profile_cost(
        &dimensions,
        input.cost_per_mm_width,
        input.cost_per_mm_height,
        color,
    );

    let glass_area_m2 = calculate_glass_area(
        dimensions.width_mm(),
        dimensions.height_mm(),
        &input.glass_discounts,
    );
    let glass_cost = input
        .glass_price_per_sqm
        .multiply(glass_area_m2)
        .multiply(color);

    let accessory_cost = calculate_accessory_cost(input.accessory_price, color);

    let adjustments = calculate_adjustments(&input.adjustments, &dimensions);
    let adjustments_total = sum_adjustments(&adjustments);

    let services = calculate_services(&input.services, &input.selected_service_ids, &dimensions);
    let services_total = sum_services(&services);

    let transportation = input
        .transportation
        .as_ref()
        .map(calculate_transportation_leg)
        .transpose()?;
    let transportation_cost = transportation
        .as_ref()
        .map(|leg| leg.cost)
        .unwrap_or_default();

    let cost_basis = [
        profile_cost,
        glass_cost,
        accessory_cost,
        adjustments_total,
        services_total,
        transportation_cost,
    ]
    .into_iter()
    .try_fold(input.base_price, |acc, part| acc.checked_add(part))?;

    let (margin_amount, total) = apply_margin(cost_basis, input.margin)?;

    tracing::debug!(
        area_m2 = %dimensions.area_m2(),
        cost_basis = %cost_basis,
        total = %total,
        adjustments = adjustments.len(),
        services = services.len(),
        "price calculated"
    );

    Ok(PriceCalculationResult {
        dimensions,
        base_price: input.base_price,
        profile_cost,
        glass_area_m2,
        glass_cost,
        accessory_cost,
        adjustments,
        adjustments_total,
        services,
        services_total,
        transportation,
        transportation_cost,
        cost_basis,
        margin: input.margin,
        margin_amount,
        total,
    })
}

/// Returns `(margin_amount, total)` for a validated margin.
fn apply_margin(cost_basis: Money, margin: Decimal) -> PricingResult<(Money, Money)> {
    // multiply before dividing so terminating results stay exact;
    // validate_margin guarantees 1 − m > 0
    let margin_amount = cost_basis
        .amount()
        .checked_mul(margin)
        .and_then(|part| part.checked_div(Decimal::ONE - margin))
        .map(Money::from_decimal)
        .ok_or(PricingError::InvalidMargin { margin })?;
    let total = cost_basis
        .checked_add(margin_amount)
        .map_err(|_| PricingError::InvalidMargin { margin })?;
    Ok((margin_amount, total))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjustment::AdjustmentUnit;
    use crate::error::ValidationError;
    use crate::service::ServiceUnit;
    use crate::transportation::Coordinates;
    use rust_decimal_macros::dec;

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    /// 1000 × 2000 mm window, round numbers throughout.
    fn window() -> PriceCalculationInput {
        PriceCalculationInput {
            dimensions: DimensionsInput {
                width_mm: dec!(1000),
                height_mm: dec!(2000),
                min_width_mm: dec!(800),
                min_height_mm: dec!(800),
                max_width_mm: None,
                max_height_mm: None,
            },
            base_price: money("100"),
            cost_per_mm_width: money("0.05"),
            cost_per_mm_height: money("0.04"),
            accessory_price: money("50"),
            glass_price_per_sqm: money("40"),
            glass_discounts: GlassDiscounts {
                width_mm: dec!(50),
                height_mm: dec!(50),
            },
            color_multiplier: Decimal::ONE,
            margin: dec!(0.30),
            adjustments: vec![],
            services: vec![],
            selected_service_ids: vec![],
            transportation: None,
        }
    }

    #[test]
    fn test_basic_breakdown() {
        let result = calculate_price(&window()).unwrap();

        assert_eq!(result.profile_cost, money("130"));
        assert_eq!(result.glass_area_m2, dec!(1.8525));
        assert_eq!(result.glass_cost, money("74.10"));
        assert_eq!(result.accessory_cost, money("50"));
        assert!(result.adjustments_total.is_zero());
        assert!(result.services_total.is_zero());
        assert!(result.transportation.is_none());
        assert!(result.transportation_cost.is_zero());
        assert_eq!(result.cost_basis, money("354.10"));
        assert_eq!(result.total, result.cost_basis + result.margin_amount);
    }

    #[test]
    fn test_margin_on_sale_price() {
        let mut input = window();
        input.base_price = money("570");
        input.accessory_price = Money::zero();
        input.glass_price_per_sqm = Money::zero();
        // cost basis = 570 + 130 = 700
        let result = calculate_price(&input).unwrap();
        assert_eq!(result.cost_basis, money("700"));
        assert_eq!(result.margin_amount, money("300"));
        assert_eq!(result.total, money("1000"));
    }

    #[test]
    fn test_zero_margin() {
        let mut input = window();
        input.margin = Decimal::ZERO;
        let result = calculate_price(&input).unwrap();
        assert!(result.margin_amount.is_zero());
        assert_eq!(result.total, result.cost_basis);
    }

    #[test]
    fn test_color_multiplier_applies_to_profile_glass_and_accessory() {
        let mut input = window();
        input.color_multiplier = dec!(1.1);
        let result = calculate_price(&input).unwrap();
        assert_eq!(result.profile_cost, money("143"));
        assert_eq!(result.glass_cost, money("81.51"));
        assert_eq!(result.accessory_cost, money("55"));
        // the base price is not surcharged
        assert_eq!(result.base_price, money("100"));
    }

    #[test]
    fn test_adjustments_services_and_transport() {
        let mut input = window();
        input.adjustments = vec![
            Adjustment {
                id: "curve".to_string(),
                concept: "Curved frame".to_string(),
                unit: AdjustmentUnit::Sqm,
                value: money("10"),
                is_positive: true,
            },
            Adjustment {
                id: "promo".to_string(),
                concept: "Promo".to_string(),
                unit: AdjustmentUnit::Ml,
                value: money("5"),
                is_positive: false,
            },
        ];
        input.services = vec![
            Service {
                id: "install".to_string(),
                name: "Installation".to_string(),
                unit: ServiceUnit::Unit,
                rate: money("80"),
            },
            Service {
                id: "seal".to_string(),
                name: "Sealing".to_string(),
                unit: ServiceUnit::Ml,
                rate: money("3"),
            },
        ];
        input.selected_service_ids = vec!["install".to_string()];
        let here = Coordinates::new(4.65, -74.05).unwrap();
        input.transportation = Some(TransportationInput {
            warehouse: here,
            destination: here,
            base_rate: money("25"),
            per_km_rate: money("1.5"),
            review_threshold_km: None,
        });

        let result = calculate_price(&input).unwrap();
        assert_eq!(result.adjustments_total, money("-10"));
        assert_eq!(result.services.len(), 1);
        assert_eq!(result.services_total, money("80"));
        assert_eq!(result.transportation_cost, money("25"));
        assert_eq!(
            result.cost_basis,
            money("354.10") + money("-10") + money("80") + money("25")
        );
    }

    #[test]
    fn test_margin_rejected_before_anything_else() {
        let mut input = window();
        input.margin = dec!(1.0);
        // also broken, but the margin is reported
        input.dimensions.width_mm = Decimal::ZERO;
        assert!(matches!(
            calculate_price(&input),
            Err(PricingError::InvalidMargin { .. })
        ));

        input.margin = dec!(1.2);
        assert!(matches!(
            calculate_price(&input),
            Err(PricingError::InvalidMargin { .. })
        ));
    }

    #[test]
    fn test_margin_too_close_to_one_is_an_error() {
        let mut input = window();
        input.base_price = money("1000");
        input.margin = dec!(0.9999999999999999999999999999);
        assert!(matches!(
            calculate_price(&input),
            Err(PricingError::InvalidMargin { .. })
        ));

        // steep but representable margins still price
        input.margin = dec!(0.9999);
        let result = calculate_price(&input).unwrap();
        assert_eq!(result.total, result.cost_basis + result.margin_amount);
    }

    #[test]
    fn test_oversized_base_price_rejected() {
        let mut input = window();
        input.base_price = Money::from_decimal(dec!(70_000_000_000_000_000_000_000_000_000));
        input.margin = dec!(0.5);
        let err = calculate_price(&input).unwrap_err();
        assert!(matches!(err, PricingError::InvalidMoneyValue { .. }));
        assert_eq!(err.code(), "INVALID_MONEY_VALUE");
    }

    #[test]
    fn test_negative_price_is_a_money_error() {
        let mut input = window();
        input.glass_price_per_sqm = money("-40");
        let err = calculate_price(&input).unwrap_err();
        assert_eq!(err.code(), "INVALID_MONEY_VALUE");
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let mut input = window();
        input.dimensions.width_mm = Decimal::from(10_000_000_000_000_000_000_u64);
        input.dimensions.height_mm = Decimal::from(10_000_000_000_000_000_000_u64);
        assert!(matches!(
            calculate_price(&input),
            Err(PricingError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_largest_accepted_input_prices_without_overflow() {
        let max_money = Money::from_decimal(crate::MAX_INPUT_AMOUNT);
        let mut input = window();
        input.dimensions.width_mm = crate::MAX_DIMENSION_MM;
        input.dimensions.height_mm = crate::MAX_DIMENSION_MM;
        input.glass_discounts = GlassDiscounts::default();
        input.base_price = max_money;
        input.cost_per_mm_width = max_money;
        input.cost_per_mm_height = max_money;
        input.accessory_price = max_money;
        input.glass_price_per_sqm = max_money;
        input.color_multiplier = crate::MAX_COLOR_MULTIPLIER;
        input.margin = dec!(0.5);

        let result = calculate_price(&input).unwrap();
        assert_eq!(result.total, result.cost_basis + result.cost_basis);
    }

    #[test]
    fn test_oversized_color_multiplier_rejected() {
        let mut input = window();
        input.color_multiplier = dec!(1000);
        assert!(matches!(
            calculate_price(&input),
            Err(PricingError::Validation(ValidationError::TooLarge { .. }))
        ));
    }

    #[test]
    fn test_invalid_dimensions_propagate() {
        let mut input = window();
        input.dimensions.height_mm = dec!(-1);
        assert!(matches!(
            calculate_price(&input),
            Err(PricingError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_invalid_coordinates_propagate() {
        let mut input = window();
        input.transportation = Some(TransportationInput {
            warehouse: Coordinates {
                latitude: 100.0,
                longitude: 0.0,
            },
            destination: Coordinates::new(0.0, 0.0).unwrap(),
            base_rate: money("1"),
            per_km_rate: money("1"),
            review_threshold_km: None,
        });
        assert!(matches!(
            calculate_price(&input),
            Err(PricingError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_unknown_selected_service_rejected() {
        let mut input = window();
        input.selected_service_ids = vec!["install".to_string()];
        assert!(matches!(
            calculate_price(&input),
            Err(PricingError::Validation(_))
        ));
    }

    #[test]
    fn test_line_items_sum_to_total() {
        let mut input = window();
        input.adjustments = vec![Adjustment {
            id: "x".to_string(),
            concept: "Extra".to_string(),
            unit: AdjustmentUnit::Fixed,
            value: money("12.345"),
            is_positive: true,
        }];
        let result = calculate_price(&input).unwrap();
        let rows = result.line_items();
        assert_eq!(rows.first().map(|r| r.kind), Some(LineItemKind::Base));
        assert_eq!(rows.last().map(|r| r.kind), Some(LineItemKind::Margin));
        assert!(rows.iter().any(|r| r.label == "Extra"));
        let sum: Money = rows.iter().map(|r| r.amount).sum();
        assert_eq!(sum, result.total);
    }

    #[test]
    fn test_deserialize_minimal_input() {
        let json = r#"{
            "dimensions": {"widthMm": "1000", "heightMm": "2000"},
            "basePrice": "100",
            "costPerMmWidth": "0.05",
            "costPerMmHeight": "0.04",
            "glassPricePerSqm": "40",
            "margin": "0.3"
        }"#;
        let input: PriceCalculationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.color_multiplier, Decimal::ONE);
        assert!(input.accessory_price.is_zero());
        assert!(input.transportation.is_none());
        let result = calculate_price(&input).unwrap();
        assert_eq!(result.glass_area_m2, dec!(2));
    }
}
