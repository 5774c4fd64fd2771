//! # Adjustments
//!
//! Named, signed line items: surcharges (positive) and discounts (negative).
//!
//! ```text
//! amount = quantity(unit) × value      fixed → 1
//!          negated when !is_positive   sqm   → area_m2
//!                                      ml    → perimeter_m
//! ```
//!
//! Output order always matches input order; a quote lists its lines in the
//! order they were entered.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::dimensions::Dimensions;
use crate::money::Money;
use crate::types::MeasureBasis;

/// How an adjustment value is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentUnit {
    /// Flat amount.
    Fixed,
    /// Per square metre of billable area.
    Sqm,
    /// Per linear metre of perimeter.
    Ml,
}

impl AdjustmentUnit {
    pub fn basis(&self) -> MeasureBasis {
        match self {
            AdjustmentUnit::Fixed => MeasureBasis::Each,
            AdjustmentUnit::Sqm => MeasureBasis::Area,
            AdjustmentUnit::Ml => MeasureBasis::Perimeter,
        }
    }
}

/// One adjustment supplied with a calculation. Never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    pub id: String,
    /// Display label, e.g. "Curved frame" or "Loyalty discount".
    pub concept: String,
    pub unit: AdjustmentUnit,
    /// Rate per unit, always non-negative; the sign comes from `is_positive`.
    pub value: Money,
    pub is_positive: bool,
}

/// Priced adjustment line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentResult {
    pub adjustment_id: String,
    pub concept: String,
    /// Signed amount: negative for discounts.
    pub amount: Money,
}

/// Prices every adjustment against the billable dimensions.
pub fn calculate_adjustments(
    adjustments: &[Adjustment],
    dimensions: &Dimensions,
) -> Vec<AdjustmentResult> {
    adjustments
        .iter()
        .map(|adjustment| {
            let base = adjustment
                .value
                .multiply(adjustment.unit.basis().quantity(dimensions));

            AdjustmentResult {
                adjustment_id: adjustment.id.clone(),
                concept: adjustment.concept.clone(),
                amount: if adjustment.is_positive { base } else { -base },
            }
        })
        .collect()
}

/// Signed total of all adjustment lines.
pub fn sum_adjustments(results: &[AdjustmentResult]) -> Money {
    results.iter().map(|r| r.amount).sum()
}
