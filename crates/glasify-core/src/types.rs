//! # Shared Types
//!
//! Small types shared by several calculators.
//!
//! ## Measure Basis
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Adjustments and services are both priced "per something":              │
//! │                                                                         │
//! │  Adjustment unit   Service unit   Basis       Quantity                  │
//! │  ───────────────   ────────────   ─────────   ──────────────────────    │
//! │  fixed             unit           Each        1                         │
//! │  sqm               sqm            Area        Dimensions::area_m2       │
//! │  ml                ml             Perimeter   Dimensions::perimeter_m   │
//! │                                                                         │
//! │  The labels differ per entity; the quantity resolution is identical.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::dimensions::Dimensions;

/// What a per-unit rate is multiplied by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MeasureBasis {
    /// Flat: quantity is always 1.
    Each,
    /// Billable area in m².
    Area,
    /// Perimeter in linear metres.
    Perimeter,
}

impl MeasureBasis {
    /// Resolves the billable quantity against one set of dimensions.
    pub fn quantity(&self, dimensions: &Dimensions) -> Decimal {
        match self {
            MeasureBasis::Each => Decimal::ONE,
            MeasureBasis::Area => dimensions.area_m2(),
            MeasureBasis::Perimeter => dimensions.perimeter_m(),
        }
    }
}
