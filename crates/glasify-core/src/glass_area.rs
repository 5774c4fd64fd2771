//! # Glass Area
//!
//! Billable glass area after subtracting the space taken by the profile.
//!
//! ```text
//!   ┌──────────── 1000 mm ────────────┐
//!   │▓▓▓▓▓▓▓▓▓▓▓▓ profile ▓▓▓▓▓▓▓▓▓▓▓▓│
//!   │▓ ┌─────────────────────────┐ ▓│
//!   │▓ │   glass: 950 × 1950 mm  │ ▓│  2000 mm
//!   │▓ └─────────────────────────┘ ▓│
//!   │▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓│
//!   └──────────────────────────────────┘
//! ```
//!
//! Discounts apply to the RAW ordered size, not to the billable minimum
//! used by [`Dimensions`](crate::dimensions::Dimensions): glass is billed on
//! what is physically cut.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::MM_PER_METER;

/// Width/height taken by the surrounding profile, in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GlassDiscounts {
    #[serde(default)]
    #[ts(type = "string")]
    pub width_mm: Decimal,
    #[serde(default)]
    #[ts(type = "string")]
    pub height_mm: Decimal,
}

/// Visible glass area in m².
///
/// Each side is clamped to zero independently; a discount larger than the
/// opening means "no visible glass" and yields exactly 0, never an error.
pub fn calculate_glass_area(width_mm: Decimal, height_mm: Decimal, discounts: &GlassDiscounts) -> Decimal {
    let glass_width = (width_mm - discounts.width_mm).max(Decimal::ZERO);
    let glass_height = (height_mm - discounts.height_mm).max(Decimal::ZERO);

    if glass_width <= Decimal::ZERO || glass_height <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    (glass_width / MM_PER_METER) * (glass_height / MM_PER_METER)
}
