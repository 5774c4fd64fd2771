//! # Profile Cost
//!
//! Structural frame cost from the billable linear size and per-mm rates.
//!
//! ```text
//! cost = (eff_width_mm × rate_w + eff_height_mm × rate_h) × color_multiplier
//!                                                          └── applied once,
//!                                                              not per axis
//! ```

use rust_decimal::Decimal;

use crate::dimensions::Dimensions;
use crate::money::Money;

/// Profile cost for one opening.
///
/// `color_multiplier` of 1 means the standard finish; 1.15 is a 15%
/// surcharge for a non-standard color.
pub fn calculate_profile_cost(
    dimensions: &Dimensions,
    cost_per_mm_width: Money,
    cost_per_mm_height: Money,
    color_multiplier: Decimal,
) -> Money {
    let width_cost = cost_per_mm_width.multiply(dimensions.effective_width_mm());
    let height_cost = cost_per_mm_height.multiply(dimensions.effective_height_mm());

    (width_cost + height_cost).multiply(color_multiplier)
}
