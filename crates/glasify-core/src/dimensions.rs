//! # Dimensions Module
//!
//! Validated width × height of an opening, with the billable minimum size.
//!
//! ## Billable Minimum
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  A model configured with min 800 × 800 mm:                              │
//! │                                                                         │
//! │   ordered 600 × 1200  ──► billed as 800 × 1200                          │
//! │   ordered 900 × 1200  ──► billed as 900 × 1200                          │
//! │   ordered   0 × 1200  ──► InvalidDimensions (raw size is never clamped  │
//! │                           into validity)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every derived value is computed once in the constructor, so one price
//! calculation sees a single stable area and perimeter.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};
use crate::{MAX_DIMENSION_MM, MM_PER_METER};

// =============================================================================
// Dimensions Input
// =============================================================================

/// Raw size of an opening as supplied by the caller, in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DimensionsInput {
    #[ts(type = "string")]
    pub width_mm: Decimal,
    #[ts(type = "string")]
    pub height_mm: Decimal,
    /// Billable minimum width (0 = no minimum).
    #[serde(default)]
    #[ts(type = "string")]
    pub min_width_mm: Decimal,
    /// Billable minimum height (0 = no minimum).
    #[serde(default)]
    #[ts(type = "string")]
    pub min_height_mm: Decimal,
    /// Largest width the model can be manufactured at.
    #[serde(default)]
    #[ts(type = "string | null")]
    pub max_width_mm: Option<Decimal>,
    /// Largest height the model can be manufactured at.
    #[serde(default)]
    #[ts(type = "string | null")]
    pub max_height_mm: Option<Decimal>,
}

// =============================================================================
// Dimensions
// =============================================================================

/// Immutable, validated dimensions of one opening.
///
/// Only constructible through [`Dimensions::new`] or
/// [`Dimensions::from_input`]; there is no `Deserialize`, so an invalid value
/// can never enter a calculation from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    #[ts(type = "string")]
    width_mm: Decimal,
    #[ts(type = "string")]
    height_mm: Decimal,
    #[ts(type = "string")]
    effective_width_mm: Decimal,
    #[ts(type = "string")]
    effective_height_mm: Decimal,
    #[ts(type = "string")]
    effective_width_m: Decimal,
    #[ts(type = "string")]
    effective_height_m: Decimal,
    #[ts(type = "string")]
    area_m2: Decimal,
    #[ts(type = "string")]
    perimeter_m: Decimal,
}

impl Dimensions {
    /// Validates a raw size and applies the billable minimum.
    ///
    /// ## Example
    /// ```rust
    /// use glasify_core::dimensions::Dimensions;
    /// use rust_decimal::Decimal;
    ///
    /// let d = Dimensions::new(
    ///     Decimal::from(600),
    ///     Decimal::from(2000),
    ///     Decimal::from(800),
    ///     Decimal::from(800),
    /// ).unwrap();
    /// assert_eq!(d.effective_width_mm(), Decimal::from(800));
    /// assert_eq!(d.area_m2(), Decimal::new(16, 1)); // 0.8 × 2.0
    /// ```
    pub fn new(
        width_mm: Decimal,
        height_mm: Decimal,
        min_width_mm: Decimal,
        min_height_mm: Decimal,
    ) -> PricingResult<Self> {
        if width_mm <= Decimal::ZERO {
            return Err(PricingError::invalid_dimensions(format!(
                "width must be positive, got {} mm",
                width_mm
            )));
        }
        if height_mm <= Decimal::ZERO {
            return Err(PricingError::invalid_dimensions(format!(
                "height must be positive, got {} mm",
                height_mm
            )));
        }
        if min_width_mm < Decimal::ZERO || min_height_mm < Decimal::ZERO {
            return Err(PricingError::invalid_dimensions(format!(
                "minimum size must not be negative, got {} × {} mm",
                min_width_mm, min_height_mm
            )));
        }
        for (what, value) in [
            ("width", width_mm),
            ("height", height_mm),
            ("minimum width", min_width_mm),
            ("minimum height", min_height_mm),
        ] {
            if value > MAX_DIMENSION_MM {
                return Err(PricingError::invalid_dimensions(format!(
                    "{} {} mm exceeds the supported {} mm",
                    what, value, MAX_DIMENSION_MM
                )));
            }
        }

        let effective_width_mm = width_mm.max(min_width_mm);
        let effective_height_mm = height_mm.max(min_height_mm);
        let effective_width_m = effective_width_mm / MM_PER_METER;
        let effective_height_m = effective_height_mm / MM_PER_METER;

        Ok(Dimensions {
            width_mm,
            height_mm,
            effective_width_mm,
            effective_height_mm,
            effective_width_m,
            effective_height_m,
            area_m2: effective_width_m * effective_height_m,
            perimeter_m: Decimal::TWO * (effective_width_mm + effective_height_mm) / MM_PER_METER,
        })
    }

    /// Builds dimensions from caller input, enforcing the optional
    /// manufacturing maximum on the raw size.
    pub fn from_input(input: &DimensionsInput) -> PricingResult<Self> {
        let dimensions = Dimensions::new(
            input.width_mm,
            input.height_mm,
            input.min_width_mm,
            input.min_height_mm,
        )?;

        check_maximum("width", input.width_mm, input.min_width_mm, input.max_width_mm)?;
        check_maximum(
            "height",
            input.height_mm,
            input.min_height_mm,
            input.max_height_mm,
        )?;

        Ok(dimensions)
    }

    /// Width as ordered.
    pub fn width_mm(&self) -> Decimal {
        self.width_mm
    }

    /// Height as ordered.
    pub fn height_mm(&self) -> Decimal {
        self.height_mm
    }

    /// `max(width, min_width)`.
    pub fn effective_width_mm(&self) -> Decimal {
        self.effective_width_mm
    }

    /// `max(height, min_height)`.
    pub fn effective_height_mm(&self) -> Decimal {
        self.effective_height_mm
    }

    pub fn effective_width_m(&self) -> Decimal {
        self.effective_width_m
    }

    pub fn effective_height_m(&self) -> Decimal {
        self.effective_height_m
    }

    /// Billable area in m².
    pub fn area_m2(&self) -> Decimal {
        self.area_m2
    }

    /// Billable perimeter in linear metres.
    pub fn perimeter_m(&self) -> Decimal {
        self.perimeter_m
    }

    /// True when the billable minimum raised either side.
    pub fn is_clamped(&self) -> bool {
        self.effective_width_mm != self.width_mm || self.effective_height_mm != self.height_mm
    }
}

fn check_maximum(
    axis: &str,
    raw: Decimal,
    minimum: Decimal,
    maximum: Option<Decimal>,
) -> PricingResult<()> {
    let Some(max) = maximum else {
        return Ok(());
    };
    if max < minimum {
        return Err(PricingError::invalid_dimensions(format!(
            "maximum {} {} mm is below the minimum {} mm",
            axis, max, minimum
        )));
    }
    if raw > max {
        return Err(PricingError::invalid_dimensions(format!(
            "{} {} mm exceeds the maximum of {} mm",
            axis, raw, max
        )));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
