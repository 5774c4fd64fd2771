//! # glasify-core: Pure Pricing Engine for Glasify
//!
//! This crate is the **heart** of Glasify quoting. It turns fully-resolved
//! numeric input (sizes, prices, rates, percentages, coordinates) into an
//! itemized price breakdown, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Glasify Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web client (catalog, cart)                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ typed RPC (ts-rs bindings)             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   glasify-quote: config, geocoded destination, Quote workflow   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ PriceCalculationInput                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ glasify-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   Money  Dimensions  glass_area  profile  accessory             │   │
//! │  │   adjustment  service  transportation  ──►  calculation         │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Exact decimal `Money`
//! - [`dimensions`] - Validated size with billable minimum
//! - [`glass_area`] - Visible glass area after profile discounts
//! - [`profile`], [`accessory`] - Color-surcharged material costs
//! - [`adjustment`], [`service`] - Per-unit line items
//! - [`transportation`] - Haversine delivery surcharge
//! - [`calculation`] - The orchestrator
//! - [`validation`], [`error`] - Input rules and typed errors
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, safe to call concurrently
//! 2. **No I/O**: geocoding and persistence happen before/after, elsewhere
//! 3. **Exact Money**: decimal arithmetic, rounding only when asked
//! 4. **Explicit Errors**: typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use glasify_core::{calculate_price, PriceCalculationInput};
//!
//! let input: PriceCalculationInput = serde_json::from_str(r#"{
//!     "dimensions": {"widthMm": "1000", "heightMm": "2000"},
//!     "basePrice": "100",
//!     "costPerMmWidth": "0.05",
//!     "costPerMmHeight": "0.04",
//!     "glassPricePerSqm": "40",
//!     "margin": "0.3"
//! }"#).unwrap();
//!
//! let result = calculate_price(&input).unwrap();
//! assert_eq!(result.total, result.cost_basis + result.margin_amount);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod accessory;
pub mod adjustment;
pub mod calculation;
pub mod dimensions;
pub mod error;
pub mod glass_area;
pub mod money;
pub mod profile;
pub mod service;
pub mod transportation;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use adjustment::{Adjustment, AdjustmentResult, AdjustmentUnit};
pub use calculation::{
    calculate_price, LineItem, LineItemKind, PriceCalculationInput, PriceCalculationResult,
};
pub use dimensions::{Dimensions, DimensionsInput};
pub use error::{PricingError, PricingResult, ValidationError};
pub use glass_area::GlassDiscounts;
pub use money::Money;
pub use service::{Service, ServiceResult, ServiceUnit};
pub use transportation::{Coordinates, TransportationCost, TransportationInput};
pub use types::MeasureBasis;

// =============================================================================
// Crate-Level Constants
// =============================================================================

use rust_decimal::Decimal;

/// Decimals used whenever money is rounded (display, unit division).
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Millimetres in a metre.
pub const MM_PER_METER: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Delivery distance above which a leg is flagged for manual review.
pub const DEFAULT_REVIEW_THRESHOLD_KM: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Largest accepted price or rate (10^15). Keeps every product and sum of
/// the breakdown inside the 96-bit decimal range.
pub const MAX_INPUT_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Largest accepted width, height or billable minimum, in millimetres (100 m).
pub const MAX_DIMENSION_MM: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Largest accepted color multiplier.
pub const MAX_COLOR_MULTIPLIER: Decimal = Decimal::from_parts(100, 0, 0, false, 0);
