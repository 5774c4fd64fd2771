//! # Money Module
//!
//! Provides the `Money` type for handling monetary values exactly.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    1250 × 1.15 = 1437.4999999999998 ❌ rounds to 1437.50? 1437.49?     │
//! │                                                                         │
//! │  Integer cents do not help either: a profile priced per millimetre     │
//! │  costs 0.0425/mm, which is not a whole number of cents.                │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    1250 × 1.15 = 1437.50 exactly                                       │
//! │    Rounding happens ONLY when dividing into units or for display       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use glasify_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price: Money = "1250".parse().unwrap();
//! let surcharged = price.multiply(Decimal::new(115, 2)); // × 1.15
//! assert_eq!(surcharged.to_string(), "1437.50");
//!
//! // NaN can never become money
//! assert!(Money::from_f64(f64::NAN).is_err());
//! ```

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};
use crate::MONEY_DECIMAL_PLACES;

/// Rounding used everywhere rounding is allowed: half-up at the midpoint.
const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

// =============================================================================
// Money Type
// =============================================================================

/// An exact monetary amount.
///
/// ## Design Decisions
/// - **Decimal (signed)**: Negative values carry discounts and adjustments
/// - **Immutable**: every operation returns a new `Money`
/// - **No rounding in arithmetic**: add/subtract/multiply keep full precision
/// - **Serialized as a string** so JSON clients never parse it into a float
///
/// ## Where Money is Used
/// ```text
/// base price ─┐
/// profile ────┤
/// glass ──────┤
/// accessory ──┼──► cost basis ──► + margin ──► total ──► QuoteItem
/// adjustments ┤
/// services ───┤
/// transport ──┘
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates Money from a float literal.
    ///
    /// ## Errors
    /// `InvalidMoneyValue` for NaN, ±Infinity, or magnitudes a 96-bit
    /// decimal cannot hold.
    ///
    /// ## Example
    /// ```rust
    /// use glasify_core::money::Money;
    ///
    /// assert_eq!(Money::from_f64(10.99).unwrap().to_string(), "10.99");
    /// assert!(Money::from_f64(f64::INFINITY).is_err());
    /// ```
    pub fn from_f64(value: f64) -> PricingResult<Self> {
        if !value.is_finite() {
            return Err(PricingError::invalid_money(format!(
                "{} is not a finite number",
                value
            )));
        }
        Decimal::from_f64(value)
            .map(Money)
            .ok_or_else(|| PricingError::invalid_money(format!("{} is out of range", value)))
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Returns the exact underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Rejects negative amounts, naming the offending field.
    pub fn ensure_non_negative(self, field: &str) -> PricingResult<Self> {
        if self.is_negative() {
            return Err(PricingError::invalid_money(format!(
                "{} must not be negative, got {}",
                field, self.0
            )));
        }
        Ok(self)
    }

    /// Exact sum.
    #[inline]
    pub fn add(&self, other: Money) -> Money {
        Money(self.0 + other.0)
    }

    /// Exact sum that reports overflow instead of panicking.
    pub fn checked_add(&self, other: Money) -> PricingResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| PricingError::invalid_money(format!("{} + {} overflows", self.0, other.0)))
    }

    /// Exact difference.
    #[inline]
    pub fn subtract(&self, other: Money) -> Money {
        Money(self.0 - other.0)
    }

    /// Exact product with a scalar (multiplier, area, rate...).
    ///
    /// ## Example
    /// ```rust
    /// use glasify_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let accessory: Money = "50".parse().unwrap();
    /// assert_eq!(accessory.multiply(Decimal::new(11, 1)), "55".parse().unwrap());
    /// assert!(accessory.multiply(Decimal::ZERO).is_zero());
    /// ```
    #[inline]
    pub fn multiply(&self, factor: Decimal) -> Money {
        Money(self.0 * factor)
    }

    /// Exact product that reports overflow instead of panicking.
    pub fn checked_multiply(&self, factor: Decimal) -> PricingResult<Money> {
        self.0
            .checked_mul(factor)
            .map(Money)
            .ok_or_else(|| PricingError::invalid_money(format!("{} × {} overflows", self.0, factor)))
    }

    /// Splits an amount across `units` (quantity, panes...).
    ///
    /// This is the only arithmetic that rounds: half-up to two decimals.
    ///
    /// ## Example
    /// ```rust
    /// use glasify_core::money::Money;
    ///
    /// let subtotal: Money = "100".parse().unwrap();
    /// assert_eq!(subtotal.divide_by_units(3).unwrap().to_string(), "33.33");
    /// assert!(subtotal.divide_by_units(0).is_err());
    /// ```
    pub fn divide_by_units(&self, units: u32) -> PricingResult<Money> {
        if units == 0 {
            return Err(PricingError::invalid_money("cannot divide into zero units"));
        }
        let share = self.0 / Decimal::from(units);
        Ok(Money(share.round_dp_with_strategy(MONEY_DECIMAL_PLACES, ROUNDING)))
    }

    /// Rounds half-up to `decimals` places (display/persistence only).
    #[inline]
    pub fn round_dp(&self, decimals: u32) -> Money {
        Money(self.0.round_dp_with_strategy(decimals, ROUNDING))
    }

    /// Unrounded value as a float, for callers that only speak numbers.
    pub fn to_number(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    /// Value rounded half-up to `decimals` places, as a float.
    pub fn to_number_dp(&self, decimals: u32) -> f64 {
        self.round_dp(decimals).to_number()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Always shows two decimals, rounded half-up.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut shown = self.0.round_dp_with_strategy(MONEY_DECIMAL_PLACES, ROUNDING);
        shown.rescale(MONEY_DECIMAL_PLACES);
        write!(f, "{}", shown)
    }
}

impl FromStr for Money {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PricingError::invalid_money("empty amount"));
        }
        Decimal::from_str(trimmed)
            .map(Money)
            .map_err(|e| PricingError::invalid_money(format!("'{}': {}", trimmed, e)))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by a decimal scalar.
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: Decimal) -> Self {
        Money(self.0 * factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
