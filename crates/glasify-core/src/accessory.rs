//! # Accessory Cost
//!
//! Fixed hardware (handles, locks, hinges) with the same color surcharge as
//! the profile.

use rust_decimal::Decimal;

use crate::money::Money;

/// `accessory_price × color_multiplier`.
///
/// A zero price or a zero multiplier both yield zero.
#[inline]
pub fn calculate_accessory_cost(accessory_price: Money, color_multiplier: Decimal) -> Money {
    accessory_price.multiply(color_multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn test_accessory_with_surcharge() {
        assert_eq!(calculate_accessory_cost(money("50"), dec!(1.1)), money("55"));
    }

    #[test]
    fn test_zero_price() {
        for multiplier in [dec!(0), dec!(1), dec!(1.1), dec!(2.5)] {
            assert!(calculate_accessory_cost(Money::zero(), multiplier).is_zero());
        }
    }

    #[test]
    fn test_zero_multiplier() {
        for price in ["0.01", "50", "12345.67"] {
            assert!(calculate_accessory_cost(money(price), Decimal::ZERO).is_zero());
        }
    }
}
