//! # Transportation
//!
//! Distance-based delivery surcharge between the warehouse and the site.
//!
//! ## Haversine Distance
//! ```text
//! a = sin²(Δlat/2) + cos(lat1) · cos(lat2) · sin²(Δlon/2)
//! d = 2 · R · asin(√a)                      R = 6,371,000 m
//!
//! km   = round_half_up(d/1000, 3)           metre resolution
//! cost = base_rate + per_km_rate × km
//! ```
//!
//! The cost is priced on the rounded `distance_km` reported with the leg, so
//! a caller can reproduce it from the response alone.
//!
//! Coordinates come from the caller's geocoding step, which runs (with its
//! own timeout and rate limit) BEFORE the calculation. Nothing here blocks.
//!
//! Far destinations are flagged with `requires_review`, never rejected.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{PricingError, PricingResult};
use crate::money::Money;
use crate::DEFAULT_REVIEW_THRESHOLD_KM;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Decimals kept on the distance (metre resolution).
const DISTANCE_KM_DECIMALS: u32 = 3;

// =============================================================================
// Coordinates
// =============================================================================

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Builds a point, rejecting anything outside WGS84 bounds (and NaN).
    pub fn new(latitude: f64, longitude: f64) -> PricingResult<Self> {
        let point = Coordinates {
            latitude,
            longitude,
        };
        point.validate()?;
        Ok(point)
    }

    /// latitude ∈ [-90, 90], longitude ∈ [-180, 180].
    pub fn validate(&self) -> PricingResult<()> {
        let lat_ok = (-90.0..=90.0).contains(&self.latitude);
        let lon_ok = (-180.0..=180.0).contains(&self.longitude);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(PricingError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// Great-circle distance in metres. Inputs must already be validated.
pub fn haversine_distance_m(from: &Coordinates, to: &Coordinates) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // float noise can push √a a hair above 1 for antipodal points
    2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
}

// =============================================================================
// Transportation Input / Cost
// =============================================================================

/// Delivery leg parameters, already geocoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TransportationInput {
    pub warehouse: Coordinates,
    pub destination: Coordinates,
    pub base_rate: Money,
    pub per_km_rate: Money,
    /// Distance above which the leg is flagged (default 1000 km).
    #[serde(default)]
    #[ts(type = "string | null")]
    pub review_threshold_km: Option<Decimal>,
}

/// Priced delivery leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TransportationCost {
    #[ts(type = "string")]
    pub distance_km: Decimal,
    pub cost: Money,
    /// True when the distance exceeds the review threshold.
    pub requires_review: bool,
}

/// Prices one delivery leg with the default 1000 km review threshold.
///
/// ## Example
/// ```rust
/// use glasify_core::money::Money;
/// use glasify_core::transportation::{calculate_transportation, Coordinates};
///
/// let bogota = Coordinates::new(4.7110, -74.0721).unwrap();
/// let base: Money = "30000".parse().unwrap();
/// let per_km: Money = "1200".parse().unwrap();
///
/// let leg = calculate_transportation(&bogota, &bogota, base, per_km).unwrap();
/// assert_eq!(leg.cost, base);
/// assert!(!leg.requires_review);
/// ```
pub fn calculate_transportation(
    warehouse: &Coordinates,
    destination: &Coordinates,
    base_rate: Money,
    per_km_rate: Money,
) -> PricingResult<TransportationCost> {
    calculate_transportation_with_threshold(
        warehouse,
        destination,
        base_rate,
        per_km_rate,
        DEFAULT_REVIEW_THRESHOLD_KM,
    )
}

/// Same as [`calculate_transportation`] with an explicit review threshold.
///
/// The distance is rounded half-up to 3 decimals (whole metres) before it is
/// priced and compared against the threshold.
pub fn calculate_transportation_with_threshold(
    warehouse: &Coordinates,
    destination: &Coordinates,
    base_rate: Money,
    per_km_rate: Money,
    review_threshold_km: Decimal,
) -> PricingResult<TransportationCost> {
    warehouse.validate()?;
    destination.validate()?;

    let distance_m = haversine_distance_m(warehouse, destination);
    let distance_km = Decimal::from_f64(distance_m / 1000.0)
        .ok_or(PricingError::InvalidCoordinates {
            latitude: destination.latitude,
            longitude: destination.longitude,
        })?
        .round_dp_with_strategy(DISTANCE_KM_DECIMALS, RoundingStrategy::MidpointAwayFromZero);

    Ok(TransportationCost {
        distance_km,
        cost: base_rate + per_km_rate.multiply(distance_km),
        requires_review: distance_km > review_threshold_km,
    })
}

/// Prices a [`TransportationInput`].
pub fn calculate_transportation_leg(input: &TransportationInput) -> PricingResult<TransportationCost> {
    calculate_transportation_with_threshold(
        &input.warehouse,
        &input.destination,
        input.base_rate,
        input.per_km_rate,
        input
            .review_threshold_km
            .unwrap_or(DEFAULT_REVIEW_THRESHOLD_KM),
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn test_identical_points_cost_base_rate() {
        let p = Coordinates::new(6.2442, -75.5812).unwrap();
        let leg = calculate_transportation(&p, &p, money("25000"), money("1500")).unwrap();
        assert_eq!(leg.distance_km, Decimal::ZERO);
        assert_eq!(leg.cost, money("25000"));
        assert!(!leg.requires_review);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let a = Coordinates::new(0.0, 0.0).unwrap();
        let b = Coordinates::new(1.0, 0.0).unwrap();
        let d = haversine_distance_m(&a, &b);
        // 2πR / 360
        assert!((d - 111_194.93).abs() < 1.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let bogota = Coordinates::new(4.7110, -74.0721).unwrap();
        let medellin = Coordinates::new(6.2442, -75.5812).unwrap();
        let there = haversine_distance_m(&bogota, &medellin);
        let back = haversine_distance_m(&medellin, &bogota);
        assert!((there - back).abs() < 1e-6);
        // roughly 240 km as the crow flies
        assert!(there > 230_000.0 && there < 250_000.0);
    }

    #[test]
    fn test_cost_formula() {
        let a = Coordinates::new(0.0, 0.0).unwrap();
        let b = Coordinates::new(1.0, 0.0).unwrap();
        let leg = calculate_transportation(&a, &b, money("100"), money("2")).unwrap();
        assert_eq!(leg.cost, money("100") + money("2").multiply(leg.distance_km));
        assert!(leg.distance_km > dec!(111) && leg.distance_km < dec!(112));
    }

    #[test]
    fn test_cost_uses_rounded_distance() {
        // one degree of latitude is 111194.927 m
        let a = Coordinates::new(0.0, 0.0).unwrap();
        let b = Coordinates::new(1.0, 0.0).unwrap();
        let leg = calculate_transportation(&a, &b, money("100"), money("2")).unwrap();
        assert_eq!(leg.distance_km, dec!(111.195));
        assert!(leg.distance_km.scale() <= 3);
        assert_eq!(leg.cost, money("322.39"));
    }

    #[test]
    fn test_far_destination_flagged_not_rejected() {
        let bogota = Coordinates::new(4.7110, -74.0721).unwrap();
        let madrid = Coordinates::new(40.4168, -3.7038).unwrap();
        let leg = calculate_transportation(&bogota, &madrid, money("0"), money("1")).unwrap();
        assert!(leg.requires_review);
        assert!(leg.distance_km > dec!(1000));
    }

    #[test]
    fn test_custom_threshold() {
        let a = Coordinates::new(0.0, 0.0).unwrap();
        let b = Coordinates::new(1.0, 0.0).unwrap();
        let leg = calculate_transportation_with_threshold(&a, &b, money("0"), money("1"), dec!(100))
            .unwrap();
        assert!(leg.requires_review);
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(matches!(
            Coordinates::new(90.5, 0.0),
            Err(PricingError::InvalidCoordinates { .. })
        ));
        assert!(Coordinates::new(0.0, -180.1).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(-90.0, 180.0).is_ok());

        // fields are public, so the calculator re-checks
        let bad = Coordinates {
            latitude: 0.0,
            longitude: 200.0,
        };
        let ok = Coordinates::new(0.0, 0.0).unwrap();
        assert!(calculate_transportation(&ok, &bad, money("1"), money("1")).is_err());
    }

    #[test]
    fn test_antipodal_points_do_not_nan() {
        let a = Coordinates::new(0.0, 0.0).unwrap();
        let b = Coordinates::new(0.0, 180.0).unwrap();
        let d = haversine_distance_m(&a, &b);
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_M).abs() < 1.0);
    }
}
