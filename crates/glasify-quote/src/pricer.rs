//! # Quote Pricer
//!
//! Bridges tenant configuration and the pure pricing core.
//!
//! ```text
//! ItemRequest ──► QuotePricer::price ──► calculate_price ──► Quote::add_item
//!                   │
//!                   └─ destination? + transport enabled
//!                      → TransportationInput { configured warehouse, rates }
//! ```

use glasify_core::{
    calculate_price, Coordinates, PriceCalculationInput, PriceCalculationResult,
    TransportationInput,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;
use uuid::Uuid;

use crate::config::QuoteConfig;
use crate::error::{ConfigResult, QuoteResult};
use crate::quote::Quote;

/// A product to price and add to a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub name: String,
    pub quantity: u32,
    /// Geocoded delivery address, if the customer wants delivery.
    #[serde(default)]
    pub destination: Option<Coordinates>,
    pub input: PriceCalculationInput,
}

/// Prices items with the tenant's warehouse and delivery rates.
#[derive(Debug, Clone)]
pub struct QuotePricer {
    config: QuoteConfig,
    warehouse: Coordinates,
}

impl QuotePricer {
    /// Validates `config` and builds a pricer from it.
    pub fn new(config: QuoteConfig) -> ConfigResult<Self> {
        config.validate()?;
        let warehouse = config.transport.warehouse()?;
        Ok(QuotePricer { config, warehouse })
    }

    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }

    /// Prices one unit.
    ///
    /// A `destination` replaces any transportation leg on `input` with one
    /// from the configured warehouse. With transport disabled the destination
    /// is ignored. Without a destination the input is priced as given.
    pub fn price(
        &self,
        input: &PriceCalculationInput,
        destination: Option<Coordinates>,
    ) -> QuoteResult<PriceCalculationResult> {
        let result = match destination {
            Some(destination) if self.config.transport.enabled => {
                let mut input = input.clone();
                input.transportation = Some(self.transportation_to(destination));
                calculate_price(&input)?
            }
            Some(_) => {
                debug!("Transport disabled, ignoring delivery destination");
                calculate_price(input)?
            }
            None => calculate_price(input)?,
        };

        if let Some(leg) = result.transportation.as_ref().filter(|leg| leg.requires_review) {
            warn!(
                distance_km = %leg.distance_km,
                cost = %leg.cost,
                "Delivery distance exceeds review threshold, quote needs manual review"
            );
        }

        Ok(result)
    }

    /// Starts an empty draft quote with the configured currency and limits.
    pub fn new_quote(&self, tenant_id: impl Into<String>) -> Quote {
        Quote::new(tenant_id, self.config.currency(), self.config.quote)
    }

    /// Prices `request` and adds it to `quote`, returning the new item id.
    pub fn price_into(&self, quote: &mut Quote, request: &ItemRequest) -> QuoteResult<Uuid> {
        let unit = self.price(&request.input, request.destination)?;
        quote.add_item(request.name.clone(), request.quantity, unit)
    }

    fn transportation_to(&self, destination: Coordinates) -> TransportationInput {
        let transport = &self.config.transport;
        TransportationInput {
            warehouse: self.warehouse,
            destination,
            base_rate: transport.base_rate,
            per_km_rate: transport.per_km_rate,
            review_threshold_km: Some(transport.review_threshold_km),
        }
    }
}
