//! # Services
//!
//! Optional additive line items (installation, cutting, sealing...).
//! Same quantity rules as adjustments, but a service only counts when the
//! customer selected it, and it is never negative.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::dimensions::Dimensions;
use crate::money::Money;
use crate::types::MeasureBasis;

/// How a service rate is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ServiceUnit {
    /// Per item.
    Unit,
    /// Per square metre of billable area.
    Sqm,
    /// Per linear metre of perimeter.
    Ml,
}

impl ServiceUnit {
    pub fn basis(&self) -> MeasureBasis {
        match self {
            ServiceUnit::Unit => MeasureBasis::Each,
            ServiceUnit::Sqm => MeasureBasis::Area,
            ServiceUnit::Ml => MeasureBasis::Perimeter,
        }
    }
}

/// A service offered for a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub unit: ServiceUnit,
    pub rate: Money,
}

/// Priced service line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResult {
    pub service_id: String,
    pub name: String,
    /// Units billed (1, m² or ml).
    #[ts(type = "string")]
    pub quantity: Decimal,
    pub amount: Money,
}

/// Prices the selected subset of `services`, in catalog order.
///
/// Services whose id is not in `selected_ids` produce no row at all.
pub fn calculate_services(
    services: &[Service],
    selected_ids: &[String],
    dimensions: &Dimensions,
) -> Vec<ServiceResult> {
    let selected: HashSet<&str> = selected_ids.iter().map(String::as_str).collect();

    services
        .iter()
        .filter(|service| selected.contains(service.id.as_str()))
        .map(|service| {
            let quantity = service.unit.basis().quantity(dimensions);
            ServiceResult {
                service_id: service.id.clone(),
                name: service.name.clone(),
                quantity,
                amount: service.rate.multiply(quantity),
            }
        })
        .collect()
}

/// Total of all service lines.
pub fn sum_services(results: &[ServiceResult]) -> Money {
    results.iter().map(|r| r.amount).sum()
}
