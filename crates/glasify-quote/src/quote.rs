//! # Quote Workflow
//!
//! A quote is a tenant-scoped list of priced items that moves through a
//! small lifecycle.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌─────────┐   send()    ┌─────────┐                                   │
//! │   │  DRAFT  │ ──────────► │  SENT   │ ── valid_until passes ──► expired │
//! │   └────┬────┘             └────┬────┘                                   │
//! │        │ cancel()              │ cancel()                               │
//! │        ▼                       ▼                                        │
//! │   ┌─────────────────────────────────┐                                   │
//! │   │            CANCELED             │                                   │
//! │   └─────────────────────────────────┘                                   │
//! │                                                                         │
//! │   Items can only be added, re-quantified or removed while DRAFT.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each item freezes the [`PriceCalculationResult`] of a single unit at the
//! moment it was priced. Later catalog changes do not touch it.
//!
//! Item subtotals are capped at `Decimal::MAX / max_items`, so the quote
//! total can always be summed exactly.

use chrono::{DateTime, Duration, Utc};
use glasify_core::{Money, PriceCalculationResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use crate::config::QuoteSettings;
use crate::error::{QuoteError, QuoteResult};

// =============================================================================
// Quote Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    #[default]
    Draft,
    Sent,
    Canceled,
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteStatus::Draft => write!(f, "draft"),
            QuoteStatus::Sent => write!(f, "sent"),
            QuoteStatus::Canceled => write!(f, "canceled"),
        }
    }
}

// =============================================================================
// Quote Item
// =============================================================================

/// One configured product in a quote.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: u32,
    /// Breakdown for a single unit.
    pub unit: PriceCalculationResult,
    /// Unit total times quantity, unrounded.
    pub subtotal: Money,
    /// Subtotal split back per unit, rounded for display.
    pub unit_price: Money,
}

impl QuoteItem {
    fn new(
        name: String,
        quantity: u32,
        unit: PriceCalculationResult,
        limit: Decimal,
    ) -> QuoteResult<Self> {
        let mut item = QuoteItem {
            id: Uuid::new_v4(),
            name,
            quantity,
            subtotal: Money::zero(),
            unit_price: Money::zero(),
            unit,
        };
        item.set_quantity(quantity, limit)?;
        Ok(item)
    }

    fn set_quantity(&mut self, quantity: u32, limit: Decimal) -> QuoteResult<()> {
        let subtotal = self.unit.total.checked_multiply(Decimal::from(quantity))?;
        if subtotal.amount().abs() > limit {
            return Err(QuoteError::SubtotalTooLarge { limit });
        }
        self.unit_price = subtotal.divide_by_units(quantity)?;
        self.subtotal = subtotal;
        self.quantity = quantity;
        Ok(())
    }
}

// =============================================================================
// Quote
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: Uuid,
    pub tenant_id: String,
    pub currency: String,
    pub status: QuoteStatus,
    pub items: Vec<QuoteItem>,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,

    #[serde(skip)]
    #[ts(skip)]
    settings: QuoteSettings,
}

impl Quote {
    /// Creates an empty draft quote.
    pub fn new(tenant_id: impl Into<String>, currency: impl Into<String>, settings: QuoteSettings) -> Self {
        let quote = Quote {
            id: Uuid::new_v4(),
            tenant_id: tenant_id.into(),
            currency: currency.into(),
            status: QuoteStatus::Draft,
            items: Vec::new(),
            created_at: Utc::now(),
            sent_at: None,
            valid_until: None,
            settings,
        };
        debug!(quote_id = %quote.id, tenant_id = %quote.tenant_id, "Quote created");
        quote
    }

    pub fn settings(&self) -> &QuoteSettings {
        &self.settings
    }

    pub fn item(&self, item_id: Uuid) -> Option<&QuoteItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // =========================================================================
    // Item Operations (draft only)
    // =========================================================================

    /// Adds a priced item and returns its id.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        quantity: u32,
        unit: PriceCalculationResult,
    ) -> QuoteResult<Uuid> {
        self.ensure_draft("add items")?;

        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(QuoteError::MissingItemName);
        }
        self.check_quantity(quantity)?;
        if self.items.len() >= self.settings.max_items {
            return Err(QuoteError::TooManyItems {
                max: self.settings.max_items,
            });
        }

        let item = QuoteItem::new(name, quantity, unit, self.subtotal_limit())?;
        let id = item.id;
        debug!(
            quote_id = %self.id,
            item_id = %id,
            quantity,
            subtotal = %item.subtotal,
            "Item added to quote"
        );
        self.items.push(item);
        Ok(id)
    }

    /// Changes an item's quantity. Zero removes the item.
    pub fn update_quantity(&mut self, item_id: Uuid, quantity: u32) -> QuoteResult<()> {
        self.ensure_draft("change quantities")?;

        if quantity == 0 {
            self.remove_item(item_id)?;
            return Ok(());
        }
        self.check_quantity(quantity)?;

        let limit = self.subtotal_limit();
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| QuoteError::ItemNotFound(item_id.to_string()))?;
        item.set_quantity(quantity, limit)?;

        debug!(quote_id = %self.id, item_id = %item_id, quantity, "Item quantity updated");
        Ok(())
    }

    /// Removes an item and returns it.
    pub fn remove_item(&mut self, item_id: Uuid) -> QuoteResult<QuoteItem> {
        self.ensure_draft("remove items")?;

        let index = self
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| QuoteError::ItemNotFound(item_id.to_string()))?;
        let item = self.items.remove(index);

        debug!(quote_id = %self.id, item_id = %item_id, "Item removed from quote");
        Ok(item)
    }

    // =========================================================================
    // Totals
    // =========================================================================

    /// Sum of item subtotals, unrounded.
    pub fn total(&self) -> Money {
        self.items.iter().map(|i| i.subtotal).sum()
    }

    /// Total rounded half-up for display.
    pub fn total_rounded(&self, decimals: u32) -> Money {
        self.total().round_dp(decimals)
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Sends the quote now.
    pub fn send(&mut self) -> QuoteResult<()> {
        self.send_at(Utc::now())
    }

    /// Marks the quote as sent at `now`; valid for `validity_days` after.
    pub fn send_at(&mut self, now: DateTime<Utc>) -> QuoteResult<()> {
        self.ensure_draft("send")?;
        if self.items.is_empty() {
            return Err(QuoteError::EmptyQuote);
        }

        let days = self.settings.validity_days;
        let valid_until = Duration::try_days(i64::from(days))
            .and_then(|validity| now.checked_add_signed(validity))
            .ok_or(QuoteError::InvalidValidity { days })?;

        self.status = QuoteStatus::Sent;
        self.sent_at = Some(now);
        self.valid_until = Some(valid_until);

        info!(
            quote_id = %self.id,
            total = %self.total(),
            valid_until = ?self.valid_until,
            "Quote sent"
        );
        Ok(())
    }

    /// Cancels a draft or sent quote.
    pub fn cancel(&mut self) -> QuoteResult<()> {
        if self.status == QuoteStatus::Canceled {
            return Err(QuoteError::InvalidStatus {
                current: self.status,
                operation: "cancel",
            });
        }
        self.status = QuoteStatus::Canceled;
        info!(quote_id = %self.id, "Quote canceled");
        Ok(())
    }

    /// True once a sent quote is past its validity date.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.status == QuoteStatus::Sent && self.valid_until.map_or(false, |until| now > until)
    }

    fn ensure_draft(&self, operation: &'static str) -> QuoteResult<()> {
        if self.status != QuoteStatus::Draft {
            return Err(QuoteError::InvalidStatus {
                current: self.status,
                operation,
            });
        }
        Ok(())
    }

    /// Largest item subtotal (in magnitude) that keeps any sum of
    /// `max_items` subtotals inside the decimal range.
    fn subtotal_limit(&self) -> Decimal {
        let items = self.settings.max_items.max(1);
        Decimal::MAX / Decimal::from(items)
    }

    fn check_quantity(&self, quantity: u32) -> QuoteResult<()> {
        let max = self.settings.max_quantity;
        if quantity == 0 || quantity > max {
            return Err(QuoteError::QuantityOutOfRange {
                requested: quantity,
                max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glasify_core::{calculate_price, DimensionsInput, PriceCalculationInput};
    use rust_decimal_macros::dec;

    fn unit_result(base_price: &str) -> PriceCalculationResult {
        let input = PriceCalculationInput {
            dimensions: DimensionsInput {
                width_mm: dec!(1000),
                height_mm: dec!(1000),
                min_width_mm: dec!(0),
                min_height_mm: dec!(0),
                max_width_mm: None,
                max_height_mm: None,
            },
            base_price: base_price.parse().unwrap(),
            cost_per_mm_width: Money::zero(),
            cost_per_mm_height: Money::zero(),
            accessory_price: Money::zero(),
            glass_price_per_sqm: Money::zero(),
            glass_discounts: Default::default(),
            color_multiplier: dec!(1),
            margin: dec!(0),
            adjustments: vec![],
            services: vec![],
            selected_service_ids: vec![],
            transportation: None,
        };
        calculate_price(&input).unwrap()
    }

    fn draft() -> Quote {
        Quote::new("tenant-1", "COP", QuoteSettings::default())
    }

    #[test]
    fn test_add_item_computes_subtotal() {
        let mut quote = draft();
        let id = quote.add_item("Sliding window", 3, unit_result("100.005")).unwrap();

        let item = quote.item(id).unwrap();
        assert_eq!(item.subtotal, "300.015".parse().unwrap());
        assert_eq!(item.unit_price, "100.01".parse().unwrap());
        assert_eq!(quote.total(), "300.015".parse().unwrap());
        assert_eq!(quote.total_rounded(2), "300.02".parse().unwrap());
    }

    #[test]
    fn test_add_item_rejects_bad_input() {
        let mut quote = draft();
        assert!(matches!(
            quote.add_item("  ", 1, unit_result("10")),
            Err(QuoteError::MissingItemName)
        ));
        assert!(matches!(
            quote.add_item("Door", 0, unit_result("10")),
            Err(QuoteError::QuantityOutOfRange { requested: 0, .. })
        ));
        assert!(matches!(
            quote.add_item("Door", 1000, unit_result("10")),
            Err(QuoteError::QuantityOutOfRange { max: 999, .. })
        ));
        assert!(quote.is_empty());
    }

    #[test]
    fn test_max_items_enforced() {
        let settings = QuoteSettings {
            max_items: 2,
            ..QuoteSettings::default()
        };
        let mut quote = Quote::new("tenant-1", "COP", settings);
        quote.add_item("A", 1, unit_result("10")).unwrap();
        quote.add_item("B", 1, unit_result("10")).unwrap();
        let err = quote.add_item("C", 1, unit_result("10")).unwrap_err();
        assert_eq!(err.code(), "TOO_MANY_ITEMS");
    }

    #[test]
    fn test_update_quantity_and_remove() {
        let mut quote = draft();
        let a = quote.add_item("A", 1, unit_result("10")).unwrap();
        let b = quote.add_item("B", 2, unit_result("25")).unwrap();
        assert_eq!(quote.total(), "60".parse().unwrap());

        quote.update_quantity(a, 4).unwrap();
        assert_eq!(quote.total(), "90".parse().unwrap());
        assert_eq!(quote.item_count(), 6);

        quote.update_quantity(b, 0).unwrap();
        assert!(quote.item(b).is_none());
        assert_eq!(quote.total(), "40".parse().unwrap());

        assert!(matches!(
            quote.remove_item(b),
            Err(QuoteError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_oversized_subtotal_rejected() {
        let mut huge = unit_result("10");
        huge.total = Money::from_decimal(dec!(70_000_000_000_000_000_000_000_000_000));

        let mut quote = draft();
        let err = quote.add_item("Facade", 2, huge.clone()).unwrap_err();
        assert!(matches!(
            err,
            QuoteError::Pricing(glasify_core::PricingError::InvalidMoneyValue { .. })
        ));

        // fits on its own, but 50 of them would not
        let err = quote.add_item("Facade", 1, huge).unwrap_err();
        assert!(matches!(err, QuoteError::SubtotalTooLarge { .. }));
        assert_eq!(err.code(), "INVALID_MONEY_VALUE");
        assert!(quote.is_empty());
    }

    #[test]
    fn test_update_quantity_keeps_subtotal_bounded() {
        let mut large = unit_result("10");
        large.total = Money::from_decimal(dec!(10_000_000_000_000_000_000_000_000));

        let mut quote = draft();
        let id = quote.add_item("Facade", 1, large).unwrap();
        let err = quote.update_quantity(id, 999).unwrap_err();
        assert!(matches!(err, QuoteError::SubtotalTooLarge { .. }));

        // the rejected change left the item as it was
        let item = quote.item(id).unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(quote.total(), item.unit.total);
    }

    #[test]
    fn test_send_rejects_unrepresentable_validity() {
        let settings = QuoteSettings {
            validity_days: 200_000_000,
            ..QuoteSettings::default()
        };
        let mut quote = Quote::new("tenant-1", "COP", settings);
        quote.add_item("A", 1, unit_result("10")).unwrap();

        let err = quote.send_at(Utc::now()).unwrap_err();
        assert!(matches!(err, QuoteError::InvalidValidity { days: 200_000_000 }));
        assert_eq!(quote.status, QuoteStatus::Draft);
        assert!(quote.sent_at.is_none());
        assert!(quote.valid_until.is_none());
    }

    #[test]
    fn test_send_with_longest_configured_validity() {
        let settings = QuoteSettings {
            validity_days: crate::config::MAX_VALIDITY_DAYS,
            ..QuoteSettings::default()
        };
        let mut quote = Quote::new("tenant-1", "COP", settings);
        quote.add_item("A", 1, unit_result("10")).unwrap();

        let now = Utc::now();
        quote.send_at(now).unwrap();
        assert_eq!(quote.valid_until, Some(now + Duration::days(3650)));
    }

    #[test]
    fn test_send_requires_items() {
        let mut quote = draft();
        assert!(matches!(quote.send(), Err(QuoteError::EmptyQuote)));
        assert_eq!(quote.status, QuoteStatus::Draft);
    }

    #[test]
    fn test_send_sets_validity_and_locks_items() {
        let mut quote = draft();
        let id = quote.add_item("A", 1, unit_result("10")).unwrap();
        let now = Utc::now();
        quote.send_at(now).unwrap();

        assert_eq!(quote.status, QuoteStatus::Sent);
        assert_eq!(quote.valid_until, Some(now + Duration::days(15)));
        assert!(!quote.is_expired(now + Duration::days(15)));
        assert!(quote.is_expired(now + Duration::days(16)));

        assert!(matches!(
            quote.update_quantity(id, 2),
            Err(QuoteError::InvalidStatus {
                current: QuoteStatus::Sent,
                ..
            })
        ));
        assert!(quote.send().is_err());
    }

    #[test]
    fn test_cancel() {
        let mut quote = draft();
        quote.add_item("A", 1, unit_result("10")).unwrap();
        quote.send().unwrap();
        quote.cancel().unwrap();
        assert_eq!(quote.status, QuoteStatus::Canceled);
        assert!(!quote.is_expired(Utc::now() + Duration::days(365)));
        assert_eq!(quote.cancel().unwrap_err().code(), "INVALID_STATUS");
    }

    #[test]
    fn test_serializes_without_settings() {
        let mut quote = draft();
        quote.add_item("A", 2, unit_result("10")).unwrap();
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["status"], "draft");
        assert_eq!(json["tenantId"], "tenant-1");
        let subtotal: Money = json["items"][0]["subtotal"].as_str().unwrap().parse().unwrap();
        assert_eq!(subtotal, "20".parse().unwrap());
        assert!(json.get("settings").is_none());
    }
}
