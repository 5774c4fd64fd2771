//! # Quote Configuration
//!
//! Tenant-level settings the pricing core never sees directly: currency,
//! warehouse location, delivery rates and quote limits.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     GLASIFY_CURRENCY=USD                                               │
//! │     GLASIFY_WAREHOUSE_LAT=4.6097                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/glasify/quote.toml (Linux)                               │
//! │     ~/Library/Application Support/com.glasify.glasify/quote.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     COP, transport disabled, 15-day validity                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # quote.toml
//! [pricing]
//! currency = "COP"
//! display_decimals = 2
//!
//! [transport]
//! enabled = true
//! latitude = 4.6097
//! longitude = -74.0817
//! base_rate = "30000"
//! per_km_rate = "1350"
//! review_threshold_km = "1000"
//!
//! [quote]
//! validity_days = 15
//! max_items = 50
//! max_quantity = 999
//! ```

use glasify_core::{Coordinates, Money, DEFAULT_REVIEW_THRESHOLD_KM, MAX_INPUT_AMOUNT};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

/// Upper bound for `display_decimals`.
pub const MAX_DISPLAY_DECIMALS: u32 = 4;

/// Upper bound for `validity_days` (ten years).
pub const MAX_VALIDITY_DAYS: u32 = 3650;

// =============================================================================
// Pricing Settings
// =============================================================================

/// Currency and display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// ISO 4217 code shown next to amounts.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Decimals used when rounding totals for display (0-4).
    #[serde(default = "default_display_decimals")]
    pub display_decimals: u32,
}

fn default_currency() -> String {
    "COP".to_string()
}

fn default_display_decimals() -> u32 {
    2
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            currency: default_currency(),
            display_decimals: default_display_decimals(),
        }
    }
}

// =============================================================================
// Transport Settings
// =============================================================================

/// Delivery pricing for one warehouse.
///
/// When `enabled` is false, delivery destinations on incoming requests are
/// ignored and no transportation leg is priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportSettings {
    #[serde(default)]
    pub enabled: bool,

    /// Warehouse latitude in degrees.
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Warehouse longitude in degrees.
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// Flat charge per delivery.
    #[serde(default)]
    pub base_rate: Money,

    /// Charge per kilometre of great-circle distance.
    #[serde(default)]
    pub per_km_rate: Money,

    /// Legs longer than this are flagged for manual review.
    #[serde(default = "default_review_threshold")]
    pub review_threshold_km: Decimal,
}

fn default_latitude() -> f64 {
    4.6097
}

fn default_longitude() -> f64 {
    -74.0817
}

fn default_review_threshold() -> Decimal {
    DEFAULT_REVIEW_THRESHOLD_KM
}

impl Default for TransportSettings {
    fn default() -> Self {
        TransportSettings {
            enabled: false,
            latitude: default_latitude(),
            longitude: default_longitude(),
            base_rate: Money::zero(),
            per_km_rate: Money::zero(),
            review_threshold_km: default_review_threshold(),
        }
    }
}

impl TransportSettings {
    /// Warehouse location as validated coordinates.
    pub fn warehouse(&self) -> ConfigResult<Coordinates> {
        Coordinates::new(self.latitude, self.longitude).map_err(|e| ConfigError::InvalidValue {
            field: "transport.latitude/longitude".into(),
            reason: e.to_string(),
        })
    }
}

// =============================================================================
// Quote Settings
// =============================================================================

/// Limits and validity for quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSettings {
    /// Days a sent quote stays valid (1-3650).
    #[serde(default = "default_validity_days")]
    pub validity_days: u32,

    /// Maximum distinct items per quote.
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Maximum units per item.
    #[serde(default = "default_max_quantity")]
    pub max_quantity: u32,
}

fn default_validity_days() -> u32 {
    15
}

fn default_max_items() -> usize {
    50
}

fn default_max_quantity() -> u32 {
    999
}

impl Default for QuoteSettings {
    fn default() -> Self {
        QuoteSettings {
            validity_days: default_validity_days(),
            max_items: default_max_items(),
            max_quantity: default_max_quantity(),
        }
    }
}

// =============================================================================
// Main Quote Configuration
// =============================================================================

/// Complete quote configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteConfig {
    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub transport: TransportSettings,

    #[serde(default)]
    pub quote: QuoteSettings,
}

impl QuoteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (quote.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading quote config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load quote config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Quote config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let currency = &self.pricing.currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(invalid(
                "pricing.currency",
                format!("expected a 3-letter ISO code, got '{}'", currency),
            ));
        }

        if self.pricing.display_decimals > MAX_DISPLAY_DECIMALS {
            return Err(invalid(
                "pricing.display_decimals",
                format!("must be at most {}", MAX_DISPLAY_DECIMALS),
            ));
        }

        self.transport.warehouse()?;

        for (field, rate) in [
            ("transport.base_rate", self.transport.base_rate),
            ("transport.per_km_rate", self.transport.per_km_rate),
        ] {
            if rate.is_negative() {
                return Err(invalid(field, "must not be negative"));
            }
            if rate.amount() > MAX_INPUT_AMOUNT {
                return Err(invalid(field, format!("must be at most {}", MAX_INPUT_AMOUNT)));
            }
        }
        if self.transport.review_threshold_km.is_sign_negative() {
            return Err(invalid("transport.review_threshold_km", "must not be negative"));
        }

        if self.quote.validity_days == 0 || self.quote.validity_days > MAX_VALIDITY_DAYS {
            return Err(invalid(
                "quote.validity_days",
                format!("must be between 1 and {}", MAX_VALIDITY_DAYS),
            ));
        }
        if self.quote.max_items == 0 {
            return Err(invalid("quote.max_items", "must be greater than 0"));
        }
        if self.quote.max_quantity == 0 {
            return Err(invalid("quote.max_quantity", "must be greater than 0"));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(currency) = std::env::var("GLASIFY_CURRENCY") {
            debug!(currency = %currency, "Overriding currency from environment");
            self.pricing.currency = currency.to_uppercase();
        }

        if let Ok(days) = std::env::var("GLASIFY_VALIDITY_DAYS") {
            match days.parse::<u32>() {
                Ok(d) => self.quote.validity_days = d,
                Err(_) => warn!(value = %days, "Ignoring invalid GLASIFY_VALIDITY_DAYS"),
            }
        }

        if let Ok(lat) = std::env::var("GLASIFY_WAREHOUSE_LAT") {
            match lat.parse::<f64>() {
                Ok(v) => self.transport.latitude = v,
                Err(_) => warn!(value = %lat, "Ignoring invalid GLASIFY_WAREHOUSE_LAT"),
            }
        }

        if let Ok(lon) = std::env::var("GLASIFY_WAREHOUSE_LON") {
            match lon.parse::<f64>() {
                Ok(v) => self.transport.longitude = v,
                Err(_) => warn!(value = %lon, "Ignoring invalid GLASIFY_WAREHOUSE_LON"),
            }
        }

        if let Ok(rate) = std::env::var("GLASIFY_TRANSPORT_BASE_RATE") {
            match rate.parse::<Money>() {
                Ok(m) => {
                    debug!(base_rate = %m, "Overriding transport base rate from environment");
                    self.transport.base_rate = m;
                }
                Err(_) => warn!(value = %rate, "Ignoring invalid GLASIFY_TRANSPORT_BASE_RATE"),
            }
        }

        if let Ok(rate) = std::env::var("GLASIFY_TRANSPORT_PER_KM_RATE") {
            match rate.parse::<Money>() {
                Ok(m) => self.transport.per_km_rate = m,
                Err(_) => warn!(value = %rate, "Ignoring invalid GLASIFY_TRANSPORT_PER_KM_RATE"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "glasify", "glasify")
            .map(|dirs| dirs.config_dir().join("quote.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn currency(&self) -> &str {
        &self.pricing.currency
    }

    pub fn transport_enabled(&self) -> bool {
        self.transport.enabled
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}
