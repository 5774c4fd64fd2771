//! # glasify-quote: Quote Workflow for Glasify
//!
//! Application layer over [`glasify_core`]: loads tenant configuration,
//! prices configured products through the core engine and collects them
//! into quotes.
//!
//! ## Modules
//!
//! - [`config`] - `QuoteConfig` (TOML file + environment overrides)
//! - [`pricer`] - `QuotePricer`, fills in warehouse and delivery rates
//! - [`quote`] - `Quote` / `QuoteItem` and the draft → sent lifecycle
//! - [`error`] - `QuoteError`, `ConfigError`
//!
//! ## Example Usage
//!
//! ```rust
//! use glasify_quote::{QuoteConfig, QuotePricer};
//!
//! let pricer = QuotePricer::new(QuoteConfig::default()).unwrap();
//! let quote = pricer.new_quote("tenant-1");
//! assert!(quote.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod pricer;
pub mod quote;

pub use config::{PricingSettings, QuoteConfig, QuoteSettings, TransportSettings};
pub use error::{ConfigError, ConfigResult, QuoteError, QuoteResult};
pub use pricer::{ItemRequest, QuotePricer};
pub use quote::{Quote, QuoteItem, QuoteStatus};
