//! # Quote Price
//!
//! Prices a single configured product and prints the resulting draft quote.
//!
//! ## Usage
//! ```bash
//! # Read the request from stdin
//! cat window.json | cargo run -p glasify-quote --bin quote-price
//!
//! # Read from a file with an explicit config and tenant
//! cargo run -p glasify-quote --bin quote-price -- \
//!     --input window.json --config ./quote.toml --tenant acme
//! ```
//!
//! ## Request Format
//! ```json
//! {
//!   "name": "Sliding window",
//!   "quantity": 2,
//!   "destination": { "latitude": 6.2442, "longitude": -75.5812 },
//!   "input": {
//!     "dimensions": { "widthMm": "1200", "heightMm": "1500" },
//!     "basePrice": "185000",
//!     "costPerMmWidth": "42.75",
//!     "costPerMmHeight": "38.10",
//!     "glassPricePerSqm": "96000",
//!     "margin": "0.35"
//!   }
//! }
//! ```
//!
//! The quote is written to stdout as pretty JSON; logs go to stderr.

use glasify_quote::{ItemRequest, QuoteConfig, QuotePricer};
use std::env;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_TENANT: &str = "default";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut tenant = String::from(DEFAULT_TENANT);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" | "-i" => {
                if i + 1 < args.len() {
                    input_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--tenant" | "-t" => {
                if i + 1 < args.len() {
                    tenant = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Glasify Quote Price");
                println!();
                println!("Usage: quote-price [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -i, --input <PATH>   Item request JSON (default: stdin)");
                println!("  -c, --config <PATH>  Quote config TOML (default: platform config dir)");
                println!("  -t, --tenant <ID>    Tenant id for the quote (default: {})", DEFAULT_TENANT);
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            other => {
                return Err(format!("Unknown argument: {}", other).into());
            }
        }
        i += 1;
    }

    // An explicit config file must load; the platform default may be absent.
    let config = match config_path {
        Some(path) => QuoteConfig::load(Some(path))?,
        None => QuoteConfig::load_or_default(None),
    };
    let display_decimals = config.pricing.display_decimals;
    let pricer = QuotePricer::new(config)?;

    let raw = match input_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let request: ItemRequest = serde_json::from_str(&raw)?;

    let mut quote = pricer.new_quote(tenant);
    pricer.price_into(&mut quote, &request)?;

    info!(
        quote_id = %quote.id,
        total = %quote.total_rounded(display_decimals).amount(),
        currency = %quote.currency,
        "Item priced"
    );

    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,glasify=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
