//! # quidax-price-alert
//!
//! A small price watcher for the Quidax exchange. It polls the public ticker
//! endpoint for one market on a fixed interval, compares the price with a target,
//! and prints an alert banner the first time the price reaches it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use quidax_price_alert::{Config, PriceAlertScheduler, QuidaxClient};
//!
//! # async fn example() -> anyhow::Result<()> {
//! // Load configuration from config.toml
//! let config = Config::new()?;
//!
//! let client = QuidaxClient::new(&config)?;
//! let handle = PriceAlertScheduler::from_config(client, &config)?.spawn();
//!
//! tokio::signal::ctrl_c().await?;
//! let scheduler = handle.stop().await?;
//! println!("Triggered: {}", scheduler.rule().is_triggered());
//! # Ok(())
//! # }
//! ```
//!
//! ## Fetching a ticker
//!
//! ```no_run
//! use quidax_price_alert::{Config, QuidaxClient, TickerFetch, TickerSource};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = QuidaxClient::new(&Config::default())?;
//! match client.get_ticker("btcngn").await? {
//!     TickerFetch::Ticker(ticker) => println!("price: {:?}", ticker.price),
//!     TickerFetch::Unavailable(reason) => println!("no data: {reason}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! Every key is optional; missing keys fall back to the defaults shown here.
//!
//! ```toml
//! [quidax]
//! api_url = "https://app.quidax.com"
//! timeout_secs = 10
//!
//! [alert]
//! market = "btcngn"
//! target_price = "200000000"
//! poll_interval_secs = 10
//! ```

pub mod alert;
pub mod api_client;
pub mod config;
pub mod dto;
pub mod error;
pub mod scheduler;

// Re-export commonly used types at the crate root
pub use alert::{Alert, AlertRule, AlertState};
pub use api_client::{QuidaxClient, TickerSource};
pub use config::Config;
pub use dto::*;
pub use error::{PriceAlertError, Result};
pub use scheduler::{PriceAlertScheduler, SchedulerHandle, TickOutcome};
