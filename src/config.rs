use crate::dto::decimal_serde;
use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_API_URL: &str = "https://app.quidax.com";
pub const DEFAULT_MARKET: &str = "btcngn";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct QuidaxConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request timeout. Falls back to the poll interval when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertConfig {
    #[serde(default = "default_market")]
    pub market: String,
    #[serde(
        default = "default_target_price",
        deserialize_with = "decimal_serde::exact::deserialize"
    )]
    pub target_price: Decimal,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub quidax: QuidaxConfig,
    #[serde(default)]
    pub alert: AlertConfig,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_market() -> String {
    DEFAULT_MARKET.to_string()
}

fn default_target_price() -> Decimal {
    Decimal::from(200_000_000u64)
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

impl Default for QuidaxConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: None,
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            market: default_market(),
            target_price: default_target_price(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory.
    pub fn new() -> Result<Self> {
        Self::from_path(DEFAULT_CONFIG_PATH)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        info!("Config: {:?}", config);
        Ok(config)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.alert.market.trim().is_empty() {
            bail!("alert.market must not be empty");
        }
        if self.alert.poll_interval_secs == 0 {
            bail!("alert.poll_interval_secs must be greater than zero");
        }
        if self.alert.target_price <= Decimal::ZERO {
            bail!("alert.target_price must be positive");
        }
        if self.quidax.timeout_secs == Some(0) {
            bail!("quidax.timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.alert.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.quidax
                .timeout_secs
                .unwrap_or(self.alert.poll_interval_secs),
        )
    }
}
