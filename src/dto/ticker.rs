use crate::dto::decimal_serde;
use crate::error::{PriceAlertError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const STATUS_SUCCESS: &str = "success";

/// Latest quote for a market. Every field is a decimal string as sent by the exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    #[serde(
        default,
        deserialize_with = "decimal_serde::option_string::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<String>,
    #[serde(
        default,
        deserialize_with = "decimal_serde::option_string::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub buy: Option<String>,
    #[serde(
        default,
        deserialize_with = "decimal_serde::option_string::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub sell: Option<String>,
    #[serde(
        default,
        deserialize_with = "decimal_serde::option_string::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub low: Option<String>,
    #[serde(
        default,
        deserialize_with = "decimal_serde::option_string::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub high: Option<String>,
    #[serde(
        default,
        deserialize_with = "decimal_serde::option_string::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub open: Option<String>,
    #[serde(
        default,
        deserialize_with = "decimal_serde::option_string::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub last: Option<String>,
    #[serde(
        default,
        deserialize_with = "decimal_serde::option_string::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub vol: Option<String>,
}

impl Ticker {
    /// Parse `price` as a decimal. A missing price is `Ok(None)`; a price that
    /// cannot be held exactly is an error, never a rounded value.
    pub fn current_price(&self, market: &str) -> Result<Option<Decimal>> {
        let Some(raw) = self.price.as_deref() else {
            return Ok(None);
        };

        decimal_serde::parse_exact(raw)
            .map(Some)
            .map_err(|source| PriceAlertError::InvalidPrice {
                market: market.to_string(),
                value: raw.to_string(),
                source,
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketData {
    #[serde(default)]
    pub at: Option<i64>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub ticker: Option<Ticker>,
}

impl MarketData {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.at.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// Wrapper returned by `GET /api/v1/markets/tickers/{market}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleTickerResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Option<MarketData>,
}

impl SingleTickerResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some(STATUS_SUCCESS)
    }

    /// Unwrap envelope -> data -> ticker.
    pub fn into_ticker(self) -> TickerFetch {
        match self.status.as_deref() {
            None => return TickerFetch::Unavailable(UnavailableReason::MissingStatus),
            Some(STATUS_SUCCESS) => {}
            Some(other) => {
                return TickerFetch::Unavailable(UnavailableReason::Status(other.to_string()))
            }
        }

        match self.data {
            None => TickerFetch::Unavailable(UnavailableReason::MissingData),
            Some(MarketData { ticker: None, .. }) => {
                TickerFetch::Unavailable(UnavailableReason::MissingTicker)
            }
            Some(MarketData {
                ticker: Some(ticker),
                ..
            }) => TickerFetch::Ticker(ticker),
        }
    }
}

/// Result of unwrapping a ticker response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickerFetch {
    Ticker(Ticker),
    Unavailable(UnavailableReason),
}

impl TickerFetch {
    pub fn ticker(&self) -> Option<&Ticker> {
        match self {
            TickerFetch::Ticker(ticker) => Some(ticker),
            TickerFetch::Unavailable(_) => None,
        }
    }

    pub fn into_option(self) -> Option<Ticker> {
        match self {
            TickerFetch::Ticker(ticker) => Some(ticker),
            TickerFetch::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    Status(String),
    MissingStatus,
    MissingData,
    MissingTicker,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::Status(status) => write!(f, "response status was {status:?}"),
            UnavailableReason::MissingStatus => write!(f, "response has no status"),
            UnavailableReason::MissingData => write!(f, "response has no data"),
            UnavailableReason::MissingTicker => write!(f, "market data has no ticker"),
        }
    }
}
