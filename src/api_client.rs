use crate::config::Config;
use crate::dto::{SingleTickerResponse, TickerFetch};
use crate::error::{PriceAlertError, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

const TICKERS_PATH: &str = "/api/v1/markets/tickers";

/// Anything that can produce the latest ticker for a market.
#[async_trait]
pub trait TickerSource: Send + Sync {
    async fn get_ticker(&self, market: &str) -> Result<TickerFetch>;
}

/// Client for the public Quidax market endpoints
#[derive(Debug, Clone)]
pub struct QuidaxClient {
    client: Client,
    base_url: String,
}

impl QuidaxClient {
    /// Create a client from config. TLS certificates are always verified.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self::with_client(client, &config.quidax.api_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn ticker_url(&self, market: &str) -> String {
        format!("{}{TICKERS_PATH}/{market}", self.base_url)
    }

    /// Fetch the raw response envelope for one market
    pub async fn get_market_data(&self, market: &str) -> Result<SingleTickerResponse> {
        let url = self.ticker_url(market);
        debug!("Ticker request: GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        debug!("Ticker response status: {}", status);

        let response_text = response.text().await?;
        debug!("Ticker response: {}", response_text);

        if !status.is_success() {
            return Err(PriceAlertError::Status {
                status: status.as_u16(),
                body: response_text,
            });
        }

        Ok(serde_json::from_str(&response_text)?)
    }
}

#[async_trait]
impl TickerSource for QuidaxClient {
    async fn get_ticker(&self, market: &str) -> Result<TickerFetch> {
        let response = self.get_market_data(market).await?;
        Ok(response.into_ticker())
    }
}
