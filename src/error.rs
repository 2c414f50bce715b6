use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceAlertError {
    /// Connect, TLS, timeout or body read failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ticker request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parsing error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Poll interval must be greater than zero")]
    ZeroPollInterval,

    #[error("Invalid price {value:?} for market {market}: {source}")]
    InvalidPrice {
        market: String,
        value: String,
        #[source]
        source: rust_decimal::Error,
    },
}

pub type Result<T> = std::result::Result<T, PriceAlertError>;
