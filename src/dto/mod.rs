pub mod decimal_serde;
pub mod ticker;

pub use ticker::{MarketData, SingleTickerResponse, Ticker, TickerFetch, UnavailableReason};
