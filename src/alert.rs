use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

const BANNER_RULE: &str = "==========================================";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertState {
    Pending,
    Triggered {
        price: Decimal,
        triggered_at: DateTime<Utc>,
    },
}

/// A single "price at or above target" rule. Fires at most once.
#[derive(Debug, Clone)]
pub struct AlertRule {
    market: String,
    target_price: Decimal,
    state: AlertState,
}

impl AlertRule {
    pub fn new(market: impl Into<String>, target_price: Decimal) -> Self {
        Self {
            market: market.into(),
            target_price,
            state: AlertState::Pending,
        }
    }

    pub fn market(&self) -> &str {
        &self.market
    }

    pub fn target_price(&self) -> Decimal {
        self.target_price
    }

    pub fn state(&self) -> &AlertState {
        &self.state
    }

    pub fn is_triggered(&self) -> bool {
        matches!(self.state, AlertState::Triggered { .. })
    }

    /// Compare `price` with the target. Returns the alert on the first crossing only.
    pub fn evaluate(&mut self, price: Decimal) -> Option<Alert> {
        if self.is_triggered() || price < self.target_price {
            return None;
        }

        let triggered_at = Utc::now();
        self.state = AlertState::Triggered {
            price,
            triggered_at,
        };

        Some(Alert {
            market: self.market.clone(),
            target_price: self.target_price,
            current_price: price,
            triggered_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub market: String,
    pub target_price: Decimal,
    pub current_price: Decimal,
    pub triggered_at: DateTime<Utc>,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{BANNER_RULE}")?;
        writeln!(f, "!!! PRICE ALERT TRIGGERED !!!")?;
        writeln!(
            f,
            "{} has reached the target price of {}",
            self.market.to_uppercase(),
            self.target_price
        )?;
        writeln!(f, "Current Price: {}", self.current_price)?;
        write!(f, "{BANNER_RULE}")
    }
}
