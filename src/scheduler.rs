use crate::alert::{Alert, AlertRule};
use crate::api_client::TickerSource;
use crate::config::Config;
use crate::dto::{TickerFetch, UnavailableReason};
use crate::error::{PriceAlertError, Result};
use chrono::Local;
use rust_decimal::Decimal;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// What a single poll did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The rule already fired; nothing was fetched.
    Suppressed,
    NoData(UnavailableReason),
    NoPrice,
    BelowTarget { price: Decimal },
    Triggered(Alert),
}

/// Polls one market and fires its alert rule once.
pub struct PriceAlertScheduler<S> {
    source: S,
    rule: AlertRule,
    poll_interval: Duration,
}

impl<S: TickerSource> PriceAlertScheduler<S> {
    /// Fails with `ZeroPollInterval` for a zero `poll_interval`.
    pub fn new(source: S, rule: AlertRule, poll_interval: Duration) -> Result<Self> {
        if poll_interval.is_zero() {
            return Err(PriceAlertError::ZeroPollInterval);
        }

        Ok(Self {
            source,
            rule,
            poll_interval,
        })
    }

    pub fn from_config(source: S, config: &Config) -> Result<Self> {
        Self::new(
            source,
            AlertRule::new(config.alert.market.clone(), config.alert.target_price),
            config.poll_interval(),
        )
    }

    pub fn rule(&self) -> &AlertRule {
        &self.rule
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Run one poll: fetch, compare, print the banner on the first crossing.
    pub async fn check_price_and_alert(&mut self) -> Result<TickOutcome> {
        if self.rule.is_triggered() {
            return Ok(TickOutcome::Suppressed);
        }

        let market = self.rule.market().to_string();
        println!(
            "Checking price for {} at {}",
            market,
            Local::now().format("%H:%M:%S%.3f")
        );

        let ticker = match self.source.get_ticker(&market).await? {
            TickerFetch::Ticker(ticker) => ticker,
            TickerFetch::Unavailable(reason) => {
                debug!("No ticker data for {}: {}", market, reason);
                return Ok(TickOutcome::NoData(reason));
            }
        };

        let Some(price) = ticker.current_price(&market)? else {
            debug!("Ticker for {} has no price", market);
            return Ok(TickOutcome::NoPrice);
        };

        match self.rule.evaluate(price) {
            Some(alert) => {
                println!("{alert}");
                info!(
                    "Alert triggered for {}: {} >= {}",
                    market, price, alert.target_price
                );
                Ok(TickOutcome::Triggered(alert))
            }
            None => {
                debug!(
                    "{} at {} is below target {}",
                    market,
                    price,
                    self.rule.target_price()
                );
                Ok(TickOutcome::BelowTarget { price })
            }
        }
    }

    /// Poll on a fixed interval until `shutdown` is cancelled, then hand the scheduler back.
    ///
    /// A failed poll is logged and the loop carries on with the next tick.
    pub async fn run(mut self, shutdown: CancellationToken) -> Self {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            "Watching {} for price >= {} every {:?}",
            self.rule.market(),
            self.rule.target_price(),
            self.poll_interval
        );

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    info!("Price alert scheduler for {} stopped", self.rule.market());
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(err) = self.check_price_and_alert().await {
                        warn!("Price check for {} failed: {}", self.rule.market(), err);
                    }
                }
            }
        }

        self
    }
}

impl<S: TickerSource + 'static> PriceAlertScheduler<S> {
    /// Run the loop on a tokio task.
    pub fn spawn(self) -> SchedulerHandle<S> {
        let shutdown = CancellationToken::new();
        let join = tokio::spawn(self.run(shutdown.clone()));
        SchedulerHandle { shutdown, join }
    }
}

pub struct SchedulerHandle<S> {
    shutdown: CancellationToken,
    join: JoinHandle<PriceAlertScheduler<S>>,
}

impl<S> SchedulerHandle<S> {
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Cancel the loop and wait for the in-flight poll to finish.
    pub async fn stop(self) -> anyhow::Result<PriceAlertScheduler<S>> {
        self.shutdown.cancel();
        Ok(self.join.await?)
    }
}
