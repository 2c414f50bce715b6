use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use quidax_price_alert::config::DEFAULT_CONFIG_PATH;
use quidax_price_alert::dto::decimal_serde;
use quidax_price_alert::{Config, PriceAlertScheduler, QuidaxClient, TickOutcome, TickerFetch};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "price-alert")]
#[command(about = "Quidax price alert watcher", long_about = None)]
struct Cli {
    /// Path to config file (default: config.toml, built-in defaults if absent)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the market until stopped with Ctrl-C
    Watch(AlertArgs),
    /// Run a single price check and exit
    Check(AlertArgs),
    /// Print the current ticker for a market
    Ticker {
        /// Market to fetch (e.g. btcngn)
        market: String,
    },
}

#[derive(Args)]
struct AlertArgs {
    /// Market to watch (overrides config)
    #[arg(short, long)]
    market: Option<String>,
    /// Target price (overrides config)
    #[arg(short, long, value_parser = decimal_serde::parse_exact)]
    target: Option<Decimal>,
    /// Poll interval in seconds (overrides config)
    #[arg(short, long)]
    interval: Option<u64>,
}

impl AlertArgs {
    fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(market) = &self.market {
            config.alert.market = market.clone();
        }
        if let Some(target) = self.target {
            config.alert.target_price = target;
        }
        if let Some(interval) = self.interval {
            config.alert.poll_interval_secs = interval;
        }
        config.validate()
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::from_path(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Config::new(),
        None => {
            warn!("{} not found; using built-in defaults", DEFAULT_CONFIG_PATH);
            Ok(Config::default())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Watch(args) => {
            args.apply(&mut config)?;
            watch(config).await
        }
        Commands::Check(args) => {
            args.apply(&mut config)?;
            check(config).await
        }
        Commands::Ticker { market } => ticker(config, &market).await,
    }
}

async fn watch(config: Config) -> Result<()> {
    info!("Quidax price alert starting...");
    let client = QuidaxClient::new(&config)?;
    let handle = PriceAlertScheduler::from_config(client, &config)?.spawn();

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    info!("Shutdown requested");

    let scheduler = handle.stop().await?;
    info!(
        "Stopped watching {} (alert triggered: {})",
        scheduler.rule().market(),
        scheduler.rule().is_triggered()
    );
    Ok(())
}

async fn check(config: Config) -> Result<()> {
    let client = QuidaxClient::new(&config)?;
    let mut scheduler = PriceAlertScheduler::from_config(client, &config)?;

    match scheduler.check_price_and_alert().await? {
        TickOutcome::Triggered(_) => {}
        TickOutcome::BelowTarget { price } => println!(
            "{} is at {}, below target {}",
            config.alert.market, price, config.alert.target_price
        ),
        TickOutcome::NoData(reason) => println!("No data for {}: {}", config.alert.market, reason),
        TickOutcome::NoPrice => println!("Ticker for {} has no price", config.alert.market),
        TickOutcome::Suppressed => {}
    }
    Ok(())
}

async fn ticker(config: Config, market: &str) -> Result<()> {
    let client = QuidaxClient::new(&config)?;
    let response = client.get_market_data(market).await?;
    let at = response.data.as_ref().and_then(|data| data.timestamp());

    match response.into_ticker() {
        TickerFetch::Ticker(ticker) => {
            println!("{}", serde_json::to_string_pretty(&ticker)?);
            if let Some(at) = at {
                println!("as of {}", at.to_rfc3339());
            }
        }
        TickerFetch::Unavailable(reason) => println!("No ticker for {}: {}", market, reason),
    }
    Ok(())
}
