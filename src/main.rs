//! Signal Engine - smoke runner
//!
//! One-shot manual check of the engine against real collaborators: resolves
//! a signal's quote symbol, fetches the live close and derives the outcome,
//! optionally resolving a media reference on the way.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use signal_engine::config;
use signal_engine::{
    Direction, HttpQuoteSource, MediaResolver, OutcomeEngine, Signal, SignalCategory,
    SignalParams, SupabaseRestClient, SupabaseStorageClient,
};

/// CLI arguments for the smoke runner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Instrument pair to evaluate (e.g. EUR/USD)
    #[arg(long, default_value = "EUR/USD")]
    pair: String,

    /// Entry price
    #[arg(long)]
    entry: Option<f64>,

    /// Stop-loss price
    #[arg(long)]
    stop: Option<f64>,

    /// Take-profit price
    #[arg(long)]
    take_profit: Option<f64>,

    /// Direction (BUY or SELL)
    #[arg(long, default_value = "BUY")]
    direction: String,

    /// Raw media reference to resolve
    #[arg(long)]
    media: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    dotenvy::dotenv().ok();

    let config = config::load_config(Some(&args.config))
        .or_else(|_| config::load_from_env())?;
    let timeout = Duration::from_secs(config.settings.request_timeout_seconds);

    let rest = Arc::new(SupabaseRestClient::from_config(&config.supabase, timeout)?);
    let storage = Arc::new(SupabaseStorageClient::from_config(&config.supabase, timeout)?);
    let quotes = Arc::new(HttpQuoteSource::from_config(&config.quotes, timeout)?);

    let direction = match args.direction.to_uppercase().as_str() {
        "SELL" => Direction::Sell,
        _ => Direction::Buy,
    };

    let signal = Signal {
        id: "smoke".to_string(),
        pair: args.pair.clone(),
        category: SignalCategory::Forex,
        params: SignalParams::new(direction, args.entry, args.stop, args.take_profit),
        entry_quote_id: None,
        analysis_media: args.media.clone(),
    };

    let engine = OutcomeEngine::new(quotes, rest);
    let snapshot = engine.live_close_snapshot(&signal).await?;
    info!(
        symbol = %snapshot.symbol,
        close = snapshot.close_price,
        status = %snapshot.status,
        rr = snapshot.rr,
        "live close snapshot"
    );

    if let Some(media) = &args.media {
        let resolver = MediaResolver::with_ttl(
            storage.clone(),
            storage,
            &config.supabase.storage_bucket,
            Duration::from_secs(config.supabase.signed_url_ttl_seconds),
        );
        match resolver.resolve(media).await {
            Some(url) => info!(%url, "resolved media reference"),
            None => info!("media reference did not resolve"),
        }
    }

    Ok(())
}
