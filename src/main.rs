//! coincache - Cryptocurrency price lookup through a time-bounded cache
//!
//! A small CLI over the coincache library: it warms the price cache once,
//! looks up each requested coin, and prints the quotes as text or JSON.

use std::collections::BTreeMap;
use std::process::ExitCode;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use coincache::cache::PriceCache;
use coincache::cli::Cli;
use coincache::data::Quote;

/// Routes log output to stderr, honoring `RUST_LOG` when set
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("coincache=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Formats one quote as a single text line, e.g. `ripple: eur 0.45  usd 0.51`
fn format_quote(coin_id: &str, quote: &Quote) -> String {
    let amounts = quote
        .value
        .amounts
        .iter()
        .map(|(currency, amount)| format!("{currency} {amount}"))
        .collect::<Vec<_>>()
        .join("  ");
    if quote.is_stale {
        format!("{coin_id}: {amounts}  (stale)")
    } else {
        format!("{coin_id}: {amounts}")
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let coins = cli.requested_coins();
    let cache = PriceCache::new(cli.to_config());

    // Warm the cache up front; lookups below retry on their own if this fails
    if let Err(err) = cache.init().await {
        warn!(error = %err, "initial refresh failed");
    }

    let mut quotes = BTreeMap::new();
    let mut failed = false;
    for coin_id in &coins {
        match cache.value(coin_id).await {
            Ok(quote) => {
                quotes.insert(coin_id.clone(), quote);
            }
            Err(err) => {
                eprintln!("{coin_id}: {err}");
                failed = true;
            }
        }
    }

    if cli.json {
        match serde_json::to_string_pretty(&quotes) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("failed to encode quotes: {err}");
                failed = true;
            }
        }
    } else {
        for coin_id in &coins {
            if let Some(quote) = quotes.get(coin_id) {
                println!("{}", format_quote(coin_id, quote));
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
