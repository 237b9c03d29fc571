//! Command-line interface parsing for coincache
//!
//! This module handles parsing of CLI arguments using clap and maps them
//! into the [`PriceConfig`] the cache is constructed from.

use std::time::Duration;

use clap::Parser;

use crate::config::{PriceConfig, DEFAULT_COIN_IDS};

/// coincache - Cryptocurrency price lookup through a time-bounded cache
#[derive(Parser, Debug)]
#[command(name = "coincache")]
#[command(about = "Look up cryptocurrency prices through a time-bounded CoinGecko cache")]
#[command(version)]
pub struct Cli {
    /// Coin ids to look up
    ///
    /// Examples:
    ///   coincache                      # Look up the default set
    ///   coincache bitcoin              # Look up bitcoin only
    ///   coincache bitcoin ethereum     # Look up several coins
    ///
    /// Defaults to: ripple, ethereum, tron, neo
    #[arg(value_name = "COIN_ID")]
    pub coins: Vec<String>,

    /// Fiat currencies to quote each coin in, comma separated
    #[arg(long, value_name = "CODE", value_delimiter = ',', default_values = ["eur", "usd"])]
    pub vs: Vec<String>,

    /// Maximum cache age in seconds before a lookup refetches prices
    #[arg(long, value_name = "SECONDS", default_value_t = 300)]
    pub max_age_secs: u64,

    /// Print quotes as a JSON object instead of plain text
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Builds the cache configuration implied by the arguments.
    ///
    /// Requested coins become the tracked set; with no coins given, the
    /// default set stays in place.
    pub fn to_config(&self) -> PriceConfig {
        let mut config = PriceConfig::default()
            .with_vs_currencies(self.vs.clone())
            .with_max_age(Duration::from_secs(self.max_age_secs));
        if !self.coins.is_empty() {
            config = config.with_coin_ids(self.coins.clone());
        }
        config
    }

    /// Coin ids the binary should print, in request order.
    pub fn requested_coins(&self) -> Vec<String> {
        if self.coins.is_empty() {
            DEFAULT_COIN_IDS.iter().map(|id| id.to_string()).collect()
        } else {
            self.coins.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["coincache"]);

        assert!(cli.coins.is_empty());
        assert_eq!(cli.vs, ["eur", "usd"]);
        assert_eq!(cli.max_age_secs, 300);
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_parse_positional_coins() {
        let cli = Cli::parse_from(["coincache", "bitcoin", "ethereum"]);

        assert_eq!(cli.coins, ["bitcoin", "ethereum"]);
    }

    #[test]
    fn test_cli_parse_vs_comma_separated() {
        let cli = Cli::parse_from(["coincache", "--vs", "eur,usd,gbp"]);

        assert_eq!(cli.vs, ["eur", "usd", "gbp"]);
    }

    #[test]
    fn test_cli_parse_vs_single_currency_replaces_defaults() {
        let cli = Cli::parse_from(["coincache", "--vs", "pln"]);

        assert_eq!(cli.vs, ["pln"]);
    }

    #[test]
    fn test_cli_parse_max_age() {
        let cli = Cli::parse_from(["coincache", "--max-age-secs", "60"]);

        assert_eq!(cli.max_age_secs, 60);
    }

    #[test]
    fn test_cli_parse_json_flag() {
        let cli = Cli::parse_from(["coincache", "--json"]);

        assert!(cli.json);
    }

    #[test]
    fn test_cli_parse_invalid_max_age_fails() {
        let result = Cli::try_parse_from(["coincache", "--max-age-secs", "soon"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_to_config_without_coins_keeps_default_set() {
        let cli = Cli::parse_from(["coincache"]);
        let config = cli.to_config();

        assert_eq!(config.coin_ids, ["ripple", "ethereum", "tron", "neo"]);
        assert_eq!(config.vs_currencies, ["eur", "usd"]);
        assert_eq!(config.max_age, Duration::from_secs(300));
    }

    #[test]
    fn test_to_config_with_coins_replaces_tracked_set() {
        let cli = Cli::parse_from(["coincache", "bitcoin", "--vs", "gbp", "--max-age-secs", "30"]);
        let config = cli.to_config();

        assert_eq!(config.coin_ids, ["bitcoin"]);
        assert_eq!(config.vs_currencies, ["gbp"]);
        assert_eq!(config.max_age, Duration::from_secs(30));
    }

    #[test]
    fn test_requested_coins_default_set() {
        let cli = Cli::parse_from(["coincache"]);

        assert_eq!(
            cli.requested_coins(),
            ["ripple", "ethereum", "tron", "neo"]
        );
    }

    #[test]
    fn test_requested_coins_keep_request_order() {
        let cli = Cli::parse_from(["coincache", "neo", "bitcoin"]);

        assert_eq!(cli.requested_coins(), ["neo", "bitcoin"]);
    }
}
