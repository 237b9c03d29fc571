//! Configuration for the price cache
//!
//! Collects the recognized options in one place: the tracked coin-id set,
//! the fiat currencies each value is quoted in, the staleness threshold,
//! and the API base URL.

use std::time::Duration;

use crate::source::COINGECKO_API_BASE;

/// Coin ids tracked when no explicit set is configured
pub const DEFAULT_COIN_IDS: [&str; 4] = ["ripple", "ethereum", "tron", "neo"];

/// Fiat currencies quoted when no explicit set is configured
pub const DEFAULT_VS_CURRENCIES: [&str; 2] = ["eur", "usd"];

/// Maximum age of cached prices before a lookup forces a refresh
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(300); // 5 minutes

/// Options for [`PriceCache`](crate::cache::PriceCache)
#[derive(Debug, Clone)]
pub struct PriceConfig {
    /// Coin ids requested on every refresh
    pub coin_ids: Vec<String>,
    /// Fiat currencies each value is quoted in
    pub vs_currencies: Vec<String>,
    /// Cached prices older than this force a refresh on lookup
    pub max_age: Duration,
    /// Base URL of the price service API
    pub api_base: String,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            coin_ids: DEFAULT_COIN_IDS.iter().map(|id| id.to_string()).collect(),
            vs_currencies: DEFAULT_VS_CURRENCIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            max_age: DEFAULT_MAX_AGE,
            api_base: COINGECKO_API_BASE.to_string(),
        }
    }
}

impl PriceConfig {
    /// Replace the tracked coin-id set
    pub fn with_coin_ids<I, S>(mut self, coin_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.coin_ids = coin_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the quoted fiat currencies
    pub fn with_vs_currencies<I, S>(mut self, vs_currencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vs_currencies = vs_currencies.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the staleness threshold
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Replace the API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_config_default() {
        let config = PriceConfig::default();

        assert_eq!(config.coin_ids, ["ripple", "ethereum", "tron", "neo"]);
        assert_eq!(config.vs_currencies, ["eur", "usd"]);
        assert_eq!(config.max_age, Duration::from_secs(300));
        assert_eq!(config.api_base, COINGECKO_API_BASE);
    }

    #[test]
    fn test_price_config_builders() {
        let config = PriceConfig::default()
            .with_coin_ids(["bitcoin", "cardano"])
            .with_vs_currencies(["gbp"])
            .with_max_age(Duration::from_secs(60))
            .with_api_base("http://localhost:9090");

        assert_eq!(config.coin_ids, ["bitcoin", "cardano"]);
        assert_eq!(config.vs_currencies, ["gbp"]);
        assert_eq!(config.max_age, Duration::from_secs(60));
        assert_eq!(config.api_base, "http://localhost:9090");
    }
}
