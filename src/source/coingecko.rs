//! CoinGecko simple-price API client
//!
//! This module issues the batch price request against CoinGecko's
//! `/simple/price` endpoint and decodes the response into a [`PriceTable`].

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{PriceSource, SourceError};
use crate::data::PriceTable;

/// Base URL for the CoinGecko v3 API
pub const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// Path of the batch price endpoint
const SIMPLE_PRICE_PATH: &str = "/simple/price";

/// Client for fetching batch prices from the CoinGecko API
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinGeckoClient {
    /// Create a new client against the public CoinGecko API
    pub fn new() -> Self {
        Self::with_base_url(COINGECKO_API_BASE)
    }

    /// Create a new client against a custom base URL
    ///
    /// Used when the configured API base is overridden, e.g. to point at a
    /// proxy or a local stand-in server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch current prices for the given coin ids and fiat currencies
    ///
    /// Both lists are joined with commas into the `ids` and `vs_currencies`
    /// query parameters, so one round trip covers the whole batch.
    ///
    /// # Returns
    /// * `Ok(PriceTable)` - Parsed prices, one entry per coin id the service
    ///   recognized
    /// * `Err(SourceError)` - If the request, response, or parsing fails
    pub async fn fetch_simple_price(
        &self,
        coin_ids: &[String],
        vs_currencies: &[String],
    ) -> Result<PriceTable, SourceError> {
        let url = format!("{}{}", self.base_url, SIMPLE_PRICE_PATH);
        let ids = coin_ids.join(",");
        let currencies = vs_currencies.join(",");
        debug!(ids = %ids, vs_currencies = %currencies, "requesting simple price");

        let response = self
            .client
            .get(&url)
            .query(&[("ids", ids.as_str()), ("vs_currencies", currencies.as_str())])
            .send()
            .await
            .map_err(SourceError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        let text = response.text().await.map_err(SourceError::Body)?;
        let table: PriceTable = serde_json::from_str(&text)?;
        Ok(table)
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn fetch_prices(
        &self,
        coin_ids: &[String],
        vs_currencies: &[String],
    ) -> Result<PriceTable, SourceError> {
        self.fetch_simple_price(coin_ids, vs_currencies).await
    }
}
