//! Remote price sources
//!
//! This module defines the [`PriceSource`] seam the cache fetches batches of
//! prices through, along with the CoinGecko implementation used in
//! production. Tests substitute their own source to script responses and
//! observe outbound requests.

mod coingecko;

pub use coingecko::{CoinGeckoClient, COINGECKO_API_BASE};

use async_trait::async_trait;
use thiserror::Error;

use crate::data::PriceTable;

/// Errors that can occur while fetching a batch of prices
#[derive(Debug, Error)]
pub enum SourceError {
    /// Request could not be built or sent
    #[error("request to price service failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Service answered with a non-success status code
    #[error("price service returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// Response arrived but its body could not be read
    #[error("failed to read price service response: {0}")]
    Body(#[source] reqwest::Error),

    /// Body was not a valid simple-price document
    #[error("failed to parse price response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A remote service that quotes a batch of coins in a batch of currencies
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch current prices for `coin_ids`, each quoted in `vs_currencies`.
    ///
    /// Implementations return the parsed table as-is. Filling in ids the
    /// response omitted is the cache's concern, not the source's.
    async fn fetch_prices(
        &self,
        coin_ids: &[String],
        vs_currencies: &[String],
    ) -> Result<PriceTable, SourceError>;
}
