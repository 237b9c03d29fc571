//! Price cache storage and freshness policy
//!
//! Provides a `PriceCache` that keeps the latest batch of coin prices in
//! memory, refreshes them through a [`PriceSource`] when they go stale, and
//! falls back to the previous snapshot when the source is unavailable.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::PriceConfig;
use crate::data::{PriceTable, Quote, Value};
use crate::source::{CoinGeckoClient, PriceSource, SourceError};

/// Errors surfaced by price lookups
#[derive(Debug, Error)]
pub enum PriceError {
    /// The requested coin id was empty
    #[error("coin id must not be empty")]
    EmptyCoinId,

    /// No value is cached for the coin id and none could be fetched
    #[error("no price available for '{0}'")]
    Unavailable(String),

    /// A refresh against the price source failed
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Mutable cache state, guarded as a single unit
#[derive(Debug)]
struct CacheState {
    /// Coin ids requested on every refresh, in tracking order
    coin_ids: Vec<String>,
    /// When `entries` was last replaced by a successful refresh
    last_refreshed: Option<DateTime<Utc>>,
    /// Latest snapshot, one entry per tracked coin id
    entries: PriceTable,
}

/// In-memory cache of coin prices with a fixed staleness threshold
///
/// Construct one per process and share it via [`Arc`]; every method takes
/// `&self`. All state sits behind a single async mutex that stays held
/// across the refresh round trip, so concurrent lookups that find the cache
/// stale collapse into one outbound request: whoever acquires the lock next
/// re-checks freshness and finds the data already renewed.
pub struct PriceCache {
    config: PriceConfig,
    source: Arc<dyn PriceSource>,
    state: Mutex<CacheState>,
}

impl PriceCache {
    /// Creates a cache backed by the CoinGecko API at the configured base URL
    pub fn new(config: PriceConfig) -> Self {
        let source = Arc::new(CoinGeckoClient::with_base_url(config.api_base.clone()));
        Self::with_source(config, source)
    }

    /// Creates a cache backed by a custom price source
    ///
    /// Useful for testing, or for routing lookups through a different
    /// service than CoinGecko.
    pub fn with_source(config: PriceConfig, source: Arc<dyn PriceSource>) -> Self {
        let state = CacheState {
            coin_ids: config.coin_ids.clone(),
            last_refreshed: None,
            entries: PriceTable::new(),
        };
        Self {
            config,
            source,
            state: Mutex::new(state),
        }
    }

    /// Performs one eager refresh of the configured coin-id set
    ///
    /// Call this at startup so the first lookup does not pay cold-miss
    /// latency. On failure the cache stays empty and the next lookup
    /// triggers the fetch again.
    pub async fn init(&self) -> Result<(), PriceError> {
        let mut state = self.state.lock().await;
        self.refresh_locked(&mut state).await?;
        Ok(())
    }

    /// Returns the market value of `coin_id`, refreshing the cache first if
    /// the entry is missing or stale
    ///
    /// Behavior by cache state:
    /// * No entry: the id joins the tracked set and a refresh runs before
    ///   returning; a failed refresh surfaces as an error.
    /// * Stale entry: a refresh runs; if it fails, the previous value is
    ///   returned with `is_stale = true` and the failure is logged.
    /// * Fresh entry: returned without touching the network.
    pub async fn value(&self, coin_id: &str) -> Result<Quote, PriceError> {
        if coin_id.is_empty() {
            return Err(PriceError::EmptyCoinId);
        }

        let mut state = self.state.lock().await;

        if !state.entries.contains_key(coin_id) {
            // Cold miss: start tracking the id, then fetch. The id stays
            // tracked even if this refresh fails, so the next one covers it.
            if !state.coin_ids.iter().any(|id| id == coin_id) {
                state.coin_ids.push(coin_id.to_string());
            }
            self.refresh_locked(&mut state).await?;
            return self
                .quote_locked(&state, coin_id)
                .ok_or_else(|| PriceError::Unavailable(coin_id.to_string()));
        }

        if self.stale_locked(&state) {
            if let Err(err) = self.refresh_locked(&mut state).await {
                warn!(coin_id, error = %err, "refresh failed, serving stale price");
            }
        }

        self.quote_locked(&state, coin_id)
            .ok_or_else(|| PriceError::Unavailable(coin_id.to_string()))
    }

    /// Adds `coin_id` to the set requested by future refreshes
    ///
    /// Already-tracked ids are left as they are. Cached entries are not
    /// touched until the next refresh.
    pub async fn add_coin_id(&self, coin_id: impl Into<String>) {
        let coin_id = coin_id.into();
        let mut state = self.state.lock().await;
        if !state.coin_ids.contains(&coin_id) {
            state.coin_ids.push(coin_id);
        }
    }

    /// Removes `coin_id` from the set requested by future refreshes
    ///
    /// Unknown ids are a no-op. An existing cached entry survives until the
    /// next refresh replaces the snapshot.
    pub async fn remove_coin_id(&self, coin_id: &str) {
        let mut state = self.state.lock().await;
        state.coin_ids.retain(|tracked| tracked != coin_id);
    }

    /// Returns the tracked coin ids in tracking order
    pub async fn coin_ids(&self) -> Vec<String> {
        self.state.lock().await.coin_ids.clone()
    }

    /// Returns when the cache was last successfully refreshed
    ///
    /// `None` until the first successful refresh.
    pub async fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.state.lock().await.last_refreshed
    }

    /// Replaces the snapshot with a fresh fetch of the tracked set
    ///
    /// On failure the previous `entries` and `last_refreshed` are left
    /// untouched. On success every tracked id has an entry: ids missing
    /// from the response are filled in with zero values.
    async fn refresh_locked(&self, state: &mut CacheState) -> Result<(), SourceError> {
        let mut entries = self
            .source
            .fetch_prices(&state.coin_ids, &self.config.vs_currencies)
            .await?;

        for coin_id in &state.coin_ids {
            if !entries.contains_key(coin_id) {
                entries.insert(coin_id.clone(), Value::zeroed(&self.config.vs_currencies));
            }
        }

        debug!(coins = state.coin_ids.len(), "price cache refreshed");
        state.entries = entries;
        state.last_refreshed = Some(Utc::now());
        Ok(())
    }

    /// Whether the snapshot is absent or at least `max_age` old
    fn stale_locked(&self, state: &CacheState) -> bool {
        match state.last_refreshed {
            Some(refreshed_at) => is_older_than(refreshed_at, Utc::now(), self.config.max_age),
            None => true,
        }
    }

    /// Builds the quote for `coin_id` from the current snapshot
    fn quote_locked(&self, state: &CacheState, coin_id: &str) -> Option<Quote> {
        let value = state.entries.get(coin_id)?.clone();
        let refreshed_at = state.last_refreshed?;
        Some(Quote {
            value,
            refreshed_at,
            is_stale: is_older_than(refreshed_at, Utc::now(), self.config.max_age),
        })
    }
}

/// Whether `then` lies at least `max_age` before `now`
///
/// A `then` in the future (e.g. after a clock adjustment) counts as not
/// yet aged.
fn is_older_than(then: DateTime<Utc>, now: DateTime<Utc>, max_age: Duration) -> bool {
    match (now - then).to_std() {
        Ok(age) => age >= max_age,
        Err(_) => false,
    }
}
