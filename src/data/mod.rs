//! Data models for cached cryptocurrency prices
//!
//! The types here mirror the shape of CoinGecko's simple-price responses:
//! a JSON object keyed by coin id, each holding an object keyed by fiat
//! currency code. [`Quote`] wraps a cached value together with its freshness
//! so callers can tell a live price from a stale one.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parsed body of a simple-price response: coin id mapped to its value.
pub type PriceTable = HashMap<String, Value>;

/// Market value of a single coin, keyed by fiat currency code.
///
/// Serializes transparently as the raw response shape, for example
/// `{"eur": 0.45, "usd": 0.51}`. Amounts are kept in an ordered map so
/// printed output is deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Value {
    /// Amount per currency code, e.g. "eur" -> 0.45
    pub amounts: BTreeMap<String, f64>,
}

impl Value {
    /// Returns the amount quoted in `currency`, if present.
    pub fn amount(&self, currency: &str) -> Option<f64> {
        self.amounts.get(currency).copied()
    }

    /// Builds a zero-valued entry covering every listed currency.
    ///
    /// Used to fill in tracked coin ids that the remote response omitted,
    /// so a successful refresh always yields one entry per tracked id.
    pub fn zeroed(currencies: &[String]) -> Self {
        Self {
            amounts: currencies.iter().map(|c| (c.clone(), 0.0)).collect(),
        }
    }
}

/// Result of a price lookup, including how fresh the cached value is.
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    /// The cached market value
    pub value: Value,
    /// When the snapshot holding this value was taken
    pub refreshed_at: DateTime<Utc>,
    /// Whether the value is older than the configured staleness threshold
    pub is_stale: bool,
}
