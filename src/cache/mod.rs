//! In-memory price cache with a staleness threshold
//!
//! This module provides the cache that holds the last simple-price snapshot
//! and refreshes it through a price source when a lookup finds the data
//! missing or too old. It supports graceful degradation by serving the
//! previous snapshot with an `is_stale` flag when a refresh attempt fails,
//! so transient API outages do not take lookups down with them.

mod store;

pub use store::{PriceCache, PriceError};
