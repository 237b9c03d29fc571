//! Cached access to CoinGecko cryptocurrency prices
//!
//! This crate keeps a small in-memory price table, refreshes it through the
//! CoinGecko simple-price endpoint when a lookup finds it missing or stale,
//! and serves the previous snapshot flagged as stale when the API is
//! unavailable.

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod source;

pub use cache::{PriceCache, PriceError};
pub use config::PriceConfig;
pub use data::{PriceTable, Quote, Value};
pub use source::{CoinGeckoClient, PriceSource, SourceError};
