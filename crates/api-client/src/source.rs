// In crates/api-client/src/source.rs

use async_trait::async_trait;
use core_types::Symbol;
use rust_decimal::Decimal;

use crate::Result;

/// A provider of historical closing prices.
///
/// Implementations return the closes of the most recent `limit` candles of
/// `interval` in chronological order (oldest first). Any failure, including
/// an unknown symbol or an empty answer, is an error.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// The name of the provider (e.g., "BinanceSpot").
    fn name(&self) -> &'static str;

    async fn fetch_closes(&self, symbol: &Symbol, interval: &str, limit: u16) -> Result<Vec<Decimal>>;
}
