// In crates/core-types/src/types.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A trading pair symbol as the market-data provider spells it (e.g., "BTCUSDT").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol(value.to_string())
    }
}

/// One closing price of a candle. Only lives for the duration of a single asset scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricePoint {
    /// Candle close time in milliseconds since the epoch.
    pub close_time: i64,
    pub close: Decimal,
}

/// The direction of a persisted notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "buy",
            Signal::Sell => "sell",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Signal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Signal::Buy),
            "sell" => Ok(Signal::Sell),
            other => Err(Error::UnknownSignal(other.to_string())),
        }
    }
}

/// The classification of the latest transition between a short and a long average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Crossover {
    #[default]
    None,
    /// The short average moved from at-or-below to strictly above the long one.
    Bullish,
    /// The short average moved from at-or-above to strictly below the long one.
    Bearish,
}

impl Crossover {
    /// The signal to persist for this crossover, if any.
    pub fn signal(&self) -> Option<Signal> {
        match self {
            Crossover::None => None,
            Crossover::Bullish => Some(Signal::Buy),
            Crossover::Bearish => Some(Signal::Sell),
        }
    }
}

/// A notification that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub asset: String,
    pub signal: Signal,
    pub price_at_signal: Decimal,
    pub indicator: String,
    pub reason: String,
}

/// A persisted crossover notification. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub asset: String,
    pub signal: Signal,
    pub price_at_signal: Decimal,
    pub indicator: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Builds the stored record from its unsaved form and the store-assigned fields.
    pub fn from_new(new: NewNotification, id: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            asset: new.asset,
            signal: new.signal,
            price_at_signal: new.price_at_signal,
            indicator: new.indicator,
            reason: new.reason,
            created_at,
        }
    }
}
