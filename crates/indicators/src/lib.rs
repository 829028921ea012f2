// In crates/indicators/src/lib.rs

use core_types::Crossover;
use rust_decimal::Decimal;

pub mod crossover;
pub mod error;
pub mod ma_crossover;
pub mod sma;
pub mod types;

// Re-export public types
pub use crossover::classify;
pub use error::{Error, Result};
pub use ma_crossover::MACrossover;
pub use sma::simple_moving_average;

/// The universal interface for a signal source.
///
/// A strategy turns a chronological series of closing prices into an
/// `Assessment`. Implementations hold no state between calls: the same
/// input always produces the same assessment.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    /// A human-readable label of the computed indicator, stored with every
    /// notification (e.g., "SMA Crossover (9, 21)").
    fn indicator(&self) -> String;

    /// The minimum number of closes `assess` needs.
    fn required_history(&self) -> usize;

    fn assess(&self, closes: &[Decimal]) -> Result<Assessment>;
}

/// The outcome of assessing one price series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub crossover: Crossover,
    /// The most recent close of the assessed series.
    pub last_close: Decimal,
    pub last_short: Decimal,
    pub last_long: Decimal,
    /// Free-text explanation of the crossover; empty when there is none.
    pub reason: String,
}
