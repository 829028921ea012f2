// In crates/indicators/src/crossover.rs

use core_types::Crossover;
use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// Classifies the latest transition between a short and a long average.
///
/// Both series must end at the same underlying time index; only their last
/// two values are compared. A crossing needs a strict inequality on the
/// latest sample, so two tied samples never count as one.
///
/// # Errors
///
/// `Error::InsufficientData` if either series has fewer than two values.
pub fn classify(short: &[Decimal], long: &[Decimal]) -> Result<Crossover> {
    let (prev_short, last_short) = last_two(short)?;
    let (prev_long, last_long) = last_two(long)?;

    let crossover = if prev_short <= prev_long && last_short > last_long {
        Crossover::Bullish
    } else if prev_short >= prev_long && last_short < last_long {
        Crossover::Bearish
    } else {
        Crossover::None
    };

    Ok(crossover)
}

fn last_two(series: &[Decimal]) -> Result<(Decimal, Decimal)> {
    match series {
        [.., prev, last] => Ok((*prev, *last)),
        _ => Err(Error::InsufficientData {
            required: 2,
            available: series.len(),
        }),
    }
}
