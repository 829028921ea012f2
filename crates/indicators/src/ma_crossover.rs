// In crates/indicators/src/ma_crossover.rs

use core_types::Crossover;
use rust_decimal::Decimal;

use crate::crossover::classify;
use crate::error::{Error, Result};
use crate::sma::simple_moving_average;
use crate::types::MACrossoverSettings;
use crate::{Assessment, Strategy};

/// Simple moving average crossover: a short SMA crossing a long SMA.
///
/// Both averages are recomputed from the full series on every call.
#[derive(Debug, Clone)]
pub struct MACrossover {
    short_period: usize,
    long_period: usize,
}

impl MACrossover {
    /// Creates a new `MACrossover` strategy instance from its settings.
    pub fn new(settings: MACrossoverSettings) -> Result<Self> {
        if settings.short_period == 0 || settings.short_period >= settings.long_period {
            return Err(Error::InvalidSettings(format!(
                "short_period ({}) must be at least 1 and below long_period ({})",
                settings.short_period, settings.long_period
            )));
        }
        Ok(Self {
            short_period: settings.short_period as usize,
            long_period: settings.long_period as usize,
        })
    }

    fn reason(&self, crossover: Crossover) -> String {
        let direction = match crossover {
            Crossover::Bullish => "above",
            Crossover::Bearish => "below",
            Crossover::None => return String::new(),
        };
        format!(
            "{}-period simple moving average crossed {} the {}-period simple moving average.",
            self.short_period, direction, self.long_period
        )
    }
}

impl Strategy for MACrossover {
    fn name(&self) -> &'static str {
        "MACrossover"
    }

    fn indicator(&self) -> String {
        format!("SMA Crossover ({}, {})", self.short_period, self.long_period)
    }

    fn required_history(&self) -> usize {
        // One extra close so the long average has a previous value to compare.
        self.long_period + 1
    }

    fn assess(&self, closes: &[Decimal]) -> Result<Assessment> {
        if closes.len() < self.required_history() {
            return Err(Error::InsufficientData {
                required: self.required_history(),
                available: closes.len(),
            });
        }

        let short = simple_moving_average(closes, self.short_period)?;
        let long = simple_moving_average(closes, self.long_period)?;
        let crossover = classify(&short, &long)?;

        // The length check above guarantees all three series are non-empty.
        let last = |series: &[Decimal]| series.last().copied().unwrap_or_default();

        Ok(Assessment {
            crossover,
            last_close: last(closes),
            last_short: last(&short),
            last_long: last(&long),
            reason: self.reason(crossover),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn strategy() -> MACrossover {
        MACrossover::new(MACrossoverSettings::default()).unwrap()
    }

    #[test]
    fn rejects_inverted_or_zero_periods() {
        let inverted = MACrossoverSettings { short_period: 21, long_period: 9 };
        assert!(matches!(MACrossover::new(inverted), Err(Error::InvalidSettings(_))));

        let zero = MACrossoverSettings { short_period: 0, long_period: 9 };
        assert!(MACrossover::new(zero).is_err());
    }

    #[test]
    fn labels_the_indicator_with_its_periods() {
        assert_eq!(strategy().indicator(), "SMA Crossover (9, 21)");
        assert_eq!(strategy().required_history(), 22);
    }

    #[test]
    fn needs_long_period_plus_one_closes() {
        let closes = vec![dec!(1); 21];
        assert_eq!(
            strategy().assess(&closes).unwrap_err(),
            Error::InsufficientData { required: 22, available: 21 }
        );
    }

    #[test]
    fn flat_series_has_no_crossover() {
        let assessment = strategy().assess(&vec![dec!(42); 100]).unwrap();
        assert_eq!(assessment.crossover, Crossover::None);
        assert_eq!(assessment.last_close, dec!(42));
        assert!(assessment.reason.is_empty());
    }

    #[test]
    fn sharp_drop_after_an_uptrend_is_bearish() {
        // Rising 100..=123, then a collapse on the last candle.
        let mut closes: Vec<Decimal> = (0..24).map(|i| Decimal::from(100 + i)).collect();
        closes.push(dec!(0));

        let assessment = strategy().assess(&closes).unwrap();
        assert_eq!(assessment.crossover, Crossover::Bearish);
        assert_eq!(assessment.last_close, dec!(0));
        assert!(assessment.last_short < assessment.last_long);
        assert!(assessment.reason.contains("crossed below"));
    }
}
