// In crates/indicators/src/sma.rs

use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// Computes the simple moving average of `series` for `period`.
///
/// The result holds one average per window ending at each index
/// `>= period - 1`, so it has `series.len() - period + 1` elements and its
/// last element belongs to the last input value. All arithmetic stays in
/// fixed-point `Decimal`; every window is summed from scratch, so no rounding
/// error accumulates along the series.
///
/// # Errors
///
/// * `Error::InvalidPeriod` if `period` is zero.
/// * `Error::InsufficientData` if the series is shorter than `period`.
pub fn simple_moving_average(series: &[Decimal], period: usize) -> Result<Vec<Decimal>> {
    if period == 0 {
        return Err(Error::InvalidPeriod);
    }
    if series.len() < period {
        return Err(Error::InsufficientData {
            required: period,
            available: series.len(),
        });
    }

    let divisor = Decimal::from(period);
    Ok(series
        .windows(period)
        .map(|window| window.iter().sum::<Decimal>() / divisor)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn averages_each_trailing_window() {
        let series = [dec!(1), dec!(2), dec!(3), dec!(4), dec!(5)];
        let sma = simple_moving_average(&series, 3).unwrap();
        assert_eq!(sma, vec![dec!(2), dec!(3), dec!(4)]);
    }

    #[test]
    fn period_equal_to_length_yields_one_value() {
        let series = [dec!(10), dec!(20)];
        assert_eq!(simple_moving_average(&series, 2).unwrap(), vec![dec!(15)]);
    }

    #[test]
    fn period_one_is_the_series_itself() {
        let series = [dec!(0.00000001), dec!(65000.5)];
        assert_eq!(simple_moving_average(&series, 1).unwrap(), series.to_vec());
    }

    #[test]
    fn keeps_crypto_precision() {
        let series = [dec!(0.00000001), dec!(0.00000002), dec!(0.00000003)];
        assert_eq!(
            simple_moving_average(&series, 3).unwrap(),
            vec![dec!(0.00000002)]
        );
    }

    #[test]
    fn short_series_is_insufficient() {
        let err = simple_moving_average(&[dec!(1), dec!(2)], 3).unwrap_err();
        assert_eq!(err, Error::InsufficientData { required: 3, available: 2 });
        assert!(simple_moving_average(&[], 1).is_err());
    }

    #[test]
    fn zero_period_is_rejected() {
        assert_eq!(
            simple_moving_average(&[dec!(1)], 0).unwrap_err(),
            Error::InvalidPeriod
        );
    }
}
