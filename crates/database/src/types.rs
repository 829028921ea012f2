// In crates/database/src/types.rs

use chrono::{DateTime, Utc};
use core_types::{Notification, Signal};
use rust_decimal::Decimal;

use crate::error::Error;

/// A row of the `notification` table as selected by this crate.
///
/// The `signal` enum is read back as text and parsed into `Signal`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NotificationRow {
    pub id: i64,
    pub asset: String,
    pub signal: String,
    pub price_at_signal: Decimal,
    pub indicator: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = Error;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let signal: Signal = row.signal.parse().map_err(|e: core_types::Error| Error::InvalidRow {
            table: "notification",
            reason: e.to_string(),
        })?;

        Ok(Notification {
            id: row.id,
            asset: row.asset,
            signal,
            price_at_signal: row.price_at_signal,
            indicator: row.indicator,
            reason: row.reason,
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(signal: &str) -> NotificationRow {
        NotificationRow {
            id: 1,
            asset: "ETHUSDT".into(),
            signal: signal.into(),
            price_at_signal: dec!(3500.12345678),
            indicator: "SMA Crossover (9, 21)".into(),
            reason: "crossed".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn converts_rows_into_notifications() {
        let notification = Notification::try_from(row("sell")).unwrap();
        assert_eq!(notification.signal, Signal::Sell);
        assert_eq!(notification.price_at_signal, dec!(3500.12345678));
        assert_eq!(notification.asset, "ETHUSDT");
    }

    #[test]
    fn rejects_signals_outside_buy_and_sell() {
        let err = Notification::try_from(row("neutral")).unwrap_err();
        assert!(matches!(err, Error::InvalidRow { table: "notification", .. }));
    }
}
