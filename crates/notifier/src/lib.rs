// In crates/notifier/src/lib.rs

use std::sync::Arc;

use async_trait::async_trait;
use core_types::{NewNotification, Notification, Signal, Symbol};
use rust_decimal::Decimal;

pub mod error;
pub mod memory;
pub mod postgres;

// Re-export public types
pub use error::{Error, Result};
pub use memory::InMemorySink;
pub use postgres::PostgresSink;

/// Scale at which prices are stored (`numeric(26, 8)`).
pub const PRICE_SCALE: u32 = 8;

/// The universal interface for durable notification storage.
///
/// A sink either stores the notification and returns it with its assigned
/// `id` and `created_at`, or reports `Error::PersistenceFailure`. It never
/// drops a write silently and never updates or deletes existing rows.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// The name of the sink (e.g., "Postgres", "InMemory").
    fn name(&self) -> &'static str;

    async fn persist(&self, notification: NewNotification) -> Result<Notification>;
}

/// Turns detected crossovers into persisted notifications.
#[derive(Clone)]
pub struct SignalNotifier {
    sink: Arc<dyn NotificationSink>,
}

impl SignalNotifier {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    pub fn sink_name(&self) -> &'static str {
        self.sink.name()
    }

    /// Builds and persists one notification.
    ///
    /// The price is rounded to the stored scale before the write, so the
    /// returned record matches what a later read of the store yields.
    pub async fn record_signal(
        &self,
        asset: &Symbol,
        signal: Signal,
        price_at_signal: Decimal,
        indicator: &str,
        reason: &str,
    ) -> Result<Notification> {
        if asset.0.trim().is_empty() {
            return Err(Error::InvalidNotification { reason: "asset is empty".into() });
        }
        if indicator.trim().is_empty() {
            return Err(Error::InvalidNotification { reason: "indicator is empty".into() });
        }

        let new = NewNotification {
            asset: asset.0.clone(),
            signal,
            price_at_signal: price_at_signal.round_dp(PRICE_SCALE),
            indicator: indicator.to_string(),
            reason: reason.to_string(),
        };

        let notification = self.sink.persist(new).await?;
        tracing::info!(
            id = notification.id,
            asset = %notification.asset,
            signal = %notification.signal,
            price = %notification.price_at_signal,
            sink = self.sink.name(),
            "Recorded crossover notification."
        );
        Ok(notification)
    }
}
