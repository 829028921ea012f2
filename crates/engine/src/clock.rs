// In crates/engine/src/clock.rs

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};

/// Decides when the next scan cycle is due.
#[async_trait]
pub trait Ticker: Send + 'static {
    /// Completes when the next cycle should start. Returns `false` once the
    /// ticker can never fire again.
    async fn tick(&mut self) -> bool;
}

/// Fires immediately, then every `period` measured from the previous tick.
///
/// A cycle that outlasts the period delays the next tick instead of
/// skipping it or letting it overlap.
pub struct IntervalTicker {
    period: Duration,
    // Created on the first tick so construction does not need a runtime.
    interval: Option<Interval>,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        Self { period, interval: None }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) -> bool {
        let period = self.period;
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        interval.tick().await;
        true
    }
}

/// A ticker driven by hand through its `TickTrigger`s.
pub struct ManualTicker {
    rx: mpsc::UnboundedReceiver<()>,
}

/// Fires a `ManualTicker`. Once every trigger is dropped the ticker stops.
#[derive(Clone)]
pub struct TickTrigger {
    tx: mpsc::UnboundedSender<()>,
}

impl ManualTicker {
    pub fn new() -> (Self, TickTrigger) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx }, TickTrigger { tx })
    }
}

impl TickTrigger {
    /// Requests one more cycle. Ticks queue up while a cycle is running.
    pub fn tick(&self) {
        let _ = self.tx.send(());
    }
}

#[async_trait]
impl Ticker for ManualTicker {
    async fn tick(&mut self) -> bool {
        self.rx.recv().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn interval_ticker_fires_at_once_then_every_period() {
        let mut ticker = IntervalTicker::new(Duration::from_secs(600));
        let start = Instant::now();

        assert!(ticker.tick().await);
        assert_eq!(start.elapsed(), Duration::ZERO);

        assert!(ticker.tick().await);
        assert_eq!(start.elapsed(), Duration::from_secs(600));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_cycles_delay_rather_than_burst() {
        let mut ticker = IntervalTicker::new(Duration::from_secs(600));
        let start = Instant::now();
        ticker.tick().await;

        // A cycle that takes 25 minutes.
        tokio::time::sleep(Duration::from_secs(1500)).await;
        ticker.tick().await;
        assert_eq!(start.elapsed(), Duration::from_secs(1500));

        // The next tick is a full period after the late one, not immediate.
        ticker.tick().await;
        assert_eq!(start.elapsed(), Duration::from_secs(2100));
    }

    #[tokio::test]
    async fn manual_ticker_stops_when_triggers_are_gone() {
        let (mut ticker, trigger) = ManualTicker::new();
        trigger.tick();
        assert!(ticker.tick().await);

        drop(trigger);
        assert!(!ticker.tick().await);
    }
}
