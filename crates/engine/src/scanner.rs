// In crates/engine/src/scanner.rs

use std::sync::Arc;
use std::time::Duration;

use api_client::MarketDataSource;
use app_config::types::ScannerSettings;
use core_types::{Notification, Symbol};
use indicators::Strategy;
use notifier::SignalNotifier;
use tokio::sync::{Mutex, watch};
use tokio::time::Instant;

use crate::error::{Result, ScanError, ScanStage};

/// What the scanner is doing right now.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Idle,
    Running { asset: Symbol },
}

/// One asset that was skipped during a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFailure {
    pub asset: Symbol,
    pub stage: ScanStage,
    pub error: String,
}

/// The outcome of one pass over the monitored universe.
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// Number of assets the pipeline was invoked for.
    pub scanned: usize,
    pub notifications: Vec<Notification>,
    pub failures: Vec<AssetFailure>,
    pub duration: Duration,
}

/// Runs the fetch → analyze → notify pipeline over a fixed, ordered universe.
pub struct MarketScanner {
    assets: Vec<Symbol>,
    interval: String,
    kline_limit: u16,
    fetch_timeout: Duration,
    source: Arc<dyn MarketDataSource>,
    strategy: Arc<dyn Strategy + Send + Sync>,
    notifier: SignalNotifier,
    state_tx: watch::Sender<ScanState>,
    // Held for the whole cycle so two cycles never interleave.
    cycle_lock: Mutex<()>,
}

impl MarketScanner {
    pub fn new(
        settings: &ScannerSettings,
        source: Arc<dyn MarketDataSource>,
        strategy: Arc<dyn Strategy + Send + Sync>,
        notifier: SignalNotifier,
    ) -> Self {
        if (settings.kline_limit as usize) < strategy.required_history() {
            tracing::warn!(
                kline_limit = settings.kline_limit,
                required = strategy.required_history(),
                "Kline limit is below the strategy's required history; every asset will be skipped."
            );
        }

        let (state_tx, _) = watch::channel(ScanState::Idle);
        Self {
            assets: settings.assets.clone(),
            interval: settings.interval.clone(),
            kline_limit: settings.kline_limit,
            fetch_timeout: settings.fetch_timeout(),
            source,
            strategy,
            notifier,
            state_tx,
            cycle_lock: Mutex::new(()),
        }
    }

    pub fn assets(&self) -> &[Symbol] {
        &self.assets
    }

    /// Subscribes to state changes (`Idle` / `Running { asset }`).
    pub fn subscribe_state(&self) -> watch::Receiver<ScanState> {
        self.state_tx.subscribe()
    }

    /// Runs the full pipeline for one asset.
    ///
    /// Returns the recorded notification when the latest candle completed a
    /// crossover, `None` when it did not.
    pub async fn scan_asset(&self, asset: &Symbol) -> Result<Option<Notification>> {
        // 1. Fetch
        let closes = tokio::time::timeout(
            self.fetch_timeout,
            self.source.fetch_closes(asset, &self.interval, self.kline_limit),
        )
        .await
        .map_err(|_| ScanError::Timeout {
            asset: asset.clone(),
            timeout: self.fetch_timeout,
        })?
        .map_err(|source| ScanError::DataUnavailable {
            asset: asset.clone(),
            source,
        })?;

        // 2. Analyze
        let assessment = self
            .strategy
            .assess(&closes)
            .map_err(|source| ScanError::InsufficientData {
                asset: asset.clone(),
                source,
            })?;

        let Some(signal) = assessment.crossover.signal() else {
            tracing::debug!(
                asset = %asset,
                short = %assessment.last_short,
                long = %assessment.last_long,
                "No crossover."
            );
            return Ok(None);
        };

        // 3. Notify
        let notification = self
            .notifier
            .record_signal(
                asset,
                signal,
                assessment.last_close,
                &self.strategy.indicator(),
                &assessment.reason,
            )
            .await
            .map_err(|source| ScanError::PersistenceFailure {
                asset: asset.clone(),
                source,
            })?;

        Ok(Some(notification))
    }

    /// Scans every monitored asset once, in configured order.
    ///
    /// A failing asset is logged and skipped; the cycle always attempts the
    /// whole universe. Concurrent callers wait for the running cycle to finish.
    pub async fn run_cycle(&self) -> CycleReport {
        let _guard = self.cycle_lock.lock().await;
        let started = Instant::now();
        tracing::info!(
            assets = self.assets.len(),
            strategy = self.strategy.name(),
            source = self.source.name(),
            "Starting market scan cycle."
        );

        let mut report = CycleReport::default();
        for asset in &self.assets {
            self.state_tx.send_replace(ScanState::Running { asset: asset.clone() });
            report.scanned += 1;

            match self.scan_asset(asset).await {
                Ok(Some(notification)) => {
                    tracing::info!(
                        asset = %asset,
                        signal = %notification.signal,
                        price = %notification.price_at_signal,
                        "New crossover signal."
                    );
                    report.notifications.push(notification);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(asset = %asset, stage = %e.stage(), error = %e, "Skipping asset this cycle.");
                    report.failures.push(AssetFailure {
                        asset: asset.clone(),
                        stage: e.stage(),
                        error: e.to_string(),
                    });
                }
            }
        }

        self.state_tx.send_replace(ScanState::Idle);
        report.duration = started.elapsed();
        tracing::info!(
            scanned = report.scanned,
            signals = report.notifications.len(),
            failures = report.failures.len(),
            duration = ?report.duration,
            "Market scan cycle finished."
        );
        report
    }
}
