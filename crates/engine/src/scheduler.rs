// In crates/engine/src/scheduler.rs

use std::sync::Arc;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

use crate::clock::Ticker;
use crate::scanner::{CycleReport, MarketScanner, ScanState};

/// Drives a `MarketScanner` from a `Ticker`.
///
/// Cycles run one after another inside a single task, so a cycle always
/// completes before the next tick is awaited.
pub struct ScanScheduler<T: Ticker> {
    scanner: Arc<MarketScanner>,
    ticker: T,
}

/// Controls a started scheduler.
///
/// Dropping the handle without calling `stop` also ends the loop after the
/// running cycle.
pub struct SchedulerHandle {
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
    cycles_rx: watch::Receiver<u64>,
    report_rx: watch::Receiver<Option<CycleReport>>,
    state_rx: watch::Receiver<ScanState>,
}

impl<T: Ticker> ScanScheduler<T> {
    pub fn new(scanner: Arc<MarketScanner>, ticker: T) -> Self {
        Self { scanner, ticker }
    }

    /// Spawns the scan loop onto the current tokio runtime.
    pub fn start(self) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let (cycles_tx, cycles_rx) = watch::channel(0u64);
        let (report_tx, report_rx) = watch::channel(None);
        let state_rx = self.scanner.subscribe_state();

        let task = tokio::spawn(run_loop(
            self.scanner,
            self.ticker,
            shutdown_rx,
            cycles_tx,
            report_tx,
        ));

        SchedulerHandle {
            shutdown_tx,
            task,
            cycles_rx,
            report_rx,
            state_rx,
        }
    }
}

async fn run_loop<T: Ticker>(
    scanner: Arc<MarketScanner>,
    mut ticker: T,
    mut shutdown_rx: oneshot::Receiver<()>,
    cycles_tx: watch::Sender<u64>,
    report_tx: watch::Sender<Option<CycleReport>>,
) {
    tracing::info!(assets = scanner.assets().len(), "Market scan scheduler started.");

    loop {
        tokio::select! {
            // Prefer shutdown over a tick that is ready at the same time.
            biased;
            _ = &mut shutdown_rx => break,
            fired = ticker.tick() => {
                if !fired {
                    tracing::warn!("Ticker closed; no further scan cycles will run.");
                    break;
                }
            }
        }

        let report = scanner.run_cycle().await;
        report_tx.send_replace(Some(report));
        cycles_tx.send_modify(|count| *count += 1);
    }

    tracing::info!(cycles = *cycles_tx.borrow(), "Market scan scheduler stopped.");
}

impl SchedulerHandle {
    /// A receiver of the number of fully completed cycles.
    pub fn completed_cycles(&self) -> watch::Receiver<u64> {
        self.cycles_rx.clone()
    }

    /// The report of the most recently completed cycle.
    pub fn last_report(&self) -> Option<CycleReport> {
        self.report_rx.borrow().clone()
    }

    /// Idle between cycles, `Running { asset }` during one.
    pub fn state(&self) -> ScanState {
        self.state_rx.borrow().clone()
    }

    /// True once the loop has exited (stopped, or its ticker closed).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops the scheduler and waits for the loop to exit.
    ///
    /// A cycle that is already running is allowed to finish first.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Market scan scheduler task failed.");
        }
    }
}
