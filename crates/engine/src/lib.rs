// In crates/engine/src/lib.rs

pub mod clock;
pub mod error;
pub mod scanner;
pub mod scheduler;

pub use clock::{IntervalTicker, ManualTicker, TickTrigger, Ticker};
pub use error::{Result, ScanError, ScanStage};
pub use scanner::{AssetFailure, CycleReport, MarketScanner, ScanState};
pub use scheduler::{ScanScheduler, SchedulerHandle};
