// In crates/engine/src/error.rs

use std::fmt;
use std::time::Duration;

use core_types::Symbol;
use thiserror::Error;

/// The pipeline stage at which an asset scan failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStage {
    Fetch,
    Analyze,
    Persist,
}

impl fmt::Display for ScanStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScanStage::Fetch => "fetch",
            ScanStage::Analyze => "analyze",
            ScanStage::Persist => "persist",
        })
    }
}

/// Why a single asset was skipped in a scan cycle. None of these abort the cycle.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Market data unavailable for {asset}: {source}")]
    DataUnavailable {
        asset: Symbol,
        source: api_client::Error,
    },

    #[error("Market data for {asset} timed out after {timeout:?}")]
    Timeout { asset: Symbol, timeout: Duration },

    #[error("Insufficient data for {asset}: {source}")]
    InsufficientData {
        asset: Symbol,
        source: indicators::Error,
    },

    #[error("Failed to persist notification for {asset}: {source}")]
    PersistenceFailure {
        asset: Symbol,
        source: notifier::Error,
    },
}

impl ScanError {
    pub fn stage(&self) -> ScanStage {
        match self {
            ScanError::DataUnavailable { .. } | ScanError::Timeout { .. } => ScanStage::Fetch,
            ScanError::InsufficientData { .. } => ScanStage::Analyze,
            ScanError::PersistenceFailure { .. } => ScanStage::Persist,
        }
    }

    pub fn asset(&self) -> &Symbol {
        match self {
            ScanError::DataUnavailable { asset, .. }
            | ScanError::Timeout { asset, .. }
            | ScanError::InsufficientData { asset, .. }
            | ScanError::PersistenceFailure { asset, .. } => asset,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
