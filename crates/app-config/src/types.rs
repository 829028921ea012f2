// In crates/app-config/src/types.rs

use std::collections::HashSet;
use std::time::Duration;

use core_types::Symbol;
use indicators::types::MACrossoverSettings;
use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Settings for the Binance market-data API.
    pub binance: BinanceSettings,
    /// Settings for the database connection.
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    /// The monitored universe and the scan schedule.
    #[serde(default)]
    pub scanner: ScannerSettings,
    #[serde(default)]
    pub strategies: StrategySettings,
}

impl Settings {
    /// Checks the cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let ma = &self.strategies.ma_crossover;
        if ma.short_period == 0 || ma.short_period >= ma.long_period {
            return Err(Error::Invalid(format!(
                "ma_crossover periods must satisfy 1 <= short_period < long_period (got {}, {})",
                ma.short_period, ma.long_period
            )));
        }

        let scanner = &self.scanner;
        if scanner.assets.is_empty() {
            return Err(Error::Invalid("scanner.assets must not be empty".into()));
        }
        let mut seen = HashSet::new();
        for asset in &scanner.assets {
            if asset.0.trim().is_empty() {
                return Err(Error::Invalid("scanner.assets contains an empty symbol".into()));
            }
            if !seen.insert(&asset.0) {
                return Err(Error::Invalid(format!("scanner.assets lists {} twice", asset.0)));
            }
        }
        if (scanner.kline_limit as u32) < ma.long_period + 1 {
            return Err(Error::Invalid(format!(
                "scanner.kline_limit ({}) must be at least long_period + 1 ({})",
                scanner.kline_limit,
                ma.long_period + 1
            )));
        }
        if scanner.interval.trim().is_empty() {
            return Err(Error::Invalid("scanner.interval must not be empty".into()));
        }
        if scanner.scan_interval_secs == 0 || scanner.fetch_timeout_secs == 0 {
            return Err(Error::Invalid(
                "scanner.scan_interval_secs and scanner.fetch_timeout_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BinanceSettings {
    /// The REST API base URL for Binance spot market data.
    pub rest_base_url: String,
    /// Only sent when present; the public klines endpoint needs no key.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DatabaseSettings {
    /// The connection URL for the PostgreSQL database.
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ScannerSettings {
    /// The monitored universe, scanned in this order every cycle.
    #[serde(default = "default_assets")]
    pub assets: Vec<Symbol>,
    /// The kline interval (e.g., "1h").
    #[serde(default = "default_interval")]
    pub interval: String,
    /// How many candles to request per asset.
    #[serde(default = "default_kline_limit")]
    pub kline_limit: u16,
    #[serde(default = "default_scan_interval_secs")]
    pub scan_interval_secs: u64,
    /// Upper bound for a single asset's market-data fetch.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl ScannerSettings {
    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.scan_interval_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            assets: default_assets(),
            interval: default_interval(),
            kline_limit: default_kline_limit(),
            scan_interval_secs: default_scan_interval_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

/// The container for all strategy settings.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct StrategySettings {
    #[serde(default)]
    pub ma_crossover: MACrossoverSettings,
}

// Helper functions for serde defaults.
fn default_log_level() -> String { "info".into() }
fn default_request_timeout_secs() -> u64 { 10 }
fn default_max_connections() -> u32 { 5 }
fn default_interval() -> String { "1h".into() }
fn default_kline_limit() -> u16 { 100 }
fn default_scan_interval_secs() -> u64 { 600 }
fn default_fetch_timeout_secs() -> u64 { 15 }

fn default_assets() -> Vec<Symbol> {
    [
        "BTCUSDT", "ETHUSDT", "BNBUSDT", "SOLUSDT", "XRPUSDT",
        "ADAUSDT", "DOGEUSDT", "AVAXUSDT", "DOTUSDT", "LINKUSDT",
    ]
    .into_iter()
    .map(Symbol::from)
    .collect()
}
