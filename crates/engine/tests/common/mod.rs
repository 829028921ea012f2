//! Shared fakes for the scanner and scheduler tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use api_client::MarketDataSource;
use app_config::types::ScannerSettings;
use async_trait::async_trait;
use core_types::Symbol;
use engine::MarketScanner;
use indicators::MACrossover;
use indicators::types::MACrossoverSettings;
use notifier::{InMemorySink, SignalNotifier};
use rust_decimal::Decimal;

/// What the fake provider answers for one symbol.
#[derive(Clone)]
pub enum Answer {
    Closes(Vec<Decimal>),
    Fail,
    Hang,
}

/// An in-memory market-data provider that records every request.
#[derive(Default)]
pub struct FakeSource {
    answers: HashMap<String, Answer>,
    calls: Mutex<Vec<Symbol>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, symbol: &str, answer: Answer) -> Self {
        self.answers.insert(symbol.to_string(), answer);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|s| s.0.clone()).collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataSource for FakeSource {
    fn name(&self) -> &'static str {
        "Fake"
    }

    async fn fetch_closes(
        &self,
        symbol: &Symbol,
        _interval: &str,
        _limit: u16,
    ) -> api_client::Result<Vec<Decimal>> {
        self.calls.lock().unwrap().push(symbol.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        // Give any concurrent caller a chance to interleave.
        tokio::time::sleep(Duration::from_millis(10)).await;

        let answer = self.answers.get(&symbol.0).cloned().unwrap_or(Answer::Fail);
        let result = match answer {
            Answer::Closes(closes) => Ok(closes),
            Answer::Fail => Err(api_client::Error::ApiError {
                code: -1121,
                msg: "Invalid symbol.".into(),
            }),
            Answer::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(Vec::new())
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// 25 closes engineered so that SMA(9) crosses above SMA(21) on the last candle only:
/// a steady decline from 100 to 77, then a jump to 200.
pub fn bullish_series() -> Vec<Decimal> {
    let mut closes: Vec<Decimal> = (0..24).map(|i| Decimal::from(100 - i)).collect();
    closes.push(Decimal::from(200));
    closes
}

/// A steady rise with no crossing in the last two candles.
pub fn quiet_series() -> Vec<Decimal> {
    (0..100).map(|i| Decimal::from(1000 + i)).collect()
}

pub fn settings(assets: &[&str]) -> ScannerSettings {
    ScannerSettings {
        assets: assets.iter().map(|a| Symbol::from(*a)).collect(),
        fetch_timeout_secs: 5,
        ..ScannerSettings::default()
    }
}

pub fn scanner(
    assets: &[&str],
    source: Arc<FakeSource>,
    sink: Arc<InMemorySink>,
) -> MarketScanner {
    let strategy = MACrossover::new(MACrossoverSettings::default()).unwrap();
    MarketScanner::new(
        &settings(assets),
        source,
        Arc::new(strategy),
        SignalNotifier::new(sink),
    )
}
