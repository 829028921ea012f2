// In crates/api-client/src/lib.rs

use std::str::FromStr;
use std::time::Duration;

use app_config::types::BinanceSettings;
use async_trait::async_trait;
use core_types::{PricePoint, Symbol};
use rust_decimal::Decimal;

pub mod error;
pub mod source;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use source::MarketDataSource;
pub use types::*;

impl ApiClient {
    /// Constructs a new ApiClient from BinanceSettings.
    pub fn new(settings: &BinanceSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(ApiClient {
            http_client,
            api_key: settings.api_key.clone().filter(|key| !key.is_empty()),
            base_url: settings.rest_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the most recent klines and keeps their close price and close time.
    ///
    /// This corresponds to the `GET /api/v3/klines` endpoint.
    ///
    /// # Arguments
    ///
    /// * `symbol`: The symbol to fetch klines for.
    /// * `interval`: The kline interval (e.g., "1m", "5m", "1h").
    /// * `limit`: Number of klines to return (Binance caps this at 1000).
    pub async fn get_price_points(
        &self,
        symbol: &Symbol,
        interval: &str,
        limit: u16,
    ) -> Result<Vec<PricePoint>> {
        let url = format!("{}/api/v3/klines", self.base_url);
        let limit = limit.to_string();

        let mut request = self
            .http_client
            .get(&url)
            .query(&[("symbol", symbol.0.as_str()), ("interval", interval), ("limit", limit.as_str())]);
        if let Some(key) = &self.api_key {
            request = request.header("X-MBX-APIKEY", key);
        }

        let response = request.send().await.map_err(Error::RequestFailed)?;
        let status = response.status();
        let body = response.text().await.map_err(Error::RequestFailed)?;

        if !status.is_success() {
            // Binance explains most failures with an error object; keep it if present.
            return Err(match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(api_error) => Error::ApiError { code: api_error.code, msg: api_error.msg },
                Err(_) => Error::HttpStatus { status: status.as_u16(), body },
            });
        }

        let points = parse_klines(&body)?;
        if points.is_empty() {
            return Err(Error::EmptyResponse(symbol.0.clone()));
        }

        tracing::debug!(symbol = %symbol, interval, count = points.len(), "Fetched klines.");
        Ok(points)
    }
}

#[async_trait]
impl MarketDataSource for ApiClient {
    fn name(&self) -> &'static str {
        "BinanceSpot"
    }

    async fn fetch_closes(&self, symbol: &Symbol, interval: &str, limit: u16) -> Result<Vec<Decimal>> {
        let points = self.get_price_points(symbol, interval, limit).await?;
        Ok(points.into_iter().map(|p| p.close).collect())
    }
}

/// Parses a raw klines response body into price points, oldest first.
pub fn parse_klines(body: &str) -> Result<Vec<PricePoint>> {
    // Deserialize the raw response into a vector of RawKline.
    let raw_klines: Vec<RawKline> = serde_json::from_str(body).map_err(|e| {
        // If deserialization fails, it might be a Binance error object.
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(api_error) => Error::ApiError { code: api_error.code, msg: api_error.msg },
            Err(_) => Error::DeserializationFailed(e),
        }
    })?;

    let mut points = raw_klines
        .into_iter()
        .map(|raw| -> Result<PricePoint> {
            let close = Decimal::from_str(&raw.4).map_err(|_| Error::InvalidPrice(raw.4.clone()))?;
            Ok(PricePoint { close_time: raw.6, close })
        })
        .collect::<Result<Vec<_>>>()?;

    points.sort_by_key(|p| p.close_time);
    Ok(points)
}

// Free function to allow api_client::new usage
pub fn new(settings: &BinanceSettings) -> Result<ApiClient> {
    ApiClient::new(settings)
}
