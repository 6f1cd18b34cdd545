use crate::{
    error::KlineError,
    models::kline::{Candle, KlineRow},
};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const KLINES_PATH: &str = "/api/v3/klines";

/// Error payload Binance sends with non-success statuses, e.g.
/// `{"code": -1121, "msg": "Invalid symbol."}`.
#[derive(Debug, Deserialize)]
pub struct BinanceApiError {
    pub code: i64,
    pub msg: String,
}

#[derive(Clone)]
pub struct BinanceKlineService {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl Default for BinanceKlineService {
    fn default() -> Self {
        Self::new()
    }
}

impl BinanceKlineService {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// For tests / custom endpoints.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request URI for one symbol/interval pair. Parameters are query-encoded
    /// but otherwise passed through unvalidated.
    pub fn klines_url(&self, symbol: &str, interval: &str) -> Result<Url, KlineError> {
        let endpoint = format!("{}{KLINES_PATH}", self.base_url.trim_end_matches('/'));
        let url = Url::parse_with_params(&endpoint, &[("symbol", symbol), ("interval", interval)])?;
        Ok(url)
    }

    /// Fetch the klines Binance returns by default for a symbol and interval,
    /// e.g. ("BTCUSDT", "1d"), oldest first.
    pub async fn fetch_klines(
        &self,
        symbol: &str,
        interval: &str,
    ) -> Result<Vec<Candle>, KlineError> {
        let url = self.klines_url(symbol, interval)?;
        tracing::debug!(%url, "requesting klines");

        let resp = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<BinanceApiError>(&body) {
                Ok(api) => format!("Binance error {}: {}", api.code, api.msg),
                Err(_) => body,
            };
            tracing::warn!(
                status = status.as_u16(),
                %message,
                %symbol,
                %interval,
                "kline request rejected"
            );
            return Err(KlineError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.bytes().await?;
        let candles = parse_klines(&body)?;
        tracing::info!(count = candles.len(), %symbol, %interval, "fetched klines");

        Ok(candles)
    }
}

/// Decode a `/api/v3/klines` response body. Any malformed row fails the whole batch.
pub fn parse_klines(body: &[u8]) -> Result<Vec<Candle>, KlineError> {
    let rows: Vec<KlineRow> = serde_json::from_slice(body)?;
    Ok(rows.into_iter().map(Candle::from).collect())
}
