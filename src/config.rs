use crate::services::binance::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use clap::Parser;
use std::{path::PathBuf, time::Duration};

/// Fetch Binance klines for one symbol/interval and save them as JSON lines.
#[derive(Debug, Clone, Parser)]
#[command(name = "klinefetch", version, about, long_about = None)]
pub struct Args {
    /// Trading pair, e.g. BTCUSDT
    #[arg(long, default_value = "BTCUSDT")]
    pub symbol: String,

    /// Kline interval code, e.g. 1m, 1h, 1d
    #[arg(long, default_value = "1d")]
    pub interval: String,

    /// Output file (newline-delimited JSON, truncated)
    #[arg(long, default_value = "binance_kline_data.json")]
    pub output: PathBuf,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

impl Args {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            symbol: "BTCUSDT".to_string(),
            interval: "1d".to_string(),
            output: PathBuf::from("binance_kline_data.json"),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}
