pub mod config;
pub mod error;
pub mod models;
pub mod services;

use config::Args;
use error::KlineError;
use services::{binance::BinanceKlineService, jsonl};

/// Fetch klines and write them to `args.output`. Returns the number written.
///
/// A failed fetch returns before the output file is opened.
pub async fn run(args: &Args) -> Result<usize, KlineError> {
    let svc =
        BinanceKlineService::with_base_url(args.base_url.as_str()).with_timeout(args.timeout());

    let candles = svc.fetch_klines(&args.symbol, &args.interval).await?;
    jsonl::write_candles(&candles, &args.output)?;

    tracing::info!(
        count = candles.len(),
        path = %args.output.display(),
        "klines saved"
    );
    Ok(candles.len())
}
