use anyhow::Context;
use clap::Parser;
use klinefetch::config::Args;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "klinefetch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if let Err(err) = klinefetch::run(&args).await {
        tracing::error!(kind = %err.kind(), error = %err, "kline export failed");
        return Err(err).with_context(|| {
            format!(
                "exporting {} {} klines to {}",
                args.symbol,
                args.interval,
                args.output.display()
            )
        });
    }

    Ok(())
}
