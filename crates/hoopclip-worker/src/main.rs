//! Shot tracking worker binary.

use anyhow::Context;
use tokio::sync::watch;
use tracing::{error, info};

use hoopclip_worker::{init_tracing, metrics, ShotProcessor, WorkerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();
    info!("Starting hoopclip-worker");

    let metrics_handle = metrics::init_metrics_from_env();

    let config = WorkerConfig::from_env();
    info!("Worker config: {:?}", config);
    config.validate().context("invalid worker configuration")?;

    // Ctrl-C stops detection between frames and kills a running FFmpeg
    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal");
            let _ = cancel_tx.send(true);
        }
    });

    let processor = ShotProcessor::new(config).with_cancel(cancel_rx);
    let report = match processor.run().await {
        Ok(report) => report,
        Err(e) if e.is_cancelled() => {
            info!("Shot tracking cancelled");
            return Ok(());
        }
        Err(e) => {
            error!("Shot tracking failed: {}", e);
            return Err(e).context("shot tracking failed");
        }
    };

    info!(
        attempts = report.result.stats.total_attempts,
        makes = report.result.stats.total_makes,
        accuracy = report.result.stats.accuracy_percent,
        clips = report.result.clips.len(),
        "Worker finished"
    );

    if let Some(handle) = metrics_handle {
        match std::env::var("METRICS_PATH") {
            Ok(path) => metrics::export(&handle, path).context("failed to write metrics")?,
            Err(_) => tracing::debug!("Metrics snapshot:\n{}", handle.render()),
        }
    }

    Ok(())
}
