//! Prometheus metrics for the worker.

use std::path::Path;

use hoopclip_media::HighlightReport;
use hoopclip_models::SessionResult;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{info, warn};

/// Install the Prometheus recorder when `METRICS_ENABLED=true`.
///
/// Without a recorder every `record_*` call is a no-op.
pub fn init_metrics_from_env() -> Option<PrometheusHandle> {
    let enabled = std::env::var("METRICS_ENABLED")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);
    if !enabled {
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
            None
        }
    }
}

/// Write the current metrics snapshot in Prometheus text format.
pub fn export(handle: &PrometheusHandle, path: impl AsRef<Path>) -> std::io::Result<()> {
    let path = path.as_ref();
    std::fs::write(path, handle.render())?;
    info!("Metrics written to {}", path.display());
    Ok(())
}

/// Metric names as constants for consistency.
pub mod names {
    // Tracking metrics
    pub const FRAMES_PROCESSED_TOTAL: &str = "hoopclip_frames_processed_total";
    pub const SHOT_ATTEMPTS_TOTAL: &str = "hoopclip_shot_attempts_total";
    pub const SHOTS_MADE_TOTAL: &str = "hoopclip_shots_made_total";
    pub const SHOOTING_ACCURACY_PERCENT: &str = "hoopclip_shooting_accuracy_percent";
    pub const DETECTION_DURATION_SECONDS: &str = "hoopclip_detection_duration_seconds";
    pub const DETECTION_PROGRESS_PERCENT: &str = "hoopclip_detection_progress_percent";

    // Rendering metrics
    pub const CLIPS_RENDERED_TOTAL: &str = "hoopclip_clips_rendered_total";
    pub const HIGHLIGHT_RENDER_DURATION_SECONDS: &str = "hoopclip_highlight_render_duration_seconds";

    // Failures
    pub const SESSIONS_FAILED_TOTAL: &str = "hoopclip_sessions_failed_total";
}

/// Record a finished detection pass.
pub fn record_session(result: &SessionResult, frames: u64, duration_secs: f64) {
    counter!(names::FRAMES_PROCESSED_TOTAL).increment(frames);
    counter!(names::SHOT_ATTEMPTS_TOTAL).increment(result.stats.total_attempts as u64);
    counter!(names::SHOTS_MADE_TOTAL).increment(result.stats.total_makes as u64);
    gauge!(names::SHOOTING_ACCURACY_PERCENT).set(result.stats.accuracy_percent);
    histogram!(names::DETECTION_DURATION_SECONDS).record(duration_secs);
}

/// Update the detection progress gauge.
pub fn set_detection_progress(percent: f64) {
    gauge!(names::DETECTION_PROGRESS_PERCENT).set(percent);
}

/// Record a rendered highlight reel.
pub fn record_render(report: &HighlightReport) {
    counter!(names::CLIPS_RENDERED_TOTAL).increment(report.clips_rendered as u64);
    histogram!(names::HIGHLIGHT_RENDER_DURATION_SECONDS).record(report.elapsed_ms as f64 / 1000.0);
}

/// Record a failed session.
pub fn record_failure(stage: &str) {
    let labels = [("stage", stage.to_string())];
    counter!(names::SESSIONS_FAILED_TOTAL, &labels).increment(1);
}
