//! Worker configuration.

use std::path::PathBuf;
use std::time::Duration;

use hoopclip_models::EncodingConfig;
use hoopclip_tracking::ShotDetectorConfig;

use crate::error::{WorkerError, WorkerResult};

/// Allowed padding before a made shot, in seconds.
pub const BEFORE_SECONDS_RANGE: (f64, f64) = (1.0, 30.0);
/// Allowed padding after a made shot, in seconds.
pub const AFTER_SECONDS_RANGE: (f64, f64) = (1.0, 10.0);

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// JSON Lines detections dump (header line, then one frame per line)
    pub detections_path: PathBuf,
    /// Source video; enables probing and highlight rendering
    pub video_path: Option<PathBuf>,
    /// Where the shot report is written
    pub output_path: PathBuf,
    /// Where the highlight reel is written
    pub highlight_path: PathBuf,
    /// Seconds of video kept before each made shot
    pub before_seconds: f64,
    /// Seconds of video kept after each made shot
    pub after_seconds: f64,
    /// Work directory for temporary files
    pub work_dir: PathBuf,
    /// Timeout for each FFmpeg invocation
    pub ffmpeg_timeout: Duration,
    /// Render a highlight reel when a video is available
    pub render_highlights: bool,
    /// Encoding profile for highlight clips
    pub encoding: EncodingConfig,
    /// Tracker thresholds
    pub tracker: ShotDetectorConfig,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            detections_path: PathBuf::from("detections.jsonl"),
            video_path: None,
            output_path: PathBuf::from("shot_results.json"),
            highlight_path: PathBuf::from("highlights.mp4"),
            before_seconds: 8.0,
            after_seconds: 2.0,
            work_dir: PathBuf::from("/tmp/hoopclip"),
            ffmpeg_timeout: Duration::from_secs(600), // 10 minutes per clip
            render_highlights: true,
            encoding: EncodingConfig::default(),
            tracker: ShotDetectorConfig::default(),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            detections_path: std::env::var("HOOPCLIP_DETECTIONS")
                .map(PathBuf::from)
                .unwrap_or(defaults.detections_path),
            video_path: std::env::var("HOOPCLIP_VIDEO")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            output_path: std::env::var("HOOPCLIP_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            highlight_path: std::env::var("HOOPCLIP_HIGHLIGHTS")
                .map(PathBuf::from)
                .unwrap_or(defaults.highlight_path),
            before_seconds: std::env::var("HOOPCLIP_BEFORE_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.before_seconds),
            after_seconds: std::env::var("HOOPCLIP_AFTER_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.after_seconds),
            work_dir: std::env::var("HOOPCLIP_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
            ffmpeg_timeout: std::env::var("HOOPCLIP_FFMPEG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.ffmpeg_timeout),
            render_highlights: std::env::var("HOOPCLIP_RENDER_HIGHLIGHTS")
                .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(defaults.render_highlights),
            encoding: EncodingConfig {
                preset: std::env::var("HOOPCLIP_PRESET").unwrap_or(defaults.encoding.preset),
                crf: std::env::var("HOOPCLIP_CRF")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.encoding.crf),
                ..defaults.encoding
            },
            tracker: ShotDetectorConfig::from_env(),
        }
    }

    /// Reject clip padding outside the supported ranges.
    pub fn validate(&self) -> WorkerResult<()> {
        check_range("before_seconds", self.before_seconds, BEFORE_SECONDS_RANGE)?;
        check_range("after_seconds", self.after_seconds, AFTER_SECONDS_RANGE)?;
        Ok(())
    }

    /// Whether this run should produce a highlight reel.
    pub fn wants_highlights(&self) -> bool {
        self.render_highlights && self.video_path.is_some()
    }
}

fn check_range(name: &str, value: f64, (min, max): (f64, f64)) -> WorkerResult<()> {
    if !(min..=max).contains(&value) {
        return Err(WorkerError::config_error(format!(
            "{} must be between {} and {}, got {}",
            name, min, max, value
        )));
    }
    Ok(())
}
