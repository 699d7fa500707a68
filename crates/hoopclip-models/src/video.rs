//! Video metadata consumed by the tracker.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timestamp::round_hundredths;

/// Invalid video metadata.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VideoMetaError {
    #[error("frame rate must be positive and finite, got {0}")]
    InvalidFps(f64),
}

/// Frame rate and length of the analysed video.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoMeta {
    /// Frames per second
    pub fps: f64,
    /// Total number of frames
    pub total_frames: u64,
}

impl VideoMeta {
    /// Create validated metadata.
    pub fn new(fps: f64, total_frames: u64) -> Result<Self, VideoMetaError> {
        let meta = Self { fps, total_frames };
        meta.validate()?;
        Ok(meta)
    }

    /// Check the frame rate can be used to convert frames to seconds.
    pub fn validate(&self) -> Result<(), VideoMetaError> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(VideoMetaError::InvalidFps(self.fps));
        }
        Ok(())
    }

    /// Video duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.total_frames as f64 / self.fps
    }

    /// Timestamp of a frame, rounded to two decimals.
    pub fn timestamp_for(&self, frame: u64) -> f64 {
        round_hundredths(frame as f64 / self.fps)
    }
}
