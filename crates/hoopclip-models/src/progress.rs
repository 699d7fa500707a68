//! Frame progress notifications.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Progress of a video analysis, in frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ProgressUpdate {
    pub frames_processed: u64,
    pub total_frames: u64,
}

impl ProgressUpdate {
    pub fn new(frames_processed: u64, total_frames: u64) -> Self {
        Self {
            frames_processed,
            total_frames,
        }
    }

    /// Percentage complete, capped at 100. Zero when the total is unknown.
    pub fn percentage(&self) -> f64 {
        if self.total_frames == 0 {
            return 0.0;
        }
        ((self.frames_processed as f64 / self.total_frames as f64) * 100.0).min(100.0)
    }
}
