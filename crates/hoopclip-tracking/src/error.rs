//! Error types for the tracking pipeline.
//!
//! Only an unusable input stream is an error. Noisy detections, implausible
//! jumps and degenerate trajectories are absorbed where they occur.

use hoopclip_models::VideoMetaError;
use thiserror::Error;

/// Result type for tracking operations.
pub type TrackingResult<T> = Result<T, TrackingError>;

/// Errors that abort a video analysis.
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("Input unavailable: {0}")]
    InputUnavailable(String),

    #[error("Invalid video metadata: {0}")]
    InvalidMetadata(#[from] VideoMetaError),

    #[error("Frame stream out of sequence: expected frame {expected}, got {found}")]
    FrameSequence { expected: u64, found: u64 },

    #[error("Analysis cancelled")]
    Cancelled,
}

impl TrackingError {
    /// Create an input unavailable error.
    pub fn input_unavailable(message: impl Into<String>) -> Self {
        Self::InputUnavailable(message.into())
    }
}
