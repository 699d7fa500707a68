//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Detections file error: {0}")]
    DetectionsFile(String),

    #[error("Background task failed: {0}")]
    TaskFailed(String),

    #[error("Tracking error: {0}")]
    Tracking(#[from] hoopclip_tracking::TrackingError),

    #[error("Media error: {0}")]
    Media(#[from] hoopclip_media::MediaError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkerError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn detections_file(msg: impl Into<String>) -> Self {
        Self::DetectionsFile(msg.into())
    }

    pub fn task_failed(msg: impl Into<String>) -> Self {
        Self::TaskFailed(msg.into())
    }

    /// Whether the run stopped because of a shutdown request.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            WorkerError::Tracking(hoopclip_tracking::TrackingError::Cancelled)
                | WorkerError::Media(hoopclip_media::MediaError::Cancelled)
        )
    }
}
