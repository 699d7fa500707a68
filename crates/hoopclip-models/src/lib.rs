//! Shared data models for the HoopClip shot tracker.
//!
//! This crate provides Serde-serializable types for:
//! - Raw detector output and accepted observations
//! - Shot events, clip windows and session summaries
//! - Video metadata and progress notifications
//! - Encoding configuration for highlight rendering

pub mod detection;
pub mod encoding;
pub mod observation;
pub mod progress;
pub mod session;
pub mod shot;
pub mod timestamp;
pub mod video;

// Re-export common types
pub use detection::{DetectorClass, FrameDetections, RawDetection};
pub use encoding::EncodingConfig;
pub use observation::{ObjectClass, Observation, Point};
pub use progress::ProgressUpdate;
pub use session::{SessionResult, SessionStats};
pub use shot::{ClipWindow, ShotEvent};
pub use video::{VideoMeta, VideoMetaError};
