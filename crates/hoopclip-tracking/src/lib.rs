//! Basketball shot tracking on top of per-frame object detections.
//!
//! This crate provides:
//! - Confidence thresholding of raw ball/hoop detections
//! - Self-cleaning position histories with outlier rejection
//! - An above-rim / below-rim shot phase state machine
//! - Geometric make/miss scoring (two-point line or parabola)
//! - Session statistics and highlight clip windows
//!
//! The pipeline is synchronous and single-pass; [`ShotDetector`] drives it
//! over any [`FrameSource`].

pub mod aggregator;
pub mod config;
pub mod detector;
pub mod error;
pub mod history;
pub mod ingest;
pub mod phase;
pub mod progress;
pub mod scoring;
pub mod session;
pub mod source;
pub mod trajectory;
pub mod zones;

#[cfg(test)]
mod tests;

pub use aggregator::{clip_window, ShotAggregator};
pub use config::{ScoringMethod, ShotDetectorConfig};
pub use detector::ShotDetector;
pub use error::{TrackingError, TrackingResult};
pub use history::{BallHistory, CleaningPolicy, HoopHistory, PositionHistory, PushOutcome, Rejection};
pub use phase::{AttemptTrigger, ShotPhase, ShotPhaseMachine};
pub use progress::{NoProgress, ProgressObserver};
pub use scoring::{score_attempt, ScoreReport};
pub use session::{SessionCounters, ShotSession};
pub use source::{FrameSource, VecFrameSource};
pub use zones::HoopZones;
