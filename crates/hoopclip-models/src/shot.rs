//! Shot attempt and highlight clip window models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A completed shot attempt, resolved to made or missed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShotEvent {
    /// Frame at which the ball dropped below the rim plane
    pub frame: u64,
    /// `frame / fps` in seconds, rounded to two decimals
    pub timestamp: f64,
    /// Whether the attempt was classified as a make
    pub made: bool,
}

impl ShotEvent {
    pub fn new(frame: u64, timestamp: f64, made: bool) -> Self {
        Self {
            frame,
            timestamp,
            made,
        }
    }
}

/// Padded time interval around a made shot, for highlight extraction.
///
/// Windows are clamped to the video bounds and never merged; overlapping
/// windows are left for the clip extractor to deal with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClipWindow {
    /// Start time in seconds (>= 0)
    pub start: f64,
    /// End time in seconds (<= video duration)
    pub end: f64,
    /// Frame of the shot this window surrounds
    pub shot_frame: u64,
    /// Timestamp of the shot this window surrounds
    pub shot_timestamp: f64,
}

impl ClipWindow {
    /// Length of the window in seconds.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_duration() {
        let clip = ClipWindow {
            start: 2.5,
            end: 12.5,
            shot_frame: 315,
            shot_timestamp: 10.5,
        };
        assert!((clip.duration() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_shot_event_json_shape() {
        let json = serde_json::to_value(ShotEvent::new(120, 4.0, true)).unwrap();
        assert_eq!(json["frame"], 120);
        assert_eq!(json["timestamp"], 4.0);
        assert_eq!(json["made"], true);
    }
}
