//! Configuration for the shot tracking pipeline.
//!
//! Every threshold here was tuned empirically against fixed-camera gym
//! footage; recalibrate per camera setup rather than editing call sites.

use serde::{Deserialize, Serialize};

/// How a completed attempt is classified as made or missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMethod {
    /// Line through the last point above the rim plane and the point after it
    #[default]
    TwoPointLine,
    /// Least-squares parabola through the recent ball trajectory
    Parabola,
}

impl std::str::FromStr for ScoringMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" | "two_point_line" => Ok(ScoringMethod::TwoPointLine),
            "parabola" => Ok(ScoringMethod::Parabola),
            other => Err(format!("unknown scoring method: {}", other)),
        }
    }
}

/// Configuration for the shot tracking pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotDetectorConfig {
    // === Ingestion ===
    /// Minimum confidence for a ball anywhere in frame (default: 0.25)
    pub ball_confidence: f64,

    /// Relaxed ball confidence inside the hoop region (default: 0.15)
    pub ball_near_hoop_confidence: f64,

    /// Minimum confidence for a hoop (default: 0.30)
    pub hoop_confidence: f64,

    // === Ball History ===
    /// Maximum jump between consecutive balls, in previous-box diagonals (default: 4.0)
    pub ball_max_jump_diagonals: f64,

    /// Jump rule only applies when the frame gap is below this (default: 5)
    pub ball_jump_frame_gap: u64,

    /// Maximum side ratio of a ball box (default: 1.4)
    pub ball_max_aspect_ratio: f64,

    /// Ball observations older than this many frames are evicted (default: 30)
    pub ball_max_age_frames: u64,

    // === Hoop History ===
    /// Maximum hoop movement, in previous-box diagonals (default: 0.5)
    pub hoop_max_jump_diagonals: f64,

    /// Jump rule only applies when the frame gap is below this (default: 5)
    pub hoop_jump_frame_gap: u64,

    /// Maximum side ratio of a hoop box (default: 1.3)
    pub hoop_max_aspect_ratio: f64,

    /// Number of hoop observations retained (default: 25)
    pub hoop_capacity: usize,

    // === Zones (multiples of hoop width/height) ===
    /// Half-width of the hoop region used for relaxed ball confidence (default: 1.0)
    pub hoop_region_half_width: f64,

    /// Hoop region extent above the hoop center (default: 1.0)
    pub hoop_region_above: f64,

    /// Hoop region extent below the hoop center (default: 0.5)
    pub hoop_region_below: f64,

    /// Half-width of the backboard zone that arms an attempt (default: 4.0)
    pub backboard_half_width: f64,

    /// Backboard zone top, above the hoop center (default: 2.0)
    pub backboard_top: f64,

    /// Backboard zone bottom, above the hoop center (default: 0.5)
    pub backboard_bottom: f64,

    /// Ball must drop this far below the hoop center to count as down (default: 0.5)
    pub below_rim_offset: f64,

    // === Scoring ===
    /// Classification strategy (default: two-point line)
    pub scoring_method: ScoringMethod,

    /// Rim half-span as a fraction of hoop width (default: 0.4)
    pub rim_half_width: f64,

    /// Extra pixels accepted on each side of the rim (default: 10.0)
    pub rebound_buffer: f64,

    /// Ball points used by the parabola fit (default: 15)
    pub parabola_points: usize,

    /// Maximum vertical miss at the hoop center for the parabola fit (default: 30.0)
    pub parabola_tolerance: f64,

    // === Throttles ===
    /// Attempt completion is checked on frames that are multiples of this (default: 10)
    pub completion_check_interval: u64,

    /// Progress is reported every this many frames (default: 30)
    pub progress_interval: u64,
}

impl Default for ShotDetectorConfig {
    fn default() -> Self {
        Self {
            // Ingestion
            ball_confidence: 0.25,
            ball_near_hoop_confidence: 0.15,
            hoop_confidence: 0.30,

            // Ball History - a ball cannot cover 4 diameters in under 5 frames
            ball_max_jump_diagonals: 4.0,
            ball_jump_frame_gap: 5,
            ball_max_aspect_ratio: 1.4,
            ball_max_age_frames: 30,

            // Hoop History - any real movement means we jumped to another hoop
            hoop_max_jump_diagonals: 0.5,
            hoop_jump_frame_gap: 5,
            hoop_max_aspect_ratio: 1.3,
            hoop_capacity: 25,

            // Zones
            hoop_region_half_width: 1.0,
            hoop_region_above: 1.0,
            hoop_region_below: 0.5,
            backboard_half_width: 4.0,
            backboard_top: 2.0,
            backboard_bottom: 0.5,
            below_rim_offset: 0.5,

            // Scoring
            scoring_method: ScoringMethod::TwoPointLine,
            rim_half_width: 0.4,
            rebound_buffer: 10.0,
            parabola_points: 15,
            parabola_tolerance: 30.0,

            // Throttles
            completion_check_interval: 10,
            progress_interval: 30,
        }
    }
}

impl ShotDetectorConfig {
    /// Override the base ball confidence threshold.
    pub fn with_ball_confidence(mut self, confidence: f64) -> Self {
        self.ball_confidence = confidence;
        self
    }

    /// Select the scoring strategy.
    pub fn with_scoring_method(mut self, method: ScoringMethod) -> Self {
        self.scoring_method = method;
        self
    }

    /// Set the attempt completion throttle.
    pub fn with_completion_check_interval(mut self, frames: u64) -> Self {
        self.completion_check_interval = frames.max(1);
        self
    }

    /// Set the rim rebound buffer in pixels.
    pub fn with_rebound_buffer(mut self, pixels: f64) -> Self {
        self.rebound_buffer = pixels;
        self
    }

    /// Apply `HOOPCLIP_*` environment overrides on top of the defaults.
    ///
    /// Unparseable values are ignored and keep the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        override_from_env("HOOPCLIP_BALL_CONFIDENCE", &mut config.ball_confidence);
        override_from_env(
            "HOOPCLIP_BALL_NEAR_HOOP_CONFIDENCE",
            &mut config.ball_near_hoop_confidence,
        );
        override_from_env("HOOPCLIP_HOOP_CONFIDENCE", &mut config.hoop_confidence);
        override_from_env("HOOPCLIP_REBOUND_BUFFER", &mut config.rebound_buffer);
        override_from_env("HOOPCLIP_RIM_HALF_WIDTH", &mut config.rim_half_width);
        override_from_env("HOOPCLIP_SCORING_METHOD", &mut config.scoring_method);
        override_from_env(
            "HOOPCLIP_COMPLETION_CHECK_INTERVAL",
            &mut config.completion_check_interval,
        );
        override_from_env("HOOPCLIP_PROGRESS_INTERVAL", &mut config.progress_interval);
        config.completion_check_interval = config.completion_check_interval.max(1);
        config.progress_interval = config.progress_interval.max(1);
        config
    }
}

fn override_from_env<T: std::str::FromStr>(key: &str, target: &mut T) {
    if let Some(value) = std::env::var(key).ok().and_then(|s| s.parse().ok()) {
        *target = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tuned_values() {
        let config = ShotDetectorConfig::default();
        assert_eq!(config.ball_confidence, 0.25);
        assert_eq!(config.hoop_capacity, 25);
        assert_eq!(config.ball_max_age_frames, 30);
        assert_eq!(config.completion_check_interval, 10);
        assert_eq!(config.scoring_method, ScoringMethod::TwoPointLine);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ShotDetectorConfig =
            serde_json::from_str(r#"{"rebound_buffer": 5.0, "scoring_method": "parabola"}"#)
                .unwrap();
        assert_eq!(config.rebound_buffer, 5.0);
        assert_eq!(config.scoring_method, ScoringMethod::Parabola);
        assert_eq!(config.hoop_confidence, 0.30);
    }

    #[test]
    fn test_scoring_method_parse() {
        assert_eq!("line".parse::<ScoringMethod>(), Ok(ScoringMethod::TwoPointLine));
        assert_eq!("Parabola".parse::<ScoringMethod>(), Ok(ScoringMethod::Parabola));
        assert!("spline".parse::<ScoringMethod>().is_err());
    }

    #[test]
    fn test_interval_never_zero() {
        let config = ShotDetectorConfig::default().with_completion_check_interval(0);
        assert_eq!(config.completion_check_interval, 1);
    }
}
