//! Session summary and highlight clip windows.

use hoopclip_models::timestamp::round_hundredths;
use hoopclip_models::{ClipWindow, SessionResult, SessionStats, ShotEvent};

/// Accumulates shot events in emission order.
#[derive(Debug, Clone, Default)]
pub struct ShotAggregator {
    attempts: Vec<ShotEvent>,
}

impl ShotAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: ShotEvent) {
        self.attempts.push(event);
    }

    pub fn attempts(&self) -> &[ShotEvent] {
        &self.attempts
    }

    pub fn made_shots(&self) -> impl Iterator<Item = &ShotEvent> {
        self.attempts.iter().filter(|e| e.made)
    }

    pub fn stats(&self) -> SessionStats {
        let total_attempts = self.attempts.len();
        let total_makes = self.made_shots().count();
        let accuracy_percent = if total_attempts == 0 {
            0.0
        } else {
            round_hundredths(100.0 * total_makes as f64 / total_attempts as f64)
        };

        SessionStats {
            total_attempts,
            total_makes,
            accuracy_percent,
        }
    }

    /// One clamped window per made shot. Overlapping windows are kept as-is.
    pub fn clip_windows(&self, before_secs: f64, after_secs: f64, duration_secs: f64) -> Vec<ClipWindow> {
        self.made_shots()
            .map(|shot| clip_window(shot, before_secs, after_secs, duration_secs))
            .collect()
    }

    /// Recorded attempts, without building a summary.
    pub fn into_attempts(self) -> Vec<ShotEvent> {
        self.attempts
    }

    /// Final summary. Consumes the aggregator.
    pub fn finish(self, before_secs: f64, after_secs: f64, duration_secs: f64) -> SessionResult {
        let stats = self.stats();
        let clips = self.clip_windows(before_secs, after_secs, duration_secs);
        let made_shots = self.made_shots().copied().collect();

        SessionResult {
            attempts: self.attempts,
            made_shots,
            clips,
            stats,
        }
    }
}

/// Window of `before_secs` before and `after_secs` after a shot, clamped to
/// `[0, duration_secs]`.
pub fn clip_window(
    shot: &ShotEvent,
    before_secs: f64,
    after_secs: f64,
    duration_secs: f64,
) -> ClipWindow {
    ClipWindow {
        start: (shot.timestamp - before_secs).max(0.0),
        end: (shot.timestamp + after_secs).min(duration_secs),
        shot_frame: shot.frame,
        shot_timestamp: shot.timestamp,
    }
}
