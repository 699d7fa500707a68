//! Session summary produced at the end of a video analysis.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::shot::{ClipWindow, ShotEvent};

/// Aggregate shooting statistics for one video.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct SessionStats {
    pub total_attempts: usize,
    pub total_makes: usize,
    /// `100 * makes / attempts`, rounded to two decimals; 0 without attempts
    #[serde(rename = "accuracy")]
    pub accuracy_percent: f64,
}

/// Everything the tracker hands to downstream collaborators.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct SessionResult {
    /// All attempts, in completion order
    #[serde(rename = "shots")]
    pub attempts: Vec<ShotEvent>,
    /// Made attempts only, same order
    pub made_shots: Vec<ShotEvent>,
    /// One window per made shot
    pub clips: Vec<ClipWindow>,
    pub stats: SessionStats,
}

impl SessionResult {
    /// Whether any attempt was detected.
    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }
}
