//! Shot phase state machine.
//!
//! An attempt is a ball seen in the backboard zone above the rim, then below
//! the rim. Completion is only checked on throttled frames, so a trigger may
//! be raised a few frames after the ball actually dropped.

use hoopclip_models::Observation;
use tracing::debug;

use crate::zones::HoopZones;

/// Where the current attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShotPhase {
    #[default]
    Idle,
    /// Ball seen above the rim near the backboard
    AboveRim { up_frame: u64 },
    /// Ball dropped below the rim after being above it
    BelowRim { up_frame: u64, down_frame: u64 },
}

/// A completed up/down sequence, ready to be scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptTrigger {
    pub up_frame: u64,
    pub down_frame: u64,
}

/// Per-session phase tracker.
#[derive(Debug, Clone)]
pub struct ShotPhaseMachine {
    phase: ShotPhase,
    check_interval: u64,
}

impl ShotPhaseMachine {
    pub fn new(check_interval: u64) -> Self {
        Self {
            phase: ShotPhase::Idle,
            check_interval: check_interval.max(1),
        }
    }

    pub fn phase(&self) -> ShotPhase {
        self.phase
    }

    /// Evaluate one processed frame.
    ///
    /// Does nothing until both a ball and a hoop have been seen. Returns a
    /// trigger when a completion check finds a well-ordered up/down pair.
    pub fn advance(
        &mut self,
        frame_index: u64,
        latest_ball: Option<&Observation>,
        zones: Option<&HoopZones>,
    ) -> Option<AttemptTrigger> {
        let (Some(ball), Some(zones)) = (latest_ball, zones) else {
            return None;
        };

        if self.phase == ShotPhase::Idle && zones.in_backboard_zone(ball.center) {
            debug!(frame = frame_index, up_frame = ball.frame_index, "Ball above rim");
            self.phase = ShotPhase::AboveRim {
                up_frame: ball.frame_index,
            };
        }

        if let ShotPhase::AboveRim { up_frame } = self.phase {
            if zones.is_below_rim(ball.center) {
                debug!(frame = frame_index, down_frame = ball.frame_index, "Ball below rim");
                self.phase = ShotPhase::BelowRim {
                    up_frame,
                    down_frame: ball.frame_index,
                };
            }
        }

        if frame_index % self.check_interval != 0 {
            return None;
        }

        let ShotPhase::BelowRim {
            up_frame,
            down_frame,
        } = self.phase
        else {
            return None;
        };

        self.phase = ShotPhase::Idle;
        if up_frame < down_frame {
            Some(AttemptTrigger {
                up_frame,
                down_frame,
            })
        } else {
            debug!(up_frame, down_frame, "Discarding out-of-order up/down pair");
            None
        }
    }

    /// Forget any partial attempt.
    pub fn reset(&mut self) {
        self.phase = ShotPhase::Idle;
    }
}
