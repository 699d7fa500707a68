//! Bounded, self-cleaning position histories for ball and hoop.
//!
//! A history only grows through [`PositionHistory::push`], which applies the
//! class-specific [`CleaningPolicy`] before accepting the newest observation,
//! and only shrinks through recency/capacity eviction. Frame indices of the
//! retained observations are strictly increasing.

use std::collections::VecDeque;

use hoopclip_models::Observation;
use tracing::debug;

use crate::config::ShotDetectorConfig;

/// Why a candidate observation was dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// Frame index not after the latest retained observation
    OutOfOrder { latest_frame: u64 },
    /// Moved further than physically plausible since the previous observation
    Jump { distance: f64, limit: f64 },
    /// Box too far from square
    Shape { width: f64, height: f64 },
}

/// Result of appending to a history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PushOutcome {
    Accepted,
    Rejected(Rejection),
}

impl PushOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, PushOutcome::Accepted)
    }
}

/// Class-specific outlier rejection and eviction rules.
pub trait CleaningPolicy {
    /// Check a candidate against the previous retained observation.
    fn check(&self, previous: Option<&Observation>, candidate: &Observation) -> Option<Rejection>;

    /// Whether the oldest retained observation should go.
    fn should_evict(&self, oldest: &Observation, len: usize, current_frame: u64) -> bool;
}

/// Shared jump-and-shape test; balls and hoops differ only in thresholds.
///
/// The first observation of an empty history has nothing to be judged
/// against and is accepted as-is.
fn check_jump_and_shape(
    previous: Option<&Observation>,
    candidate: &Observation,
    max_jump_diagonals: f64,
    jump_frame_gap: u64,
    max_aspect_ratio: f64,
) -> Option<Rejection> {
    let prev = previous?;

    let distance = prev.center.distance(&candidate.center);
    let limit = max_jump_diagonals * prev.diagonal();
    let gap = candidate.frame_index.saturating_sub(prev.frame_index);

    if distance > limit && gap < jump_frame_gap {
        return Some(Rejection::Jump { distance, limit });
    }

    if !candidate.is_roughly_square(max_aspect_ratio) {
        return Some(Rejection::Shape {
            width: candidate.width,
            height: candidate.height,
        });
    }

    None
}

/// Ball rules: no teleporting, roughly round, recent frames only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallPolicy {
    pub max_jump_diagonals: f64,
    pub jump_frame_gap: u64,
    pub max_aspect_ratio: f64,
    pub max_age_frames: u64,
}

impl BallPolicy {
    pub fn from_config(config: &ShotDetectorConfig) -> Self {
        Self {
            max_jump_diagonals: config.ball_max_jump_diagonals,
            jump_frame_gap: config.ball_jump_frame_gap,
            max_aspect_ratio: config.ball_max_aspect_ratio,
            max_age_frames: config.ball_max_age_frames,
        }
    }
}

impl Default for BallPolicy {
    fn default() -> Self {
        Self::from_config(&ShotDetectorConfig::default())
    }
}

impl CleaningPolicy for BallPolicy {
    fn check(&self, previous: Option<&Observation>, candidate: &Observation) -> Option<Rejection> {
        check_jump_and_shape(
            previous,
            candidate,
            self.max_jump_diagonals,
            self.jump_frame_gap,
            self.max_aspect_ratio,
        )
    }

    fn should_evict(&self, oldest: &Observation, _len: usize, current_frame: u64) -> bool {
        current_frame.saturating_sub(oldest.frame_index) > self.max_age_frames
    }
}

/// Hoop rules: near-stationary, roughly square, fixed number of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoopPolicy {
    pub max_jump_diagonals: f64,
    pub jump_frame_gap: u64,
    pub max_aspect_ratio: f64,
    pub capacity: usize,
}

impl HoopPolicy {
    pub fn from_config(config: &ShotDetectorConfig) -> Self {
        Self {
            max_jump_diagonals: config.hoop_max_jump_diagonals,
            jump_frame_gap: config.hoop_jump_frame_gap,
            max_aspect_ratio: config.hoop_max_aspect_ratio,
            capacity: config.hoop_capacity,
        }
    }
}

impl Default for HoopPolicy {
    fn default() -> Self {
        Self::from_config(&ShotDetectorConfig::default())
    }
}

impl CleaningPolicy for HoopPolicy {
    fn check(&self, previous: Option<&Observation>, candidate: &Observation) -> Option<Rejection> {
        check_jump_and_shape(
            previous,
            candidate,
            self.max_jump_diagonals,
            self.jump_frame_gap,
            self.max_aspect_ratio,
        )
    }

    fn should_evict(&self, _oldest: &Observation, len: usize, _current_frame: u64) -> bool {
        len > self.capacity
    }
}

/// Ordered, bounded history of one object class.
#[derive(Debug, Clone)]
pub struct PositionHistory<P> {
    entries: VecDeque<Observation>,
    policy: P,
}

/// Ball history.
pub type BallHistory = PositionHistory<BallPolicy>;
/// Hoop history.
pub type HoopHistory = PositionHistory<HoopPolicy>;

impl<P: CleaningPolicy> PositionHistory<P> {
    pub fn new(policy: P) -> Self {
        Self {
            entries: VecDeque::with_capacity(32),
            policy,
        }
    }

    /// Append an observation if it passes the cleaning rules, then evict.
    pub fn push(&mut self, observation: Observation, current_frame: u64) -> PushOutcome {
        let outcome = match self.admit(&observation) {
            Some(rejection) => {
                debug!(
                    class = %observation.class,
                    frame = observation.frame_index,
                    ?rejection,
                    "Observation rejected"
                );
                PushOutcome::Rejected(rejection)
            }
            None => {
                self.entries.push_back(observation);
                PushOutcome::Accepted
            }
        };

        self.prune(current_frame);
        outcome
    }

    /// Try candidates of one frame in order and keep the first that passes.
    ///
    /// At most one observation is appended, so retained frames stay strictly
    /// increasing. Returns the last rejection when none passes, or `None`
    /// when there were no candidates.
    pub fn push_first_accepted(
        &mut self,
        candidates: &[Observation],
        current_frame: u64,
    ) -> Option<PushOutcome> {
        let mut outcome = None;
        for candidate in candidates {
            match self.admit(candidate) {
                Some(rejection) => {
                    debug!(
                        class = %candidate.class,
                        frame = candidate.frame_index,
                        ?rejection,
                        "Candidate rejected"
                    );
                    outcome = Some(PushOutcome::Rejected(rejection));
                }
                None => {
                    self.entries.push_back(*candidate);
                    outcome = Some(PushOutcome::Accepted);
                    break;
                }
            }
        }

        self.prune(current_frame);
        outcome
    }

    fn admit(&self, observation: &Observation) -> Option<Rejection> {
        if let Some(latest) = self.entries.back() {
            if observation.frame_index <= latest.frame_index {
                return Some(Rejection::OutOfOrder {
                    latest_frame: latest.frame_index,
                });
            }
        }
        self.policy.check(self.entries.back(), observation)
    }

    /// Evict stale entries. Returns how many were removed.
    pub fn prune(&mut self, current_frame: u64) -> usize {
        let mut removed = 0;
        while let Some(oldest) = self.entries.front() {
            if !self.policy.should_evict(oldest, self.entries.len(), current_frame) {
                break;
            }
            self.entries.pop_front();
            removed += 1;
        }
        removed
    }

    pub fn latest(&self) -> Option<&Observation> {
        self.entries.back()
    }

    pub fn oldest(&self) -> Option<&Observation> {
        self.entries.front()
    }

    pub fn get(&self, index: usize) -> Option<&Observation> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retained observations, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Observation> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Copy of the retained observations, oldest first.
    pub fn snapshot(&self) -> Vec<Observation> {
        self.entries.iter().copied().collect()
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }
}

impl<P: CleaningPolicy + Default> Default for PositionHistory<P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}
