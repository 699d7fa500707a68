//! Per-video tracking state.
//!
//! A [`ShotSession`] owns everything one video analysis mutates: both
//! histories, the phase machine and the aggregator. Feed it frames in order
//! with [`ShotSession::process_frame`]; drop it to abandon the analysis.

use hoopclip_models::{FrameDetections, SessionResult, ShotEvent, VideoMeta};
use tracing::{debug, info};

use crate::aggregator::ShotAggregator;
use crate::config::ShotDetectorConfig;
use crate::error::{TrackingError, TrackingResult};
use crate::history::{BallHistory, BallPolicy, HoopHistory, HoopPolicy, PushOutcome};
use crate::ingest::ingest_frame;
use crate::phase::{AttemptTrigger, ShotPhase, ShotPhaseMachine};
use crate::scoring::score_attempt;
use crate::zones::HoopZones;

/// Running counts for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionCounters {
    pub frames_processed: u64,
    pub balls_accepted: u64,
    pub balls_rejected: u64,
    pub hoops_accepted: u64,
    pub hoops_rejected: u64,
}

impl SessionCounters {
    fn count(outcome: PushOutcome, accepted: &mut u64, rejected: &mut u64) {
        if outcome.is_accepted() {
            *accepted += 1;
        } else {
            *rejected += 1;
        }
    }
}

#[derive(Debug)]
pub struct ShotSession {
    config: ShotDetectorConfig,
    meta: VideoMeta,
    ball: BallHistory,
    hoop: HoopHistory,
    phase: ShotPhaseMachine,
    aggregator: ShotAggregator,
    next_frame: u64,
    counters: SessionCounters,
}

impl ShotSession {
    pub fn new(config: ShotDetectorConfig, meta: VideoMeta) -> TrackingResult<Self> {
        meta.validate()?;
        Ok(Self {
            ball: BallHistory::new(BallPolicy::from_config(&config)),
            hoop: HoopHistory::new(HoopPolicy::from_config(&config)),
            phase: ShotPhaseMachine::new(config.completion_check_interval),
            aggregator: ShotAggregator::new(),
            next_frame: 0,
            counters: SessionCounters::default(),
            config,
            meta,
        })
    }

    pub fn meta(&self) -> &VideoMeta {
        &self.meta
    }

    pub fn counters(&self) -> SessionCounters {
        self.counters
    }

    pub fn phase(&self) -> ShotPhase {
        self.phase.phase()
    }

    pub fn attempts(&self) -> &[ShotEvent] {
        self.aggregator.attempts()
    }

    pub fn ball_history(&self) -> &BallHistory {
        &self.ball
    }

    pub fn hoop_history(&self) -> &HoopHistory {
        &self.hoop
    }

    /// Index the next frame must carry.
    pub fn next_frame_index(&self) -> u64 {
        self.next_frame
    }

    /// Consume one frame. Returns the shot completed on this frame, if any.
    ///
    /// Frames must arrive in order without gaps; anything else means the
    /// stream is broken and the session cannot continue.
    pub fn process_frame(&mut self, frame: &FrameDetections) -> TrackingResult<Option<ShotEvent>> {
        if frame.frame_index != self.next_frame {
            return Err(TrackingError::FrameSequence {
                expected: self.next_frame,
                found: frame.frame_index,
            });
        }
        let frame_index = frame.frame_index;
        self.next_frame += 1;
        self.counters.frames_processed += 1;

        let zones_before = self.hoop_zones();
        let observed = ingest_frame(frame, zones_before.as_ref(), &self.config);

        if let Some(outcome) = self.ball.push_first_accepted(&observed.balls, frame_index) {
            SessionCounters::count(
                outcome,
                &mut self.counters.balls_accepted,
                &mut self.counters.balls_rejected,
            );
        }
        if let Some(outcome) = self.hoop.push_first_accepted(&observed.hoops, frame_index) {
            SessionCounters::count(
                outcome,
                &mut self.counters.hoops_accepted,
                &mut self.counters.hoops_rejected,
            );
        }
        self.ball.prune(frame_index);

        let zones = self.hoop_zones();
        let Some(trigger) = self
            .phase
            .advance(frame_index, self.ball.latest(), zones.as_ref())
        else {
            return Ok(None);
        };

        Ok(self.complete_attempt(trigger))
    }

    fn hoop_zones(&self) -> Option<HoopZones> {
        self.hoop
            .latest()
            .map(|hoop| HoopZones::new(hoop, &self.config))
    }

    fn complete_attempt(&mut self, trigger: AttemptTrigger) -> Option<ShotEvent> {
        let hoop = self.hoop.latest()?;
        let report = score_attempt(&self.ball.snapshot(), hoop, &self.config);
        let event = ShotEvent::new(
            trigger.down_frame,
            self.meta.timestamp_for(trigger.down_frame),
            report.made,
        );

        info!(
            frame = event.frame,
            timestamp = event.timestamp,
            up_frame = trigger.up_frame,
            made = event.made,
            "Shot attempt detected"
        );
        debug!(?report, "Score details");

        self.aggregator.record(event);
        Some(event)
    }

    /// Close the session and build the summary with clip windows.
    pub fn finish(self, before_secs: f64, after_secs: f64) -> SessionResult {
        let duration = self.meta.duration_secs();
        let result = self.aggregator.finish(before_secs, after_secs, duration);
        info!(
            frames = self.counters.frames_processed,
            attempts = result.stats.total_attempts,
            makes = result.stats.total_makes,
            accuracy = result.stats.accuracy_percent,
            "Session finished"
        );
        result
    }

    /// Close the session, keeping only the attempts.
    pub fn into_attempts(self) -> Vec<ShotEvent> {
        self.aggregator.into_attempts()
    }
}
