//! Single-pass shot detection over a frame source.

use hoopclip_models::{ProgressUpdate, SessionResult, ShotEvent};
use tracing::{info, info_span};

use crate::config::ShotDetectorConfig;
use crate::error::TrackingResult;
use crate::progress::ProgressObserver;
use crate::session::ShotSession;
use crate::source::FrameSource;

/// Entry point of the tracker.
///
/// The detector itself is stateless; every call builds a fresh
/// [`ShotSession`], so one detector can analyse any number of videos.
#[derive(Debug, Clone, Default)]
pub struct ShotDetector {
    config: ShotDetectorConfig,
}

impl ShotDetector {
    pub fn new(config: ShotDetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ShotDetectorConfig {
        &self.config
    }

    /// All attempts in the video, in completion order.
    pub fn detect(
        &self,
        source: impl FrameSource,
        observer: &dyn ProgressObserver,
    ) -> TrackingResult<Vec<ShotEvent>> {
        Ok(self.run(source, observer)?.into_attempts())
    }

    /// Attempts plus statistics and clip windows for made shots.
    ///
    /// `before_secs` and `after_secs` are taken as given; callers validate them.
    pub fn detect_with_clips(
        &self,
        source: impl FrameSource,
        before_secs: f64,
        after_secs: f64,
        observer: &dyn ProgressObserver,
    ) -> TrackingResult<SessionResult> {
        Ok(self.run(source, observer)?.finish(before_secs, after_secs))
    }

    fn run(
        &self,
        mut source: impl FrameSource,
        observer: &dyn ProgressObserver,
    ) -> TrackingResult<ShotSession> {
        let meta = source.metadata()?;
        let span = info_span!("detect", fps = meta.fps, total_frames = meta.total_frames);
        let _guard = span.enter();

        info!("Starting shot detection");
        let mut session = ShotSession::new(self.config.clone(), meta)?;
        let interval = self.config.progress_interval.max(1);

        while let Some(frame) = source.next_frame()? {
            session.process_frame(&frame)?;

            let processed = session.counters().frames_processed;
            if processed % interval == 0 {
                observer.on_progress(ProgressUpdate::new(processed, meta.total_frames));
            }
        }

        let counters = session.counters();
        info!(
            frames = counters.frames_processed,
            balls = counters.balls_accepted,
            balls_rejected = counters.balls_rejected,
            hoops = counters.hoops_accepted,
            hoops_rejected = counters.hoops_rejected,
            "Frame stream exhausted"
        );
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NoProgress;
    use crate::source::VecFrameSource;
    use hoopclip_models::{FrameDetections, VideoMeta};
    use std::cell::RefCell;

    #[test]
    fn test_progress_every_interval() {
        let meta = VideoMeta::new(30.0, 95).unwrap();
        let source = VecFrameSource::dense(meta, Vec::new());
        let seen = RefCell::new(Vec::new());
        let observer = |u: ProgressUpdate| seen.borrow_mut().push((u.frames_processed, u.total_frames));

        let shots = ShotDetector::default().detect(source, &observer).unwrap();
        assert!(shots.is_empty());
        assert_eq!(*seen.borrow(), vec![(30, 95), (60, 95), (90, 95)]);
    }

    #[test]
    fn test_broken_stream_aborts() {
        let meta = VideoMeta::new(30.0, 3).unwrap();
        let frames = vec![FrameDetections::empty(0), FrameDetections::empty(5)];
        let source = VecFrameSource::new(meta, frames);
        assert!(ShotDetector::default().detect(source, &NoProgress).is_err());
    }

    #[test]
    fn test_source_by_reference() {
        let meta = VideoMeta::new(25.0, 10).unwrap();
        let mut source = VecFrameSource::dense(meta, Vec::new());
        let result = ShotDetector::default()
            .detect_with_clips(&mut source, 8.0, 2.0, &NoProgress)
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(source.remaining(), 0);
    }
}
