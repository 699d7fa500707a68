//! End-to-end processing of one video session.
//!
//! Detection is CPU-bound and synchronous, so it runs on the blocking pool.
//! Progress crosses back over an unbounded channel and is logged from an
//! async task; the tracker never waits on the logger.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use hoopclip_media::{probe_video, render_highlight_reel, FfmpegRunner, HighlightReport};
use hoopclip_models::{timestamp::format_clock, ProgressUpdate, SessionResult, VideoMeta};
use hoopclip_tracking::{FrameSource, ShotDetector};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tracing::Instrument;

use crate::config::WorkerConfig;
use crate::error::{WorkerError, WorkerResult};
use crate::logging::SessionLogger;
use crate::metrics;
use crate::source::{CancellableSource, JsonlFrameSource};

/// Report written at the end of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub session_id: String,
    pub generated_at: DateTime<Utc>,
    pub detections: PathBuf,
    pub video: Option<PathBuf>,
    pub video_meta: VideoMeta,
    pub before_seconds: f64,
    pub after_seconds: f64,
    #[serde(flatten)]
    pub result: SessionResult,
    pub highlight: Option<HighlightReport>,
}

/// Runs detection, writes the report and renders highlights.
pub struct ShotProcessor {
    config: WorkerConfig,
    logger: SessionLogger,
    cancel_rx: watch::Receiver<bool>,
}

impl ShotProcessor {
    pub fn new(config: WorkerConfig) -> Self {
        // Keeps a receiver that never flips when no shutdown signal is wired
        let (_tx, cancel_rx) = watch::channel(false);
        Self {
            config,
            logger: SessionLogger::new("shot_tracking"),
            cancel_rx,
        }
    }

    /// Stop between frames, or kill FFmpeg, once `cancel_rx` flips to true.
    pub fn with_cancel(mut self, cancel_rx: watch::Receiver<bool>) -> Self {
        self.cancel_rx = cancel_rx;
        self
    }

    pub fn logger(&self) -> &SessionLogger {
        &self.logger
    }

    pub async fn run(&self) -> WorkerResult<SessionReport> {
        let span = self.logger.create_span();
        self.run_inner().instrument(span).await
    }

    async fn run_inner(&self) -> WorkerResult<SessionReport> {
        self.config.validate()?;
        self.logger
            .log_start(&format!("detections={}", self.config.detections_path.display()));

        let mut source = JsonlFrameSource::open(&self.config.detections_path)?;
        if let Some(video) = &self.config.video_path {
            source = self.reconcile_meta(source, video).await;
        }
        let video_meta = source.metadata()?;

        let started = Instant::now();
        let result = match self.detect(source).await {
            Ok(result) => result,
            Err(e) => {
                metrics::record_failure("detection");
                self.logger.log_error(&e.to_string());
                return Err(e);
            }
        };
        metrics::record_session(
            &result,
            video_meta.total_frames,
            started.elapsed().as_secs_f64(),
        );

        self.logger.log_progress(&format!(
            "{} attempts, {} made ({}%)",
            result.stats.total_attempts, result.stats.total_makes, result.stats.accuracy_percent
        ));
        for shot in &result.attempts {
            tracing::info!(
                frame = shot.frame,
                at = %format_clock(shot.timestamp),
                made = shot.made,
                "Shot"
            );
        }

        let highlight = self.render(&result).await?;

        let report = SessionReport {
            session_id: self.logger.session_id().to_string(),
            generated_at: Utc::now(),
            detections: self.config.detections_path.clone(),
            video: self.config.video_path.clone(),
            video_meta,
            before_seconds: self.config.before_seconds,
            after_seconds: self.config.after_seconds,
            result,
            highlight,
        };
        write_report(&self.config.output_path, &report)?;

        self.logger.log_completion(&format!(
            "report written to {}",
            self.config.output_path.display()
        ));
        Ok(report)
    }

    /// Prefer frame rate and count probed from the video over the dump header.
    async fn reconcile_meta(&self, source: JsonlFrameSource, video: &Path) -> JsonlFrameSource {
        let header = match source.metadata() {
            Ok(meta) => meta,
            Err(_) => return source,
        };
        match probe_video(video).await {
            Ok(probed) => {
                if (probed.fps - header.fps).abs() > 0.01 || probed.total_frames != header.total_frames
                {
                    self.logger.log_warning(&format!(
                        "detections header ({} fps, {} frames) differs from video ({} fps, {} frames); using video",
                        header.fps, header.total_frames, probed.fps, probed.total_frames
                    ));
                }
                source.with_meta(probed)
            }
            Err(e) => {
                self.logger
                    .log_warning(&format!("cannot probe {}: {}; using header", video.display(), e));
                source
            }
        }
    }

    async fn detect(&self, source: JsonlFrameSource) -> WorkerResult<SessionResult> {
        let detector = ShotDetector::new(self.config.tracker.clone());
        let before = self.config.before_seconds;
        let after = self.config.after_seconds;
        let source = CancellableSource::new(source, self.cancel_rx.clone());
        let (progress_tx, mut progress_rx) = mpsc::unbounded_channel::<ProgressUpdate>();

        let logger = self.logger.clone();
        let drain = tokio::spawn(async move {
            while let Some(update) = progress_rx.recv().await {
                metrics::set_detection_progress(update.percentage());
                logger.log_progress(&format!(
                    "{}/{} frames ({:.1}%)",
                    update.frames_processed,
                    update.total_frames,
                    update.percentage()
                ));
            }
        });

        let span = tracing::Span::current();
        let detection = tokio::task::spawn_blocking(move || {
            let _guard = span.enter();
            let observer = move |update: ProgressUpdate| {
                let _ = progress_tx.send(update);
            };
            detector.detect_with_clips(source, before, after, &observer)
        });

        let result = detection
            .await
            .map_err(|e| WorkerError::task_failed(e.to_string()))?;
        // The observer (and its sender) is gone, so the drain task ends
        let _ = drain.await;

        Ok(result?)
    }

    async fn render(&self, result: &SessionResult) -> WorkerResult<Option<HighlightReport>> {
        let Some(video) = self.config.video_path.as_ref().filter(|_| self.config.wants_highlights())
        else {
            return Ok(None);
        };
        if result.clips.is_empty() {
            self.logger.log_progress("no made shots, skipping highlight reel");
            return Ok(None);
        }

        let runner = FfmpegRunner::new()
            .with_timeout(self.config.ffmpeg_timeout.as_secs())
            .with_cancel(self.cancel_rx.clone());

        match render_highlight_reel(
            video,
            &result.clips,
            &self.config.highlight_path,
            &self.config.encoding,
            &runner,
        )
        .await
        {
            Ok(report) => {
                metrics::record_render(&report);
                Ok(Some(report))
            }
            Err(e) => {
                metrics::record_failure("render");
                self.logger.log_error(&format!("highlight render failed: {}", e));
                Err(e.into())
            }
        }
    }
}

fn write_report(path: &Path, report: &SessionReport) -> WorkerResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}
