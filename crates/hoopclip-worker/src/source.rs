//! Frame sources backed by a detections dump.
//!
//! The dump is JSON Lines: the first record is the video metadata
//! (`{"fps": 30.0, "total_frames": 900}`), every following record is one
//! frame (`{"frame_index": 12, "detections": [...]}`). Frames without
//! detections may be omitted; they are served as empty frames.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use hoopclip_models::{FrameDetections, VideoMeta};
use hoopclip_tracking::{FrameSource, TrackingError, TrackingResult};
use tokio::sync::watch;

use crate::error::{WorkerError, WorkerResult};

/// Streaming reader over a JSON Lines detections dump.
pub struct JsonlFrameSource<R = BufReader<File>> {
    lines: Lines<R>,
    line_no: usize,
    meta: VideoMeta,
    pending: Option<FrameDetections>,
    next_index: u64,
}

impl JsonlFrameSource {
    /// Open a dump and read its metadata header.
    pub fn open(path: impl AsRef<Path>) -> WorkerResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            WorkerError::detections_file(format!("cannot open {}: {}", path.display(), e))
        })?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: BufRead> JsonlFrameSource<R> {
    pub fn from_reader(reader: R) -> WorkerResult<Self> {
        let mut source = Self {
            lines: reader.lines(),
            line_no: 0,
            meta: VideoMeta {
                fps: 0.0,
                total_frames: 0,
            },
            pending: None,
            next_index: 0,
        };

        let header = source
            .next_record()
            .map_err(|e| WorkerError::detections_file(e.to_string()))?
            .ok_or_else(|| WorkerError::detections_file("missing metadata header"))?;
        source.meta = serde_json::from_str(&header)?;
        source.meta.validate().map_err(TrackingError::from)?;
        Ok(source)
    }

    /// Replace the header metadata, e.g. with values probed from the video.
    pub fn with_meta(mut self, meta: VideoMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Next non-blank line.
    fn next_record(&mut self) -> TrackingResult<Option<String>> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let line = line.map_err(|e| {
                TrackingError::input_unavailable(format!("line {}: {}", self.line_no, e))
            })?;
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    fn next_listed_frame(&mut self) -> TrackingResult<Option<FrameDetections>> {
        let Some(line) = self.next_record()? else {
            return Ok(None);
        };
        serde_json::from_str(&line)
            .map(Some)
            .map_err(|e| TrackingError::input_unavailable(format!("line {}: {}", self.line_no, e)))
    }
}

impl<R: BufRead> FrameSource for JsonlFrameSource<R> {
    fn metadata(&self) -> TrackingResult<VideoMeta> {
        Ok(self.meta)
    }

    fn next_frame(&mut self) -> TrackingResult<Option<FrameDetections>> {
        if self.pending.is_none() {
            self.pending = self.next_listed_frame()?;
        }

        match self.pending.take() {
            Some(frame) if frame.frame_index > self.next_index => {
                self.pending = Some(frame);
                let gap = FrameDetections::empty(self.next_index);
                self.next_index += 1;
                Ok(Some(gap))
            }
            // Out-of-order records are passed through for the tracker to reject
            Some(frame) => {
                self.next_index = frame.frame_index + 1;
                Ok(Some(frame))
            }
            None if self.next_index < self.meta.total_frames => {
                let tail = FrameDetections::empty(self.next_index);
                self.next_index += 1;
                Ok(Some(tail))
            }
            None => Ok(None),
        }
    }
}

/// Wraps a source so a shutdown request stops the pass between frames.
pub struct CancellableSource<S> {
    inner: S,
    cancel_rx: watch::Receiver<bool>,
}

impl<S> CancellableSource<S> {
    pub fn new(inner: S, cancel_rx: watch::Receiver<bool>) -> Self {
        Self { inner, cancel_rx }
    }
}

impl<S: FrameSource> FrameSource for CancellableSource<S> {
    fn metadata(&self) -> TrackingResult<VideoMeta> {
        self.inner.metadata()
    }

    fn next_frame(&mut self) -> TrackingResult<Option<FrameDetections>> {
        if *self.cancel_rx.borrow() {
            return Err(TrackingError::Cancelled);
        }
        self.inner.next_frame()
    }
}
