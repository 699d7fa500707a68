//! Frame-indexed detection streams.

use std::collections::VecDeque;

use hoopclip_models::{FrameDetections, VideoMeta};

use crate::error::TrackingResult;

/// A source of per-frame detections for one video.
///
/// Frames must be yielded in order starting at 0, one per video frame,
/// including frames without detections.
pub trait FrameSource {
    /// Frame rate and frame count of the video.
    fn metadata(&self) -> TrackingResult<VideoMeta>;

    /// Next frame, or `None` once the stream is exhausted.
    fn next_frame(&mut self) -> TrackingResult<Option<FrameDetections>>;
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn metadata(&self) -> TrackingResult<VideoMeta> {
        (**self).metadata()
    }

    fn next_frame(&mut self) -> TrackingResult<Option<FrameDetections>> {
        (**self).next_frame()
    }
}

/// In-memory frame source.
#[derive(Debug, Clone)]
pub struct VecFrameSource {
    meta: VideoMeta,
    frames: VecDeque<FrameDetections>,
}

impl VecFrameSource {
    pub fn new(meta: VideoMeta, frames: Vec<FrameDetections>) -> Self {
        Self {
            meta,
            frames: frames.into(),
        }
    }

    /// Source of `total_frames` frames, filling gaps in `frames` with empty ones.
    pub fn dense(meta: VideoMeta, frames: Vec<FrameDetections>) -> Self {
        let mut by_index: Vec<FrameDetections> =
            (0..meta.total_frames).map(FrameDetections::empty).collect();
        for frame in frames {
            if let Some(slot) = by_index.get_mut(frame.frame_index as usize) {
                slot.detections.extend(frame.detections);
            }
        }
        Self::new(meta, by_index)
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for VecFrameSource {
    fn metadata(&self) -> TrackingResult<VideoMeta> {
        self.meta.validate()?;
        Ok(self.meta)
    }

    fn next_frame(&mut self) -> TrackingResult<Option<FrameDetections>> {
        Ok(self.frames.pop_front())
    }
}
