//! FFmpeg CLI wrapper for highlight rendering.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building
//! - Progress parsing from `-progress pipe:2`
//! - Cancellation and timeouts via tokio
//! - FFprobe metadata for the tracker
//! - Clip extraction and highlight reel concatenation

pub mod command;
pub mod error;
pub mod highlight;
pub mod probe;
pub mod progress;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use highlight::{
    concatenate_clips, extract_clips, render_highlight_reel, ExtractedClip, HighlightReport,
};
pub use probe::{probe_video, probe_video_info, VideoInfo};
pub use progress::{FfmpegProgress, ProgressCallback};
