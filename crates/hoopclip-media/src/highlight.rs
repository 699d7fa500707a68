//! Highlight reel rendering.
//!
//! Each clip window is cut from the source video and re-encoded on its own,
//! then the clips are joined with the concat demuxer. Re-encoding every clip
//! with the same profile is what makes the stream-copy join safe.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Instant;

use hoopclip_models::{ClipWindow, EncodingConfig};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Outcome of a highlight render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightReport {
    pub output: PathBuf,
    pub clips_rendered: usize,
    /// Windows with no length after clamping, plus cuts FFmpeg failed
    pub clips_skipped: usize,
    /// Sum of rendered window lengths in seconds
    pub total_duration: f64,
    pub elapsed_ms: u64,
}

/// A clip cut from the source video.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedClip {
    pub index: usize,
    pub path: PathBuf,
    pub window: ClipWindow,
}

/// Cut each window into its own file under `dir`.
///
/// Empty windows and cuts FFmpeg fails on are skipped with a warning.
/// Cancellation and a missing FFmpeg abort the whole extraction. Returns the
/// clips in window order.
pub async fn extract_clips(
    input: impl AsRef<Path>,
    windows: &[ClipWindow],
    dir: impl AsRef<Path>,
    encoding: &EncodingConfig,
    runner: &FfmpegRunner,
) -> MediaResult<Vec<ExtractedClip>> {
    let input = input.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    cut_each(windows, dir.as_ref(), |window, output| async move {
        let cmd = clip_command(input, &output, &window, encoding);
        runner.run(&cmd).await
    })
    .await
}

async fn cut_each<F, Fut>(
    windows: &[ClipWindow],
    dir: &Path,
    mut cut: F,
) -> MediaResult<Vec<ExtractedClip>>
where
    F: FnMut(ClipWindow, PathBuf) -> Fut,
    Fut: Future<Output = MediaResult<()>>,
{
    let mut clips = Vec::with_capacity(windows.len());
    for (index, window) in windows.iter().copied().enumerate() {
        if window.duration() <= 0.0 {
            warn!(
                index,
                start = window.start,
                end = window.end,
                "Skipping empty clip window"
            );
            continue;
        }

        let path = dir.join(format!("clip_{:03}.mp4", index));
        match cut(window, path.clone()).await {
            Ok(()) => {}
            Err(e) if e.is_clip_skippable() => {
                warn!(
                    index,
                    start = window.start,
                    end = window.end,
                    error = %e,
                    "Skipping clip that failed to extract"
                );
                continue;
            }
            Err(e) => return Err(e),
        }

        info!(
            index,
            start = window.start,
            end = window.end,
            shot_frame = window.shot_frame,
            "Extracted clip {}",
            path.display()
        );
        clips.push(ExtractedClip {
            index,
            path,
            window,
        });
    }

    Ok(clips)
}

/// Join clips into `output`. A single clip is copied as-is.
pub async fn concatenate_clips(
    clips: &[PathBuf],
    output: impl AsRef<Path>,
    dir: impl AsRef<Path>,
    runner: &FfmpegRunner,
) -> MediaResult<()> {
    let output = output.as_ref();

    match clips {
        [] => Err(MediaError::NoClips),
        [single] => {
            tokio::fs::copy(single, output).await?;
            Ok(())
        }
        _ => {
            let list = dir.as_ref().join("concat_list.txt");
            tokio::fs::write(&list, concat_list(clips)).await?;

            let cmd = FfmpegCommand::concat_list(&list, output).codec_copy();
            runner.run(&cmd).await?;

            let _ = tokio::fs::remove_file(&list).await;
            Ok(())
        }
    }
}

/// Render all windows into one highlight video.
///
/// Intermediate clips live in a temporary directory that is removed when the
/// render finishes, whether it succeeded or not.
pub async fn render_highlight_reel(
    input: impl AsRef<Path>,
    windows: &[ClipWindow],
    output: impl AsRef<Path>,
    encoding: &EncodingConfig,
    runner: &FfmpegRunner,
) -> MediaResult<HighlightReport> {
    let output = output.as_ref();
    let started = Instant::now();

    let renderable: Vec<&ClipWindow> = windows.iter().filter(|w| w.duration() > 0.0).collect();
    if renderable.is_empty() {
        return Err(MediaError::NoClips);
    }

    let parent = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    tokio::fs::create_dir_all(parent).await?;
    let work_dir = tempfile::Builder::new()
        .prefix("hoopclip-clips-")
        .tempdir_in(parent)?;

    let clips = extract_clips(input, windows, work_dir.path(), encoding, runner).await?;
    let paths: Vec<PathBuf> = clips.iter().map(|c| c.path.clone()).collect();
    concatenate_clips(&paths, output, work_dir.path(), runner).await?;

    let report = HighlightReport {
        output: output.to_path_buf(),
        clips_rendered: clips.len(),
        clips_skipped: windows.len() - clips.len(),
        total_duration: clips.iter().map(|c| c.window.duration()).sum(),
        elapsed_ms: started.elapsed().as_millis() as u64,
    };

    info!(
        clips = report.clips_rendered,
        skipped = report.clips_skipped,
        duration = report.total_duration,
        elapsed_ms = report.elapsed_ms,
        "Highlight reel written to {}",
        output.display()
    );
    Ok(report)
}

fn clip_command(
    input: &Path,
    output: &Path,
    window: &ClipWindow,
    encoding: &EncodingConfig,
) -> FfmpegCommand {
    FfmpegCommand::new(input, output)
        .seek(window.start)
        .duration(window.duration())
        .encoding(encoding)
        .zero_start_timestamps()
}

/// Concat demuxer list. Paths are single-quoted, embedded quotes escaped.
fn concat_list(clips: &[PathBuf]) -> String {
    clips
        .iter()
        .map(|clip| {
            let path = clip.to_string_lossy().replace('\'', r"'\''");
            format!("file '{}'\n", path)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: f64, end: f64) -> ClipWindow {
        ClipWindow {
            start,
            end,
            shot_frame: 0,
            shot_timestamp: end,
        }
    }

    #[test]
    fn test_concat_list_format() {
        let list = concat_list(&[
            PathBuf::from("/tmp/a/clip_000.mp4"),
            PathBuf::from("/tmp/it's/clip_001.mp4"),
        ]);
        assert_eq!(
            list,
            "file '/tmp/a/clip_000.mp4'\nfile '/tmp/it'\\''s/clip_001.mp4'\n"
        );
    }

    #[test]
    fn test_clip_command_uses_window() {
        let args = clip_command(
            Path::new("game.mp4"),
            Path::new("out.mp4"),
            &window(4.0, 14.5),
            &EncodingConfig::default(),
        )
        .build_args();
        let t = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t + 1], "10.500");
    }

    #[tokio::test]
    async fn test_no_renderable_windows() {
        let dir = tempfile::tempdir().unwrap();
        let result = render_highlight_reel(
            dir.path().join("game.mp4"),
            &[window(3.0, 3.0)],
            dir.path().join("reel.mp4"),
            &EncodingConfig::default(),
            &FfmpegRunner::new(),
        )
        .await;
        assert!(matches!(result, Err(MediaError::NoClips)));
    }

    #[tokio::test]
    async fn test_single_clip_is_copied() {
        let dir = tempfile::tempdir().unwrap();
        let clip = dir.path().join("clip_000.mp4");
        tokio::fs::write(&clip, b"not really a video").await.unwrap();
        let output = dir.path().join("reel.mp4");

        concatenate_clips(&[clip], &output, dir.path(), &FfmpegRunner::new())
            .await
            .unwrap();
        assert_eq!(
            tokio::fs::read(&output).await.unwrap(),
            b"not really a video"
        );
    }

    #[tokio::test]
    async fn test_failed_cut_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let windows = [window(0.0, 2.0), window(5.0, 5.0), window(8.0, 11.0), window(20.0, 24.0)];

        let clips = cut_each(&windows, dir.path(), |window, _| async move {
            if window.start == 8.0 {
                Err(MediaError::ffmpeg_failed("FFmpeg exited with error", None, Some(1)))
            } else {
                Ok(())
            }
        })
        .await
        .unwrap();

        let indices: Vec<usize> = clips.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 3]);
        assert_eq!(clips[1].path, dir.path().join("clip_003.mp4"));
        assert_eq!(clips[1].window.duration(), 4.0);
    }

    #[tokio::test]
    async fn test_every_cut_failing_leaves_nothing_to_join() {
        let dir = tempfile::tempdir().unwrap();
        let clips = cut_each(&[window(0.0, 2.0)], dir.path(), |_, _| async {
            Err(MediaError::Timeout(5))
        })
        .await
        .unwrap();
        assert!(clips.is_empty());

        let result =
            concatenate_clips(&[], dir.path().join("reel.mp4"), dir.path(), &FfmpegRunner::new()).await;
        assert!(matches!(result, Err(MediaError::NoClips)));
    }

    #[tokio::test]
    async fn test_cancelled_cut_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let mut calls = 0;
        let result = cut_each(&[window(0.0, 2.0), window(4.0, 6.0)], dir.path(), |_, _| {
            calls += 1;
            async { Err(MediaError::Cancelled) }
        })
        .await;
        assert!(matches!(result, Err(MediaError::Cancelled)));
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_clips(
            dir.path().join("missing.mp4"),
            &[window(0.0, 2.0)],
            dir.path(),
            &EncodingConfig::default(),
            &FfmpegRunner::new(),
        )
        .await;
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }
}
