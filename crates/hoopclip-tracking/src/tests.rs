//! End-to-end scenarios over synthetic detection streams.

use hoopclip_models::{FrameDetections, RawDetection, VideoMeta};

use crate::config::ShotDetectorConfig;
use crate::detector::ShotDetector;
use crate::phase::ShotPhase;
use crate::progress::NoProgress;
use crate::session::ShotSession;
use crate::source::{FrameSource, VecFrameSource};

const BALL: usize = 0;
const HOOP: usize = 1;

fn hoop() -> RawDetection {
    RawDetection::from_center(320.0, 240.0, 40.0, 30.0, 0.85, HOOP)
}

/// Straight-line ball flight over 15 frames starting at `start`.
fn ball_flight(start: u64, from: (f64, f64), to: (f64, f64)) -> Vec<(u64, RawDetection)> {
    (0..=15)
        .map(|step| {
            let t = step as f64 / 15.0;
            let x = from.0 + (to.0 - from.0) * t;
            let y = from.1 + (to.1 - from.1) * t;
            (start + step, RawDetection::from_center(x, y, 20.0, 20.0, 0.8, BALL))
        })
        .collect()
}

/// A make: enters the backboard zone, drops through the rim.
fn make_at(start: u64) -> Vec<(u64, RawDetection)> {
    ball_flight(start, (300.0, 150.0), (320.0, 260.0))
}

/// A miss: drops well to the left of the rim.
fn miss_at(start: u64) -> Vec<(u64, RawDetection)> {
    ball_flight(start, (180.0, 150.0), (170.0, 260.0))
}

fn stream(total_frames: u64, balls: Vec<(u64, RawDetection)>) -> VecFrameSource {
    let meta = VideoMeta::new(30.0, total_frames).unwrap();
    let mut frames: Vec<FrameDetections> = (0..total_frames)
        .map(|i| FrameDetections::new(i, vec![hoop()]))
        .collect();
    for (frame, ball) in balls {
        frames[frame as usize].detections.push(ball);
    }
    VecFrameSource::new(meta, frames)
}

#[test]
fn test_single_made_shot() {
    let source = stream(100, make_at(40));
    let shots = ShotDetector::default().detect(source, &NoProgress).unwrap();

    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].frame, 55);
    assert_eq!(shots[0].timestamp, 1.83);
    assert!(shots[0].made);
}

#[test]
fn test_single_made_shot_with_clips() {
    let source = stream(100, make_at(40));
    let result = ShotDetector::default()
        .detect_with_clips(source, 8.0, 2.0, &NoProgress)
        .unwrap();

    assert_eq!(result.stats.total_attempts, 1);
    assert_eq!(result.stats.total_makes, 1);
    assert_eq!(result.stats.accuracy_percent, 100.0);
    assert_eq!(result.clips.len(), 1);
    assert_eq!(result.clips[0].start, 0.0);
    assert!((result.clips[0].end - 100.0 / 30.0).abs() < 1e-9);
}

#[test]
fn test_event_reported_on_down_frame_not_check_frame() {
    // Ball drops below the rim on frame 51, completion is noticed on 60
    let mut session =
        ShotSession::new(ShotDetectorConfig::default(), VideoMeta::new(30.0, 70).unwrap()).unwrap();
    let mut source = stream(70, make_at(36));
    let mut emitted = Vec::new();
    while let Some(frame) = source.next_frame().unwrap() {
        if let Some(event) = session.process_frame(&frame).unwrap() {
            emitted.push((frame.frame_index, event.frame));
        }
    }
    assert_eq!(emitted, vec![(60, 51)]);
}

#[test]
fn test_down_on_check_frame_emits_same_frame() {
    let mut session =
        ShotSession::new(ShotDetectorConfig::default(), VideoMeta::new(30.0, 70).unwrap()).unwrap();
    let mut source = stream(70, make_at(35));
    let mut emitted = Vec::new();
    while let Some(frame) = source.next_frame().unwrap() {
        if let Some(event) = session.process_frame(&frame).unwrap() {
            emitted.push((frame.frame_index, event.frame));
        }
    }
    assert_eq!(emitted, vec![(50, 50)]);
}

#[test]
fn test_shorter_check_interval() {
    let config = ShotDetectorConfig::default().with_completion_check_interval(1);
    let shots = ShotDetector::new(config)
        .detect(stream(70, make_at(36)), &NoProgress)
        .unwrap();
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].frame, 51);
}

#[test]
fn test_make_and_miss_in_one_session() {
    let mut balls = make_at(10);
    balls.extend(miss_at(70));
    let result = ShotDetector::default()
        .detect_with_clips(stream(150, balls), 8.0, 2.0, &NoProgress)
        .unwrap();

    assert_eq!(result.attempts.len(), 2);
    assert!(result.attempts[0].made);
    assert_eq!(result.attempts[0].frame, 25);
    assert!(!result.attempts[1].made);
    assert_eq!(result.attempts[1].frame, 85);
    assert_eq!(result.made_shots.len(), 1);
    assert_eq!(result.clips.len(), 1);
    assert_eq!(result.stats.accuracy_percent, 50.0);
}

#[test]
fn test_attempt_frames_strictly_increase() {
    let mut balls = make_at(0);
    balls.extend(make_at(50));
    balls.extend(miss_at(100));
    let shots = ShotDetector::default()
        .detect(stream(160, balls), &NoProgress)
        .unwrap();

    assert_eq!(shots.len(), 3);
    assert!(shots.windows(2).all(|w| w[0].frame < w[1].frame));
}

#[test]
fn test_no_ball_no_attempts() {
    let result = ShotDetector::default()
        .detect_with_clips(stream(90, Vec::new()), 8.0, 2.0, &NoProgress)
        .unwrap();
    assert!(result.is_empty());
    assert_eq!(result.stats.accuracy_percent, 0.0);
}

#[test]
fn test_ball_without_hoop_never_arms() {
    let meta = VideoMeta::new(30.0, 80).unwrap();
    let frames: Vec<FrameDetections> = make_at(40)
        .into_iter()
        .map(|(i, ball)| FrameDetections::new(i, vec![ball]))
        .collect();
    let mut session = ShotSession::new(ShotDetectorConfig::default(), meta).unwrap();
    for i in 0..80 {
        let frame = frames
            .iter()
            .find(|f| f.frame_index == i)
            .cloned()
            .unwrap_or_else(|| FrameDetections::empty(i));
        assert_eq!(session.process_frame(&frame).unwrap(), None);
    }
    assert_eq!(session.phase(), ShotPhase::Idle);
}

#[test]
fn test_ball_going_up_only_stays_armed() {
    // Rises into the backboard zone and never comes down
    let balls = ball_flight(20, (300.0, 300.0), (300.0, 190.0));
    let mut session =
        ShotSession::new(ShotDetectorConfig::default(), VideoMeta::new(30.0, 60).unwrap()).unwrap();
    let mut source = stream(60, balls);
    while let Some(frame) = source.next_frame().unwrap() {
        assert_eq!(session.process_frame(&frame).unwrap(), None);
    }
    assert!(matches!(session.phase(), ShotPhase::AboveRim { .. }));
}
