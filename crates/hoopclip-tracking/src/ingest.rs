//! Turns one frame's raw detections into typed observations.
//!
//! Ingestion is pure: it looks at the hoop history as it stood before this
//! frame and never touches tracker state.

use hoopclip_models::{DetectorClass, FrameDetections, ObjectClass, Observation, RawDetection};

use crate::config::ShotDetectorConfig;
use crate::zones::HoopZones;

/// Float noise allowance when rounding confidences up.
const CONFIDENCE_EPSILON: f64 = 1e-9;

/// Round a model confidence up to two decimals, as the detector reports it.
pub fn quantize_confidence(confidence: f64) -> f64 {
    ((confidence * 100.0) - CONFIDENCE_EPSILON).ceil() / 100.0
}

/// Ball and hoop candidates of a frame, most confident first.
///
/// Cleaning decides which one, if any, enters a history; a confident outlier
/// must not hide a plausible candidate behind it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameObservations {
    pub balls: Vec<Observation>,
    pub hoops: Vec<Observation>,
}

/// Every detection of the frame that passes its class threshold.
///
/// `hoop_zones` are the zones of the latest hoop before this frame; without
/// them only the base ball threshold applies.
pub fn candidates(
    frame: &FrameDetections,
    hoop_zones: Option<&HoopZones>,
    config: &ShotDetectorConfig,
) -> Vec<Observation> {
    frame
        .detections
        .iter()
        .filter_map(|det| classify(det, frame.frame_index, hoop_zones, config))
        .collect()
}

fn classify(
    det: &RawDetection,
    frame_index: u64,
    hoop_zones: Option<&HoopZones>,
    config: &ShotDetectorConfig,
) -> Option<Observation> {
    let width = det.width();
    let height = det.height();
    if !(width > 0.0 && height > 0.0) {
        return None;
    }

    let confidence = quantize_confidence(det.confidence);
    let center = det.center();

    let class = match det.class()? {
        DetectorClass::Basketball => {
            let near_hoop = hoop_zones.is_some_and(|z| z.in_hoop_region(center));
            let accepted = confidence > config.ball_confidence
                || (near_hoop && confidence > config.ball_near_hoop_confidence);
            accepted.then_some(ObjectClass::Ball)?
        }
        DetectorClass::BasketballHoop => {
            (confidence > config.hoop_confidence).then_some(ObjectClass::Hoop)?
        }
    };

    Some(Observation::new(
        class,
        center,
        frame_index,
        width,
        height,
        confidence,
    ))
}

impl FrameObservations {
    /// Split candidates by class, each ranked by descending confidence.
    pub fn rank(candidates: Vec<Observation>) -> Self {
        let (mut balls, mut hoops): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|o| o.class == ObjectClass::Ball);
        balls.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        hoops.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        Self { balls, hoops }
    }

    pub fn best_ball(&self) -> Option<&Observation> {
        self.balls.first()
    }

    pub fn best_hoop(&self) -> Option<&Observation> {
        self.hoops.first()
    }
}

/// Ingest a frame: threshold every detection, then rank per class.
pub fn ingest_frame(
    frame: &FrameDetections,
    hoop_zones: Option<&HoopZones>,
    config: &ShotDetectorConfig,
) -> FrameObservations {
    FrameObservations::rank(candidates(frame, hoop_zones, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoopclip_models::Point;

    const BALL: usize = 0;
    const HOOP: usize = 1;

    fn zones(config: &ShotDetectorConfig) -> HoopZones {
        let hoop = Observation::new(ObjectClass::Hoop, Point::new(320.0, 240.0), 0, 40.0, 30.0, 0.9);
        HoopZones::new(&hoop, config)
    }

    #[test]
    fn test_quantize_rounds_up() {
        assert_eq!(quantize_confidence(0.251), 0.26);
        assert_eq!(quantize_confidence(0.25), 0.25);
        assert_eq!(quantize_confidence(0.3), 0.3);
        assert_eq!(quantize_confidence(0.999), 1.0);
    }

    #[test]
    fn test_ball_threshold() {
        let config = ShotDetectorConfig::default();
        let frame = FrameDetections::new(
            3,
            vec![
                RawDetection::from_center(100.0, 100.0, 20.0, 20.0, 0.25, BALL),
                RawDetection::from_center(120.0, 100.0, 20.0, 20.0, 0.26, BALL),
            ],
        );

        let found = candidates(&frame, None, &config);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].class, ObjectClass::Ball);
        assert_eq!(found[0].frame_index, 3);
        assert_eq!(found[0].center, Point::new(120.0, 100.0));
    }

    #[test]
    fn test_relaxed_ball_threshold_near_hoop() {
        let config = ShotDetectorConfig::default();
        let z = zones(&config);
        let near = RawDetection::from_center(320.0, 230.0, 20.0, 20.0, 0.2, BALL);
        let far = RawDetection::from_center(100.0, 100.0, 20.0, 20.0, 0.2, BALL);
        let frame = FrameDetections::new(0, vec![near, far]);

        let found = candidates(&frame, Some(&z), &config);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].center, Point::new(320.0, 230.0));

        // Without a hoop there is no relaxed region
        assert!(candidates(&frame, None, &config).is_empty());
    }

    #[test]
    fn test_relaxed_threshold_has_a_floor() {
        let config = ShotDetectorConfig::default();
        let z = zones(&config);
        let frame = FrameDetections::new(
            0,
            vec![RawDetection::from_center(320.0, 230.0, 20.0, 20.0, 0.15, BALL)],
        );
        assert!(candidates(&frame, Some(&z), &config).is_empty());
    }

    #[test]
    fn test_hoop_threshold_and_unknown_classes() {
        let config = ShotDetectorConfig::default();
        let frame = FrameDetections::new(
            0,
            vec![
                RawDetection::from_center(320.0, 240.0, 40.0, 30.0, 0.30, HOOP),
                RawDetection::from_center(330.0, 240.0, 40.0, 30.0, 0.31, HOOP),
                RawDetection::from_center(50.0, 50.0, 20.0, 20.0, 0.99, 5),
            ],
        );

        let found = candidates(&frame, None, &config);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].class, ObjectClass::Hoop);
        assert_eq!(found[0].center.x, 330.0);
    }

    #[test]
    fn test_degenerate_boxes_are_dropped() {
        let config = ShotDetectorConfig::default();
        let frame = FrameDetections::new(
            0,
            vec![RawDetection::from_center(100.0, 100.0, 0.0, 20.0, 0.9, BALL)],
        );
        assert!(candidates(&frame, None, &config).is_empty());
    }

    #[test]
    fn test_ranks_candidates_per_class() {
        let config = ShotDetectorConfig::default();
        let frame = FrameDetections::new(
            7,
            vec![
                RawDetection::from_center(100.0, 100.0, 20.0, 20.0, 0.5, BALL),
                RawDetection::from_center(400.0, 100.0, 20.0, 20.0, 0.8, BALL),
                RawDetection::from_center(320.0, 240.0, 40.0, 34.0, 0.6, HOOP),
            ],
        );

        let ranked = ingest_frame(&frame, None, &config);
        let xs: Vec<f64> = ranked.balls.iter().map(|o| o.center.x).collect();
        assert_eq!(xs, vec![400.0, 100.0]);
        assert_eq!(ranked.best_ball().unwrap().center.x, 400.0);
        assert_eq!(ranked.hoops.len(), 1);
        assert_eq!(ranked.best_hoop().unwrap().confidence, 0.6);
    }
}
