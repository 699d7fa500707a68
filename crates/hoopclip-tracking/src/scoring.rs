//! Made/missed classification of a completed attempt.
//!
//! Scoring never fails: whenever the trajectory is too sparse or degenerate to
//! extrapolate, the attempt counts as missed.

use hoopclip_models::{Observation, Point};
use tracing::debug;

use crate::config::{ScoringMethod, ShotDetectorConfig};
use crate::trajectory::{Line, Parabola};
use crate::zones::HoopZones;

/// Outcome of scoring one attempt, with the geometry behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreReport {
    pub made: bool,
    pub method: ScoringMethod,
    /// Where the trajectory crosses the rim plane (line method)
    pub predicted_x: Option<f64>,
    /// Trajectory height at the hoop center (parabola method)
    pub predicted_y: Option<f64>,
    /// Rim opening, before the rebound buffer is applied
    pub rim_span: (f64, f64),
}

/// Classify an attempt from the ball trajectory and the latest hoop.
///
/// `ball` must be ordered oldest first, as held by the ball history.
pub fn score_attempt(
    ball: &[Observation],
    hoop: &Observation,
    config: &ShotDetectorConfig,
) -> ScoreReport {
    let zones = HoopZones::new(hoop, config);
    let report = match config.scoring_method {
        ScoringMethod::TwoPointLine => score_line(ball, &zones, config),
        ScoringMethod::Parabola => score_parabola(ball, &zones, config),
    };

    debug!(
        made = report.made,
        method = ?report.method,
        predicted_x = ?report.predicted_x,
        predicted_y = ?report.predicted_y,
        rim_left = report.rim_span.0,
        rim_right = report.rim_span.1,
        "Attempt scored"
    );
    report
}

/// Last point above the rim plane and the point retained right after it.
pub fn rim_crossing_pair(ball: &[Observation], rim_height: f64) -> Option<(Point, Point)> {
    let idx = ball.iter().rposition(|o| o.center.y < rim_height)?;
    let next = ball.get(idx + 1)?;
    Some((ball[idx].center, next.center))
}

fn score_line(ball: &[Observation], zones: &HoopZones, config: &ShotDetectorConfig) -> ScoreReport {
    let rim_height = zones.rim_height();
    let (rim_x1, rim_x2) = zones.rim_span();

    let predicted_x = rim_crossing_pair(ball, rim_height)
        .and_then(|(above, after)| Line::through(above, after))
        .and_then(|line| line.x_at(rim_height));

    let made = predicted_x.is_some_and(|x| {
        rim_x1 - config.rebound_buffer <= x && x <= rim_x2 + config.rebound_buffer
    });

    ScoreReport {
        made,
        method: ScoringMethod::TwoPointLine,
        predicted_x,
        predicted_y: None,
        rim_span: (rim_x1, rim_x2),
    }
}

fn score_parabola(
    ball: &[Observation],
    zones: &HoopZones,
    config: &ShotDetectorConfig,
) -> ScoreReport {
    let recent = &ball[ball.len().saturating_sub(config.parabola_points)..];
    let points: Vec<Point> = recent.iter().map(|o| o.center).collect();
    let hoop = zones.center();

    let predicted_y = Parabola::fit(&points)
        .map(|curve| curve.y_at(hoop.x))
        .filter(|y| y.is_finite());

    let made = predicted_y.is_some_and(|y| (y - hoop.y).abs() < config.parabola_tolerance);

    ScoreReport {
        made,
        method: ScoringMethod::Parabola,
        predicted_x: None,
        predicted_y,
        rim_span: zones.rim_span(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoopclip_models::ObjectClass;

    // Hoop at (320, 240), 40x30: rim plane y = 225, rim span [304, 336]
    fn hoop() -> Observation {
        Observation::new(ObjectClass::Hoop, Point::new(320.0, 240.0), 0, 40.0, 30.0, 0.9)
    }

    fn ball_path(points: &[(f64, f64)]) -> Vec<Observation> {
        points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                Observation::new(ObjectClass::Ball, Point::new(x, y), i as u64, 20.0, 20.0, 0.9)
            })
            .collect()
    }

    /// Two points straddling the rim plane whose line crosses it at `x`.
    fn crossing_at(x: f64) -> Vec<Observation> {
        ball_path(&[(x - 1.0, 215.0), (x + 1.0, 235.0)])
    }

    fn made(ball: &[Observation]) -> bool {
        score_attempt(ball, &hoop(), &ShotDetectorConfig::default()).made
    }

    #[test]
    fn test_prediction_through_rim_center() {
        let report = score_attempt(&crossing_at(320.0), &hoop(), &ShotDetectorConfig::default());
        assert!(report.made);
        assert_eq!(report.predicted_x, Some(320.0));
        assert_eq!(report.rim_span, (304.0, 336.0));
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert!(made(&crossing_at(304.0)));
        assert!(made(&crossing_at(294.0)));
        assert!(made(&crossing_at(346.0)));
    }

    #[test]
    fn test_just_outside_rebound_buffer() {
        assert!(!made(&crossing_at(293.5)));
        assert!(!made(&crossing_at(346.5)));
        assert!(!made(&crossing_at(200.0)));
    }

    #[test]
    fn test_rebound_buffer_is_configurable() {
        let config = ShotDetectorConfig::default().with_rebound_buffer(0.0);
        assert!(!score_attempt(&crossing_at(300.0), &hoop(), &config).made);
        assert!(score_attempt(&crossing_at(304.0), &hoop(), &config).made);
    }

    #[test]
    fn test_uses_latest_point_above_rim() {
        // An earlier arc crossed far left; the last descent goes through the rim
        let ball = ball_path(&[
            (100.0, 200.0),
            (110.0, 260.0),
            (319.0, 215.0),
            (321.0, 235.0),
            (322.0, 250.0),
        ]);
        let report = score_attempt(&ball, &hoop(), &ShotDetectorConfig::default());
        assert_eq!(report.predicted_x, Some(320.0));
        assert!(report.made);
    }

    #[test]
    fn test_no_point_above_rim_is_a_miss() {
        let ball = ball_path(&[(300.0, 230.0), (310.0, 250.0), (320.0, 270.0)]);
        let report = score_attempt(&ball, &hoop(), &ShotDetectorConfig::default());
        assert!(!report.made);
        assert_eq!(report.predicted_x, None);
    }

    #[test]
    fn test_degenerate_trajectories_are_misses() {
        // Newest point is above the rim: nothing after it
        assert!(!made(&ball_path(&[(300.0, 250.0), (320.0, 210.0)])));
        // Vertical drop: undefined slope
        assert!(!made(&ball_path(&[(320.0, 215.0), (320.0, 235.0)])));
        // No ball at all
        assert!(!made(&[]));
    }

    #[test]
    fn test_parabola_method() {
        let config = ShotDetectorConfig::default().with_scoring_method(ScoringMethod::Parabola);
        let arc: Vec<(f64, f64)> = (0..10)
            .map(|i| {
                let x = 200.0 + 12.0 * i as f64;
                (x, 0.01 * (x - 320.0).powi(2) + 230.0)
            })
            .collect();
        let report = score_attempt(&ball_path(&arc), &hoop(), &config);
        assert!(report.made);
        assert!((report.predicted_y.unwrap() - 230.0).abs() < 1e-6);

        let high: Vec<(f64, f64)> = arc.iter().map(|&(x, y)| (x, y - 60.0)).collect();
        assert!(!score_attempt(&ball_path(&high), &hoop(), &config).made);

        assert!(!score_attempt(&ball_path(&arc[..2]), &hoop(), &config).made);
    }
}
