//! Accepted ball/hoop observations.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Object class tracked by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ObjectClass {
    Ball,
    Hoop,
}

impl std::fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectClass::Ball => write!(f, "ball"),
            ObjectClass::Hoop => write!(f, "hoop"),
        }
    }
}

/// A point in image pixel coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One accepted detection (ball or hoop) for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Observation {
    /// Box center
    pub center: Point,
    /// Zero-based frame index the detection came from
    pub frame_index: u64,
    /// Box width in pixels
    pub width: f64,
    /// Box height in pixels
    pub height: f64,
    /// Detector confidence [0, 1]
    pub confidence: f64,
    /// Object class
    pub class: ObjectClass,
}

impl Observation {
    /// Create a new observation.
    pub fn new(
        class: ObjectClass,
        center: Point,
        frame_index: u64,
        width: f64,
        height: f64,
        confidence: f64,
    ) -> Self {
        Self {
            center,
            frame_index,
            width,
            height,
            confidence,
            class,
        }
    }

    /// Box diagonal, used as the object's apparent diameter.
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }

    /// Whether neither side exceeds the other by more than `max_ratio`.
    ///
    /// A ratio of 1.4 accepts boxes up to 40% off square.
    pub fn is_roughly_square(&self, max_ratio: f64) -> bool {
        !(self.width * max_ratio < self.height || self.height * max_ratio < self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(w: f64, h: f64) -> Observation {
        Observation::new(ObjectClass::Ball, Point::new(0.0, 0.0), 0, w, h, 0.9)
    }

    #[test]
    fn test_diagonal() {
        assert!((ball(3.0, 4.0).diagonal() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_squareness() {
        assert!(ball(20.0, 20.0).is_roughly_square(1.4));
        assert!(ball(20.0, 27.0).is_roughly_square(1.4));
        assert!(!ball(20.0, 28.5).is_roughly_square(1.4));
        assert!(!ball(30.0, 20.0).is_roughly_square(1.4));
        assert!(!ball(27.0, 20.0).is_roughly_square(1.3));
    }

    #[test]
    fn test_class_serialization() {
        let json = serde_json::to_string(&ObjectClass::Hoop).unwrap();
        assert_eq!(json, "\"hoop\"");
    }
}
