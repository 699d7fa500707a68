//! Raw detector output as handed over by the object-detection model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::observation::Point;

/// Label order of the basketball detection model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DetectorClass {
    Basketball,
    BasketballHoop,
}

impl DetectorClass {
    /// Map a model class index to a known class.
    pub fn from_index(class_id: usize) -> Option<Self> {
        match class_id {
            0 => Some(DetectorClass::Basketball),
            1 => Some(DetectorClass::BasketballHoop),
            _ => None,
        }
    }
}

/// One bounding box from the detection model, in pixel corner coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawDetection {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Model confidence [0, 1]
    pub confidence: f64,
    /// Model class index
    pub class_id: usize,
}

impl RawDetection {
    /// Create a detection from its center and size.
    pub fn from_center(
        cx: f64,
        cy: f64,
        width: f64,
        height: f64,
        confidence: f64,
        class_id: usize,
    ) -> Self {
        Self {
            x1: cx - width / 2.0,
            y1: cy - height / 2.0,
            x2: cx + width / 2.0,
            y2: cy + height / 2.0,
            confidence,
            class_id,
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.x1 + self.width() / 2.0,
            self.y1 + self.height() / 2.0,
        )
    }

    pub fn class(&self) -> Option<DetectorClass> {
        DetectorClass::from_index(self.class_id)
    }
}

/// All detections for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FrameDetections {
    /// Zero-based frame index
    pub frame_index: u64,
    /// Boxes reported for this frame
    #[serde(default)]
    pub detections: Vec<RawDetection>,
}

impl FrameDetections {
    pub fn new(frame_index: u64, detections: Vec<RawDetection>) -> Self {
        Self {
            frame_index,
            detections,
        }
    }

    /// A frame in which the model found nothing.
    pub fn empty(frame_index: u64) -> Self {
        Self::new(frame_index, Vec::new())
    }
}
