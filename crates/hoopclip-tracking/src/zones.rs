//! Geometric zones around the current hoop position.
//!
//! All zones are derived from the most recent hoop observation and expressed
//! in multiples of the hoop box size, so they scale with camera distance.
//! Image y grows downward: "above" the rim means a smaller y.

use hoopclip_models::{Observation, Point};

use crate::config::ShotDetectorConfig;

/// Zones around one hoop observation.
#[derive(Debug, Clone, Copy)]
pub struct HoopZones {
    center: Point,
    width: f64,
    height: f64,
    region_half_width: f64,
    region_above: f64,
    region_below: f64,
    backboard_half_width: f64,
    backboard_top: f64,
    backboard_bottom: f64,
    below_rim_offset: f64,
    rim_half_width: f64,
}

impl HoopZones {
    pub fn new(hoop: &Observation, config: &ShotDetectorConfig) -> Self {
        Self {
            center: hoop.center,
            width: hoop.width,
            height: hoop.height,
            region_half_width: config.hoop_region_half_width,
            region_above: config.hoop_region_above,
            region_below: config.hoop_region_below,
            backboard_half_width: config.backboard_half_width,
            backboard_top: config.backboard_top,
            backboard_bottom: config.backboard_bottom,
            below_rim_offset: config.below_rim_offset,
            rim_half_width: config.rim_half_width,
        }
    }

    /// Hoop center this zone set was built from.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Close to the hoop, where occlusion and blur lower detector confidence.
    pub fn in_hoop_region(&self, p: Point) -> bool {
        let x1 = self.center.x - self.region_half_width * self.width;
        let x2 = self.center.x + self.region_half_width * self.width;
        let y1 = self.center.y - self.region_above * self.height;
        let y2 = self.center.y + self.region_below * self.height;

        x1 < p.x && p.x < x2 && y1 < p.y && p.y < y2
    }

    /// Around the backboard, above the rim: the ball is on its way in.
    pub fn in_backboard_zone(&self, p: Point) -> bool {
        let x1 = self.center.x - self.backboard_half_width * self.width;
        let x2 = self.center.x + self.backboard_half_width * self.width;
        let y1 = self.center.y - self.backboard_top * self.height;
        let y2 = self.center.y - self.backboard_bottom * self.height;

        x1 < p.x && p.x < x2 && y1 < p.y && p.y < y2
    }

    /// Below the rim plane: the ball has come down through or past the hoop.
    pub fn is_below_rim(&self, p: Point) -> bool {
        p.y > self.center.y + self.below_rim_offset * self.height
    }

    /// Y of the rim plane (top edge of the hoop box).
    pub fn rim_height(&self) -> f64 {
        self.center.y - 0.5 * self.height
    }

    /// Horizontal span of the rim opening.
    pub fn rim_span(&self) -> (f64, f64) {
        let half = self.rim_half_width * self.width;
        (self.center.x - half, self.center.x + half)
    }
}
