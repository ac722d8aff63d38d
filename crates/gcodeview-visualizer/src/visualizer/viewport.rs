//! Machine-to-screen transform and extents.

use gcodeview_core::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_SCALE};
use gcodeview_core::Position;
use serde::{Deserialize, Serialize};

/// A point in screen space (pixels, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Scale plus offset, with the y axis flipped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for RenderTransform {
    fn default() -> Self {
        Self::centered(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT, DEFAULT_SCALE)
    }
}

impl RenderTransform {
    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    /// Put the machine origin at the centre of a `width` x `height` canvas.
    pub fn centered(width: f64, height: f64, scale: f64) -> Self {
        Self::new(scale, width / 2.0, height / 2.0)
    }

    #[inline]
    pub fn to_screen(&self, position: Position) -> ScreenPoint {
        ScreenPoint {
            x: position.x * self.scale + self.offset_x,
            y: -position.y * self.scale + self.offset_y,
        }
    }

    /// Inverse of [`to_screen`](Self::to_screen) on the XY plane.
    pub fn to_machine(&self, point: ScreenPoint) -> (f64, f64) {
        (
            (point.x - self.offset_x) / self.scale,
            -(point.y - self.offset_y) / self.scale,
        )
    }
}

/// Machine-space extents of the tracked nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    pub fn new() -> Self {
        Self {
            min_x: f64::MAX,
            max_x: f64::MIN,
            min_y: f64::MAX,
            max_y: f64::MIN,
            min_z: f64::MAX,
            max_z: f64::MIN,
        }
    }

    /// Non-finite positions are ignored.
    pub fn update(&mut self, position: Position) {
        if !position.is_finite() {
            return;
        }
        self.min_x = self.min_x.min(position.x);
        self.max_x = self.max_x.max(position.x);
        self.min_y = self.min_y.min(position.y);
        self.max_y = self.max_y.max(position.y);
        self.min_z = self.min_z.min(position.z);
        self.max_z = self.max_z.max(position.z);
    }

    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y && self.min_z <= self.max_z
    }
}
