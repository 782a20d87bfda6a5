use crate::core::geo::Point;
use crate::core::zoom::zoom_level;
use crate::traits::ViewportProvider;
use serde::{Deserialize, Serialize};

/// Plain description of the current view: where it starts in the world, how
/// large it is on screen and how many world blocks one screen unit covers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// World block coordinate of the top-left corner
    pub offset: Point,
    /// Width of the view in screen units
    pub width: u32,
    /// Height of the view in screen units
    pub height: u32,
    /// World blocks per screen unit
    pub scale: f32,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(offset: Point, width: u32, height: u32, scale: f32) -> Self {
        Self {
            offset,
            width,
            height,
            scale,
        }
    }

    /// Moves the view by `delta` world blocks.
    pub fn pan(&mut self, delta: Point) {
        self.offset = self.offset + delta;
    }

    /// Sets the scale; non-positive or non-finite values are ignored.
    pub fn set_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        } else {
            log::warn!("ignoring invalid viewport scale {}", scale);
        }
    }

    /// Resizes the on-screen extent.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Cache tier matching the current scale.
    pub fn zoom_level(&self) -> u32 {
        zoom_level(self.scale)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Point::default(), 800, 600, 1.0)
    }
}

impl ViewportProvider for Viewport {
    fn offset(&self) -> Point {
        self.offset
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn scale(&self) -> f32 {
        self.scale
    }
}
