//! Shared trait abstractions at the engine's boundaries.
//!
//! The engine never owns the viewer window; it only reads the view through
//! these traits, so any UI layer can drive it.

use crate::core::geo::Point;

/// Read access to whatever describes the visible part of the world.
pub trait ViewportProvider {
    /// World block coordinate of the top-left corner of the view.
    fn offset(&self) -> Point;

    /// Width of the view in screen units.
    fn width(&self) -> u32;

    /// Height of the view in screen units.
    fn height(&self) -> u32;

    /// World blocks per screen unit.
    fn scale(&self) -> f32;

    /// World block coordinate of the bottom-right corner of the view.
    ///
    /// Fractional blocks are floored, so the corner never rounds toward the
    /// origin for negative coordinates.
    fn bottom_right(&self) -> Point {
        let offset = self.offset();
        let scale = self.scale() as f64;
        Point::new(
            (offset.x as f64 + self.width() as f64 * scale).floor() as i32,
            (offset.z as f64 + self.height() as f64 * scale).floor() as i32,
        )
    }
}

impl<T: ViewportProvider + ?Sized> ViewportProvider for &T {
    fn offset(&self) -> Point {
        (**self).offset()
    }

    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn scale(&self) -> f32 {
        (**self).scale()
    }
}
