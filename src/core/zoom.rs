//! Zoom bucketing for the on-disk tile cache.
//!
//! A continuous scale (world blocks per screen pixel) is snapped to a
//! power-of-two tier, so that one cached bitmap serves a contiguous range of
//! scales and the number of cache directories stays small.

use crate::core::constants::MAX_ZOOM_BUCKET;

/// Maps a scale factor to its cache tier.
///
/// Finds the smallest power of two `b` strictly greater than `scale` and
/// returns `ceil(b / 2)`. Scales that are not positive (or NaN) land in tier 1.
pub fn zoom_level(scale: f32) -> u32 {
    let mut b: u32 = 1;
    while b < MAX_ZOOM_BUCKET && (b as f32) <= scale {
        b <<= 1;
    }
    (b + 1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_level_table() {
        assert_eq!(zoom_level(1.0), 1);
        assert_eq!(zoom_level(3.0), 2);
        assert_eq!(zoom_level(5.0), 4);
        assert_eq!(zoom_level(8.0), 8);
    }

    #[test]
    fn test_zoom_level_boundaries() {
        assert_eq!(zoom_level(0.5), 1);
        assert_eq!(zoom_level(1.99), 1);
        assert_eq!(zoom_level(2.0), 2);
        assert_eq!(zoom_level(7.99), 4);
        assert_eq!(zoom_level(16.0), 16);
    }

    #[test]
    fn test_zoom_level_degenerate_scales() {
        assert_eq!(zoom_level(0.0), 1);
        assert_eq!(zoom_level(-3.0), 1);
        assert_eq!(zoom_level(f32::NAN), 1);
        assert_eq!(zoom_level(f32::INFINITY), MAX_ZOOM_BUCKET / 2);
    }
}
