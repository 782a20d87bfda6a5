use crate::core::constants::REGION_SIZE_IN_BLOCKS;
use crate::core::geo::Point;
use crate::traits::ViewportProvider;

/// Region-granular viewport culling.
///
/// Visibility is decided per whole region: a tile counts as visible when the
/// block origin of its region falls inside the region-aligned bounds of the
/// view, padded by `threshold` regions on every side. There is no partial
/// tile culling, which keeps redraw boundaries stable while panning.
pub struct Culling;

/// Inclusive, region-aligned block bounds of a padded view.
///
/// Kept in `i64` so that far-off regions and large paddings compare exactly
/// instead of overflowing the `i32` block range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewBounds {
    pub min_x: i64,
    pub min_z: i64,
    pub max_x: i64,
    pub max_z: i64,
}

impl ViewBounds {
    /// Whether the block origin of the region at `location` lies inside.
    pub fn contains_region(&self, location: Point) -> bool {
        let (x, z) = location.region_to_block_wide();
        x >= self.min_x && z >= self.min_z && x <= self.max_x && z <= self.max_z
    }
}

fn align_to_region(block: i64) -> i64 {
    let size = REGION_SIZE_IN_BLOCKS as i64;
    block.div_euclid(size) * size
}

fn clamp_to_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

impl Culling {
    /// Block-space bounds of the view padded by `threshold` regions, both
    /// corners aligned to region origins.
    pub fn visible_bounds(viewport: &impl ViewportProvider, threshold: i32) -> ViewBounds {
        let padding = threshold as i64 * REGION_SIZE_IN_BLOCKS as i64;
        let offset = viewport.offset();
        let scale = viewport.scale() as f64;
        let right = (offset.x as f64 + viewport.width() as f64 * scale).floor() as i64;
        let bottom = (offset.z as f64 + viewport.height() as f64 * scale).floor() as i64;

        ViewBounds {
            min_x: align_to_region(offset.x as i64 - padding),
            min_z: align_to_region(offset.z as i64 - padding),
            max_x: align_to_region(right.saturating_add(padding)),
            max_z: align_to_region(bottom.saturating_add(padding)),
        }
    }

    /// Inclusive range of region coordinates `(first, last)` that pass
    /// [`Culling::is_visible`], clamped to the representable regions.
    pub fn visible_range(viewport: &impl ViewportProvider, threshold: i32) -> (Point, Point) {
        let bounds = Self::visible_bounds(viewport, threshold);
        let size = REGION_SIZE_IN_BLOCKS as i64;
        let region = |block: i64| clamp_to_i32(block.div_euclid(size));
        (
            Point::new(region(bounds.min_x), region(bounds.min_z)),
            Point::new(region(bounds.max_x), region(bounds.max_z)),
        )
    }

    /// Returns `true` if the region at `location` is on screen, padded by
    /// `threshold` regions.
    pub fn is_visible(location: Point, viewport: &impl ViewportProvider, threshold: i32) -> bool {
        Self::visible_bounds(viewport, threshold).contains_region(location)
    }

    /// Every region location that passes [`Culling::is_visible`], row by row.
    pub fn visible_regions(
        viewport: &impl ViewportProvider,
        threshold: i32,
    ) -> impl Iterator<Item = Point> {
        let (first, last) = Self::visible_range(viewport, threshold);
        (first.z..=last.z).flat_map(move |z| (first.x..=last.x).map(move |x| Point::new(x, z)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::viewport::Viewport;

    fn viewport() -> Viewport {
        // Covers blocks 0..=1000 on both axes: regions 0 and 1.
        Viewport::new(Point::new(0, 0), 500, 500, 2.0)
    }

    #[test]
    fn test_top_left_region_visible() {
        assert!(Culling::is_visible(Point::new(0, 0), &viewport(), 0));
        assert!(Culling::is_visible(Point::new(1, 1), &viewport(), 0));
        assert!(!Culling::is_visible(Point::new(-1, 0), &viewport(), 0));
    }

    #[test]
    fn test_threshold_pads_in_regions() {
        let vp = viewport();
        let far = Point::new(-2, 0);
        assert!(!Culling::is_visible(far, &vp, 0));
        assert!(!Culling::is_visible(far, &vp, 1));
        assert!(Culling::is_visible(far, &vp, 2));
        assert!(Culling::is_visible(Point::new(3, 3), &vp, 2));
    }

    #[test]
    fn test_region_containing_offset_is_visible() {
        let vp = Viewport::new(Point::new(-700, 1300), 10, 10, 1.0);
        assert!(Culling::is_visible(Point::new(-2, 2), &vp, 0));
        assert!(!Culling::is_visible(Point::new(-1, 2), &vp, 0));
    }

    #[test]
    fn test_visible_regions_match_is_visible() {
        let vp = Viewport::new(Point::new(-600, 300), 300, 200, 3.0);
        for threshold in 0..3 {
            let regions: Vec<Point> = Culling::visible_regions(&vp, threshold).collect();
            assert!(regions.iter().all(|r| Culling::is_visible(*r, &vp, threshold)));

            let (first, last) = Culling::visible_range(&vp, threshold);
            let expected = ((last.x - first.x + 1) * (last.z - first.z + 1)) as usize;
            assert_eq!(regions.len(), expected);

            let outside = [
                Point::new(first.x - 1, first.z),
                Point::new(last.x + 1, last.z),
                Point::new(first.x, first.z - 1),
                Point::new(last.x, last.z + 1),
            ];
            assert!(outside.iter().all(|r| !Culling::is_visible(*r, &vp, threshold)));
        }
    }

    #[test]
    fn test_far_off_regions_do_not_overflow() {
        let vp = Viewport::default();
        assert!(!Culling::is_visible(Point::new(5_000_000, 0), &vp, 0));
        assert!(!Culling::is_visible(Point::new(i32::MIN, i32::MAX), &vp, 0));

        let far = Viewport::new(Point::new(i32::MAX - 100, i32::MIN), 800, 600, 64.0);
        assert!(Culling::is_visible(Point::new(4_194_303, -4_194_304), &far, 0));
        assert!(!Culling::is_visible(Point::new(0, 0), &far, 0));
    }

    #[test]
    fn test_huge_threshold() {
        let vp = Viewport::default();
        assert!(Culling::is_visible(Point::new(0, 0), &vp, 5_000_000));
        assert!(Culling::is_visible(Point::new(-4_999_999, 4_999_999), &vp, 5_000_000));
        assert!(Culling::is_visible(Point::new(i32::MAX, -i32::MAX), &vp, i32::MAX));
        assert!(!Culling::is_visible(Point::new(0, i32::MIN), &vp, i32::MAX));

        let (first, last) = Culling::visible_range(&vp, i32::MAX);
        assert_eq!(first, Point::new(-i32::MAX, -i32::MAX));
        assert_eq!(last, Point::new(i32::MAX, i32::MAX));
    }
}
