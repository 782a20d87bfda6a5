use crate::core::constants::{CHUNK_SIZE_IN_BLOCKS, REGION_SIZE_IN_BLOCKS, REGION_SIZE_IN_CHUNKS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Integer location in block, chunk or region units.
///
/// The unit is implied by context; the conversion methods name both ends
/// (`block_to_region`, `region_to_chunk`, ...). Conversions to a coarser unit
/// floor toward negative infinity, so `(-1, -1)` in blocks lies in region
/// `(-1, -1)`, not `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub z: i32,
}

impl Point {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub const fn offset_by(&self, other: &Point) -> Point {
        Point::new(self.x.saturating_add(other.x), self.z.saturating_add(other.z))
    }

    pub const fn difference(&self, other: &Point) -> Point {
        Point::new(self.x.saturating_sub(other.x), self.z.saturating_sub(other.z))
    }

    pub const fn add_scalar(&self, value: i32) -> Point {
        Point::new(self.x.saturating_add(value), self.z.saturating_add(value))
    }

    pub const fn subtract_scalar(&self, value: i32) -> Point {
        Point::new(self.x.saturating_sub(value), self.z.saturating_sub(value))
    }

    /// Multiplies both axes, saturating at the `i32` range.
    pub const fn scaled(&self, factor: i32) -> Point {
        Point::new(self.x.saturating_mul(factor), self.z.saturating_mul(factor))
    }

    /// Divides both axes by `size`, rounding toward negative infinity.
    pub const fn floor_div(&self, size: i32) -> Point {
        Point::new(self.x.div_euclid(size), self.z.div_euclid(size))
    }

    /// Rounds both axes down to the nearest multiple of `size`.
    pub const fn align_down(&self, size: i32) -> Point {
        self.floor_div(size).scaled(size)
    }

    pub const fn block_to_region(&self) -> Point {
        self.floor_div(REGION_SIZE_IN_BLOCKS)
    }

    /// Block origin of the region at this location. Regions whose origin lies
    /// outside the `i32` range saturate; use [`Point::region_to_block_wide`]
    /// when exact values are needed.
    pub const fn region_to_block(&self) -> Point {
        self.scaled(REGION_SIZE_IN_BLOCKS)
    }

    /// Exact block origin of the region at this location.
    pub const fn region_to_block_wide(&self) -> (i64, i64) {
        (
            self.x as i64 * REGION_SIZE_IN_BLOCKS as i64,
            self.z as i64 * REGION_SIZE_IN_BLOCKS as i64,
        )
    }

    pub const fn block_to_chunk(&self) -> Point {
        self.floor_div(CHUNK_SIZE_IN_BLOCKS)
    }

    pub const fn chunk_to_block(&self) -> Point {
        self.scaled(CHUNK_SIZE_IN_BLOCKS)
    }

    pub const fn chunk_to_region(&self) -> Point {
        self.floor_div(REGION_SIZE_IN_CHUNKS)
    }

    /// First (top-left) chunk of the region at this location.
    pub const fn region_to_chunk(&self) -> Point {
        self.scaled(REGION_SIZE_IN_CHUNKS)
    }

    /// Iterates over every chunk of the region at this location, row by row.
    pub fn region_chunks(&self) -> impl Iterator<Item = Point> {
        let origin = self.region_to_chunk();
        (0..REGION_SIZE_IN_CHUNKS).flat_map(move |x| {
            (0..REGION_SIZE_IN_CHUNKS).map(move |z| origin + Point::new(x, z))
        })
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        self.offset_by(&rhs)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        self.difference(&rhs)
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, rhs: i32) -> Point {
        self.scaled(rhs)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, z): (i32, i32)) -> Self {
        Self::new(x, z)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}
