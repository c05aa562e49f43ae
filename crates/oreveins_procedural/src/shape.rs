//! # Vein Shape
//!
//! The footprint a vein instance occupies around its origin: a horizontal
//! disc of radius `horizontal_size * sqrt(size)` extruded `vertical_size`
//! blocks up and down. `size` is drawn per instance so veins of one type
//! still differ from each other.
//!
//! [`VeinShape::in_range`] runs once per candidate block and is the hot
//! path of placement: integer squares and one float multiply.

use serde::{Deserialize, Serialize};

use oreveins_shared::constants::CHUNK_SHIFT;

use crate::seed::RandomSource;

/// Horizontal and vertical extent of a vein type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VeinShape {
    horizontal_size: i32,
    vertical_size: i32,
}

impl VeinShape {
    /// Creates a shape. Sizes are validated by the owning vein type.
    #[inline]
    #[must_use]
    pub const fn new(horizontal_size: i32, vertical_size: i32) -> Self {
        Self {
            horizontal_size,
            vertical_size,
        }
    }

    /// Horizontal radius at size factor 1.
    #[inline]
    #[must_use]
    pub const fn horizontal_size(self) -> i32 {
        self.horizontal_size
    }

    /// Vertical half-height.
    #[inline]
    #[must_use]
    pub const fn vertical_size(self) -> i32 {
        self.vertical_size
    }

    /// Returns true if the column offset `(x_offset, z_offset)` from the
    /// origin lies inside an instance of the given size factor.
    ///
    /// `x² + z² < horizontal_size² * size`, symmetric in the sign of both
    /// offsets.
    #[inline]
    #[must_use]
    pub fn in_range(self, size: f32, x_offset: i32, z_offset: i32) -> bool {
        let distance_sq = i64::from(x_offset).pow(2) + i64::from(z_offset).pow(2);
        let radius_sq = i64::from(self.horizontal_size).pow(2);
        (distance_sq as f32) < radius_sq as f32 * size
    }

    /// Number of chunks in each direction whose veins can reach into a
    /// given chunk: `1 + floor(horizontal_size / 16)`.
    #[inline]
    #[must_use]
    pub const fn chunk_search_radius(self) -> i32 {
        1 + (self.horizontal_size >> CHUNK_SHIFT)
    }
}

/// Range `[min, max]` of the per-instance size factor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct SizeRange {
    /// Smallest factor.
    pub min: f32,
    /// Largest factor.
    pub max: f32,
}

impl SizeRange {
    /// Creates a size range.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if the range is usable: `0 < min <= max`.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.min > 0.0 && self.min <= self.max
    }

    /// Draws a size factor. One `next_float` per call.
    #[inline]
    pub fn draw<R: RandomSource + ?Sized>(self, rng: &mut R) -> f32 {
        self.min + rng.next_float() * (self.max - self.min)
    }
}

impl Default for SizeRange {
    fn default() -> Self {
        Self::new(0.7, 1.0)
    }
}

impl From<[f32; 2]> for SizeRange {
    fn from([min, max]: [f32; 2]) -> Self {
        Self::new(min, max)
    }
}

impl From<SizeRange> for [f32; 2] {
    fn from(range: SizeRange) -> Self {
        [range.min, range.max]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::WorldSeed;
    use oreveins_shared::MAX_VEIN_SIZE;

    #[test]
    fn test_in_range_sign_symmetry() {
        let shape = VeinShape::new(15, 8);
        for size in [0.7f32, 0.85, 1.0] {
            for x in -20..=20 {
                for z in -20..=20 {
                    let base = shape.in_range(size, x, z);
                    assert_eq!(base, shape.in_range(size, -x, -z));
                    assert_eq!(base, shape.in_range(size, x, -z));
                    assert_eq!(base, shape.in_range(size, -x, z));
                }
            }
        }
    }

    #[test]
    fn test_in_range_boundary() {
        let shape = VeinShape::new(10, 4);
        assert!(shape.in_range(1.0, 0, 0));
        assert!(shape.in_range(1.0, 9, 0));
        // 100 < 100 is false: the rim is excluded
        assert!(!shape.in_range(1.0, 10, 0));
        assert!(shape.in_range(1.0, 6, 7));
        assert!(!shape.in_range(1.0, 7, 8));
        // Smaller instance, smaller disc
        assert!(!shape.in_range(0.5, 8, 0));
    }

    #[test]
    fn test_in_range_large_extents() {
        // Squares past i32::MAX stay exact in i64
        let wide = VeinShape::new(46_341, 8);
        assert!(wide.in_range(1.0, 0, 0));
        assert!(wide.in_range(1.0, 46_340, 0));
        assert!(!wide.in_range(1.0, 46_341, 0));
        assert!(!VeinShape::new(15, 8).in_range(1.0, i32::MAX, i32::MIN));

        let largest = VeinShape::new(MAX_VEIN_SIZE, MAX_VEIN_SIZE);
        assert!(largest.in_range(1.0, MAX_VEIN_SIZE - 1, 0));
        assert!(!largest.in_range(1.0, MAX_VEIN_SIZE, 1));
        assert_eq!(largest.chunk_search_radius(), 17);
    }

    #[test]
    fn test_chunk_search_radius() {
        assert_eq!(VeinShape::new(1, 1).chunk_search_radius(), 1);
        assert_eq!(VeinShape::new(15, 8).chunk_search_radius(), 1);
        assert_eq!(VeinShape::new(16, 8).chunk_search_radius(), 2);
        assert_eq!(VeinShape::new(40, 8).chunk_search_radius(), 3);
    }

    #[test]
    fn test_size_draws_stay_in_range() {
        let range = SizeRange::default();
        let mut rng = WorldSeed::new(3).rng();
        for _ in 0..10_000 {
            let size = range.draw(&mut rng);
            assert!((0.7..=1.0).contains(&size), "size {size} out of range");
        }
        assert!(range.is_valid());
        assert!(!SizeRange::new(0.0, 1.0).is_valid());
        assert!(!SizeRange::new(1.0, 0.5).is_valid());
    }
}
