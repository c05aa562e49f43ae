//! Block and chunk coordinates.
//!
//! These are the canonical positions the placement engine reads and writes.

use serde::{Deserialize, Serialize};

use crate::constants::{CHUNK_SHIFT, CHUNK_SIZE};

/// Absolute block position in a world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    /// X coordinate
    pub x: i32,
    /// Y coordinate (height)
    pub y: i32,
    /// Z coordinate
    pub z: i32,
}

impl BlockPos {
    /// Creates a new block position.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns this position moved by the given offsets.
    #[inline]
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Position directly above.
    #[inline]
    #[must_use]
    pub const fn up(self) -> Self {
        self.offset(0, 1, 0)
    }

    /// Position directly below.
    #[inline]
    #[must_use]
    pub const fn down(self) -> Self {
        self.offset(0, -1, 0)
    }

    /// The six face-adjacent positions.
    #[must_use]
    pub const fn neighbours(self) -> [Self; 6] {
        [
            self.offset(1, 0, 0),
            self.offset(-1, 0, 0),
            self.offset(0, 1, 0),
            self.offset(0, -1, 0),
            self.offset(0, 0, 1),
            self.offset(0, 0, -1),
        ]
    }

    /// The chunk containing this position.
    #[inline]
    #[must_use]
    pub const fn chunk(self) -> ChunkPos {
        ChunkPos::from_block_pos(self.x, self.z)
    }
}

impl std::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Chunk coordinate (identifies a 16-wide column of blocks).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkPos {
    /// X coordinate (in chunks, not blocks).
    pub x: i32,
    /// Z coordinate (in chunks, not blocks).
    pub z: i32,
}

impl ChunkPos {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Converts world block coordinates to chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn from_block_pos(block_x: i32, block_z: i32) -> Self {
        Self {
            x: block_x >> CHUNK_SHIFT,
            z: block_z >> CHUNK_SHIFT,
        }
    }

    /// World X coordinate of the chunk's west edge.
    #[inline]
    #[must_use]
    pub const fn min_block_x(self) -> i32 {
        self.x * CHUNK_SIZE
    }

    /// World Z coordinate of the chunk's north edge.
    #[inline]
    #[must_use]
    pub const fn min_block_z(self) -> i32 {
        self.z * CHUNK_SIZE
    }

    /// World X coordinate of the chunk's east edge (inclusive).
    #[inline]
    #[must_use]
    pub const fn max_block_x(self) -> i32 {
        self.min_block_x() + CHUNK_SIZE - 1
    }

    /// World Z coordinate of the chunk's south edge (inclusive).
    #[inline]
    #[must_use]
    pub const fn max_block_z(self) -> i32 {
        self.min_block_z() + CHUNK_SIZE - 1
    }

    /// Returns true if the block column `(x, z)` lies in this chunk.
    #[inline]
    #[must_use]
    pub const fn contains(self, block_x: i32, block_z: i32) -> bool {
        (block_x >> CHUNK_SHIFT) == self.x && (block_z >> CHUNK_SHIFT) == self.z
    }

    /// Iterates the square of chunks within `radius` of this one, itself included.
    ///
    /// Order is row-major (z outer, x inner), west to east.
    pub fn square_around(self, radius: i32) -> impl Iterator<Item = Self> {
        (self.z - radius..=self.z + radius)
            .flat_map(move |z| (self.x - radius..=self.x + radius).map(move |x| Self::new(x, z)))
    }
}

impl std::fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}
