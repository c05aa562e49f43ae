//! Block states as seen by the placement engine.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A single block state.
///
/// The engine only needs equality and membership tests, so a state is a
/// pair of small integers handed out by the host's block registry: the
/// block id and the index of its property combination.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable, Serialize,
    Deserialize,
)]
#[repr(C)]
pub struct BlockState {
    /// Block type ID.
    pub id: u16,
    /// Property combination index (0 = default state).
    pub meta: u16,
}

impl BlockState {
    /// Air block (empty).
    pub const AIR: Self = Self { id: 0, meta: 0 };

    /// Creates the default state of a block.
    #[inline]
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self { id, meta: 0 }
    }

    /// Creates a block state with a property combination index.
    #[inline]
    #[must_use]
    pub const fn with_meta(id: u16, meta: u16) -> Self {
        Self { id, meta }
    }

    /// Returns true if this is an air block.
    #[inline]
    #[must_use]
    pub const fn is_air(self) -> bool {
        self.id == 0
    }
}
