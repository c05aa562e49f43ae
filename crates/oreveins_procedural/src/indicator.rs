//! Surface indicators: blocks placed at the surface above a vein so players
//! can find it.

use oreveins_shared::{BlockPos, BlockState};

use crate::error::InvalidReason;
use crate::seed::RandomSource;
use crate::weighted::WeightedList;
use crate::world::WorldView;

/// One indicator variant of a vein type.
#[derive(Clone, Debug, PartialEq)]
pub struct Indicator {
    /// Marker blocks to choose from.
    pub blocks: WeightedList<BlockState>,
    /// Ground states the marker may sit on. Empty accepts any ground.
    pub under: Vec<BlockState>,
    /// 1-in-`rarity` chance per surface column.
    pub rarity: u32,
    /// Furthest the surface may be above the vein origin.
    pub max_depth: i32,
    /// Look through plants when finding the ground.
    pub ignore_vegetation: bool,
    /// Look through water and lava when finding the ground.
    pub ignore_liquids: bool,
}

impl Indicator {
    /// Creates an indicator with rarity 10, depth 32, no ground filter.
    #[must_use]
    pub fn new(blocks: WeightedList<BlockState>) -> Self {
        Self {
            blocks,
            under: Vec::new(),
            rarity: 10,
            max_depth: 32,
            ignore_vegetation: true,
            ignore_liquids: false,
        }
    }

    /// Returns true if the indicator can ever place a block.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// # Errors
    ///
    /// Returns the first constraint the indicator fails.
    pub fn validate(&self) -> Result<(), InvalidReason> {
        if self.blocks.is_empty() {
            return Err(InvalidReason::IndicatorWithoutBlocks);
        }
        if self.rarity == 0 {
            return Err(InvalidReason::IndicatorZeroRarity);
        }
        if self.max_depth <= 0 {
            return Err(InvalidReason::IndicatorDepth(self.max_depth));
        }
        Ok(())
    }

    /// Finds the ground block of column `(x, z)`, scanning down from `top`.
    ///
    /// Air is always skipped; vegetation and liquids are skipped when the
    /// indicator says so. The host classifies states.
    pub fn find_ground<W, V, L>(
        &self,
        world: &W,
        x: i32,
        z: i32,
        top: i32,
        is_vegetation: V,
        is_liquid: L,
    ) -> Option<BlockPos>
    where
        W: WorldView + ?Sized,
        V: Fn(BlockState) -> bool,
        L: Fn(BlockState) -> bool,
    {
        (0..=top).rev().map(|y| BlockPos::new(x, y, z)).find(|&pos| {
            let state = world.block_state(pos);
            !(state.is_air()
                || (self.ignore_vegetation && is_vegetation(state))
                || (self.ignore_liquids && is_liquid(state)))
        })
    }

    /// Decides the marker for one surface column above `origin`.
    ///
    /// `ground` is the position and state of the block the marker would
    /// sit on. Depth and ground checks happen before the rarity roll, so a
    /// column that can never hold a marker consumes no draws.
    pub fn surface_state<R: RandomSource + ?Sized>(
        &self,
        ground: BlockPos,
        ground_state: BlockState,
        origin: BlockPos,
        rng: &mut R,
    ) -> Option<BlockState> {
        if ground.y - origin.y > self.max_depth {
            return None;
        }
        if !self.under.is_empty() && !self.under.contains(&ground_state) {
            return None;
        }
        if rng.next_int(self.rarity) != 0 {
            return None;
        }
        Some(*self.blocks.get(rng))
    }
}
