//! # Placement Rules
//!
//! Extra conditions a candidate position must meet on top of the stone
//! check. A vein type carries a [`RuleChain`]; a position passes if every
//! rule passes.
//!
//! Rules only read the world, so evaluating them in any order or from any
//! thread gives the same answer.

use oreveins_shared::{BlockPos, BlockState};

use crate::error::InvalidReason;
use crate::noise::SimplexNoise;
use crate::world::WorldView;

/// Y band the position must lie in, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepthRule {
    /// Lowest allowed Y.
    pub min_y: i32,
    /// Highest allowed Y.
    pub max_y: i32,
}

/// Number of face neighbours whose state is in `blocks` must lie in
/// `min..=max`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TouchingRule {
    /// States that count as touching.
    pub blocks: Vec<BlockState>,
    /// Minimum matching neighbours.
    pub min: u32,
    /// Maximum matching neighbours.
    pub max: u32,
}

impl TouchingRule {
    fn touching<W: WorldView + ?Sized>(&self, world: &W, pos: BlockPos) -> u32 {
        pos.neighbours()
            .into_iter()
            .filter(|&n| self.blocks.contains(&world.block_state(n)))
            .count() as u32
    }
}

/// Column mask from a 2D noise field: passes where the field at
/// `(x * scale, z * scale)` is above `threshold`.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseRule {
    /// The field.
    pub noise: SimplexNoise,
    /// Frequency in blocks⁻¹.
    pub scale: f64,
    /// Cutoff in `[-1, 1]`.
    pub threshold: f64,
    /// Fractal layers (1 = plain simplex).
    pub octaves: u32,
}

impl NoiseRule {
    const PERSISTENCE: f64 = 0.5;
    const LACUNARITY: f64 = 2.0;

    fn value(&self, pos: BlockPos) -> f64 {
        let x = f64::from(pos.x) * self.scale;
        let z = f64::from(pos.z) * self.scale;
        if self.octaves <= 1 {
            self.noise.sample(x, z)
        } else {
            self.noise.octaved(x, z, self.octaves, Self::PERSISTENCE, Self::LACUNARITY)
        }
    }
}

/// One placement rule.
#[derive(Clone, Debug, PartialEq)]
pub enum Rule {
    /// See [`DepthRule`].
    Depth(DepthRule),
    /// See [`TouchingRule`].
    Touching(TouchingRule),
    /// See [`NoiseRule`].
    Noise(NoiseRule),
}

impl Rule {
    /// Tests the rule at `pos`.
    #[must_use]
    pub fn test<W: WorldView + ?Sized>(&self, world: &W, pos: BlockPos) -> bool {
        match self {
            Self::Depth(rule) => (rule.min_y..=rule.max_y).contains(&pos.y),
            Self::Touching(rule) => (rule.min..=rule.max).contains(&rule.touching(world, pos)),
            Self::Noise(rule) => rule.value(pos) > rule.threshold,
        }
    }

    /// Checks the rule's own parameters.
    ///
    /// # Errors
    ///
    /// Returns the reason the rule can never be satisfied or is nonsensical.
    pub fn validate(&self) -> Result<(), InvalidReason> {
        match self {
            Self::Depth(rule) if rule.min_y > rule.max_y => Err(InvalidReason::InvertedDepthRule {
                min_y: rule.min_y,
                max_y: rule.max_y,
            }),
            Self::Touching(rule) if rule.blocks.is_empty() => Err(InvalidReason::TouchingWithoutBlocks),
            Self::Touching(rule) if rule.min > rule.max || rule.min > 6 => {
                Err(InvalidReason::UnsatisfiableTouching {
                    min: rule.min,
                    max: rule.max,
                })
            }
            Self::Noise(rule) if rule.scale.is_nan() || rule.scale <= 0.0 => Err(InvalidReason::NoiseScale(rule.scale)),
            _ => Ok(()),
        }
    }
}

/// Rules that must all pass. An empty chain passes everywhere.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleChain {
    rules: Vec<Rule>,
}

impl RuleChain {
    /// Creates a chain.
    #[must_use]
    pub const fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Returns true if every rule passes, stopping at the first failure.
    #[inline]
    #[must_use]
    pub fn test<W: WorldView + ?Sized>(&self, world: &W, pos: BlockPos) -> bool {
        self.rules.iter().all(|rule| rule.test(world, pos))
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rules in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }
}

impl FromIterator<Rule> for RuleChain {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
