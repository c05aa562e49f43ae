//! # Vein Types
//!
//! A [`VeinType`] is the immutable description of one kind of vein: which
//! stone it replaces, which ores it places, where and how often it spawns.
//! Built once at load time, then only read.
//!
//! ## Origin Selection
//!
//! ```text
//! avoid_vein_cutoffs = false:   y in [min_y, max_y)
//! avoid_vein_cutoffs = true:
//!     2 * vertical_size < span:  y in [min_y + v, max_y - v)
//!     otherwise:                 y = min_y + span / 2
//! ```
//!
//! Draw order is always x, y, z, one `next_int` each.

use oreveins_shared::{Biome, BlockPos, BlockState, ChunkPos, CHUNK_SIZE, MAX_VEIN_SIZE, MAX_VEIN_Y};

use crate::config::GenerationConfig;
use crate::error::InvalidReason;
use crate::indicator::Indicator;
use crate::palette::BlockStateParser;
use crate::rule::RuleChain;
use crate::seed::RandomSource;
use crate::shape::VeinShape;
use crate::weighted::WeightedList;
use crate::world::WorldView;

/// A name filter with whitelist or blacklist semantics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameFilter {
    /// Names (or tags) in the filter.
    pub entries: Vec<String>,
    /// Membership passes if true, fails if false.
    pub whitelist: bool,
}

impl NameFilter {
    /// Applies the whitelist/blacklist inversion to a membership result.
    #[inline]
    #[must_use]
    pub fn passes(&self, member: bool) -> bool {
        member == self.whitelist
    }
}

/// Configuration and placement behaviour of one vein type.
#[derive(Clone, Debug, PartialEq)]
pub struct VeinType {
    pub(crate) count: u32,
    pub(crate) rarity: u32,
    pub(crate) min_y: i32,
    pub(crate) max_y: i32,
    pub(crate) shape: VeinShape,
    pub(crate) density: f32,
    pub(crate) stone: Vec<BlockState>,
    pub(crate) ore: WeightedList<BlockState>,
    pub(crate) biomes: Option<NameFilter>,
    pub(crate) dimensions: Option<NameFilter>,
    pub(crate) rules: RuleChain,
    pub(crate) indicator: Option<WeightedList<Indicator>>,
}

impl VeinType {
    /// Creates a vein type with the default numbers:
    /// count 1, rarity 10, Y 16..64, size 15 / 8, density 20.
    #[must_use]
    pub fn new(stone: Vec<BlockState>, ore: WeightedList<BlockState>) -> Self {
        Self {
            count: 1,
            rarity: 10,
            min_y: 16,
            max_y: 64,
            shape: VeinShape::new(15, 8),
            density: 20.0,
            stone,
            ore,
            biomes: None,
            dimensions: None,
            rules: RuleChain::default(),
            indicator: None,
        }
    }

    /// Sets the number of instances per successful rarity roll.
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Sets the 1-in-`rarity` spawn chance per chunk.
    #[must_use]
    pub fn with_rarity(mut self, rarity: u32) -> Self {
        self.rarity = rarity;
        self
    }

    /// Sets the origin Y range `[min_y, max_y)`.
    #[must_use]
    pub fn with_y_range(mut self, min_y: i32, max_y: i32) -> Self {
        self.min_y = min_y;
        self.max_y = max_y;
        self
    }

    /// Sets horizontal radius and vertical half-height.
    #[must_use]
    pub fn with_size(mut self, horizontal: i32, vertical: i32) -> Self {
        self.shape = VeinShape::new(horizontal, vertical);
        self
    }

    /// Sets the percent chance per candidate block.
    #[must_use]
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    /// Restricts the biomes the origin may lie in.
    #[must_use]
    pub fn with_biomes(mut self, entries: Vec<String>, whitelist: bool) -> Self {
        self.biomes = Some(NameFilter { entries, whitelist });
        self
    }

    /// Restricts the dimensions the vein generates in.
    #[must_use]
    pub fn with_dimensions(mut self, entries: Vec<String>, whitelist: bool) -> Self {
        self.dimensions = Some(NameFilter { entries, whitelist });
        self
    }

    /// Sets the extra placement rules.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleChain) -> Self {
        self.rules = rules;
        self
    }

    /// Sets the surface indicators.
    #[must_use]
    pub fn with_indicator(mut self, indicator: WeightedList<Indicator>) -> Self {
        self.indicator = Some(indicator);
        self
    }

    /// Instances per successful rarity roll.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Spawn chance denominator.
    #[must_use]
    pub const fn rarity(&self) -> u32 {
        self.rarity
    }

    /// Lowest origin Y.
    #[must_use]
    pub const fn min_y(&self) -> i32 {
        self.min_y
    }

    /// Origin Y upper bound (exclusive).
    #[must_use]
    pub const fn max_y(&self) -> i32 {
        self.max_y
    }

    /// Footprint.
    #[must_use]
    pub const fn shape(&self) -> VeinShape {
        self.shape
    }

    /// Percent chance per candidate block.
    #[must_use]
    pub const fn density(&self) -> f32 {
        self.density
    }

    /// States the vein may replace.
    #[must_use]
    pub fn stone(&self) -> &[BlockState] {
        &self.stone
    }

    /// Every ore state the vein can place.
    pub fn ore_states(&self) -> impl Iterator<Item = &BlockState> {
        self.ore.values()
    }

    /// Extra placement rules.
    #[must_use]
    pub const fn rules(&self) -> &RuleChain {
        &self.rules
    }

    /// Returns true if the vein type can be registered.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Checks every bound.
    ///
    /// Sizes are capped at [`MAX_VEIN_SIZE`] and `max_y` at [`MAX_VEIN_Y`],
    /// so placement arithmetic on a valid vein type never overflows.
    ///
    /// # Errors
    ///
    /// Returns the first constraint that fails.
    pub fn validate(&self) -> Result<(), InvalidReason> {
        if self.ore.is_empty() {
            return Err(InvalidReason::EmptyOre);
        }
        if self.stone.is_empty() {
            return Err(InvalidReason::EmptyStone);
        }
        if let Some(indicator) = &self.indicator {
            if indicator.is_empty() {
                return Err(InvalidReason::EmptyIndicatorList);
            }
            for variant in indicator.values() {
                variant.validate()?;
            }
        }
        if self.min_y < 0 {
            return Err(InvalidReason::NegativeMinY(self.min_y));
        }
        if self.max_y <= self.min_y {
            return Err(InvalidReason::EmptyYRange {
                min_y: self.min_y,
                max_y: self.max_y,
            });
        }
        if self.max_y > MAX_VEIN_Y {
            return Err(InvalidReason::YTooHigh {
                max_y: self.max_y,
                limit: MAX_VEIN_Y,
            });
        }
        if self.count == 0 {
            return Err(InvalidReason::ZeroCount);
        }
        if self.rarity == 0 {
            return Err(InvalidReason::ZeroRarity);
        }
        let sizes = 1..=MAX_VEIN_SIZE;
        if !sizes.contains(&self.shape.horizontal_size()) || !sizes.contains(&self.shape.vertical_size()) {
            return Err(InvalidReason::SizeOutOfRange {
                horizontal: self.shape.horizontal_size(),
                vertical: self.shape.vertical_size(),
                limit: MAX_VEIN_SIZE,
            });
        }
        if self.density.is_nan() || self.density <= 0.0 {
            return Err(InvalidReason::NonPositiveDensity(self.density));
        }
        self.rules.iter().try_for_each(crate::rule::Rule::validate)
    }

    /// Returns true if the vein generates in `dimension`.
    ///
    /// Without a filter only the configured default dimension matches.
    #[must_use]
    pub fn matches_dimension(&self, dimension: &str, config: &GenerationConfig) -> bool {
        match &self.dimensions {
            None => dimension == config.default_dimension,
            Some(filter) => filter.passes(filter.entries.iter().any(|d| d == dimension)),
        }
    }

    /// Returns true if a vein may have its origin in `biome`.
    ///
    /// Entries match the biome name (with or without namespace) or, ignoring
    /// case, any of its tags.
    #[must_use]
    pub fn matches_biome(&self, biome: &Biome) -> bool {
        match &self.biomes {
            None => true,
            Some(filter) => filter.passes(
                filter
                    .entries
                    .iter()
                    .any(|entry| biome.is_named(entry) || biome.has_tag(entry)),
            ),
        }
    }

    /// Returns true if ore may replace the block at `pos`.
    #[inline]
    #[must_use]
    pub fn can_generate_at<W: WorldView + ?Sized>(&self, world: &W, pos: BlockPos) -> bool {
        self.stone.contains(&world.block_state(pos)) && self.rules.test(world, pos)
    }

    /// Picks a vein origin inside `chunk`. Three draws: x, y, z.
    pub fn choose_origin<R: RandomSource + ?Sized>(
        &self,
        chunk: ChunkPos,
        rng: &mut R,
        config: &GenerationConfig,
    ) -> BlockPos {
        let vertical = self.shape.vertical_size();
        let height = vertical.saturating_mul(2);
        let mut min = self.min_y;
        let mut span = self.max_y - self.min_y;

        if config.avoid_vein_cutoffs {
            if height < span {
                span -= height;
                min += vertical;
            } else {
                min = self.min_y + (self.max_y - self.min_y) / 2;
                span = 1;
            }
        }

        let x = chunk.min_block_x() + rng.next_int(CHUNK_SIZE as u32) as i32;
        let y = min + rng.next_int(span.max(1) as u32) as i32;
        let z = chunk.min_block_z() + rng.next_int(CHUNK_SIZE as u32) as i32;
        BlockPos::new(x, y, z)
    }

    /// Chunks in each direction whose veins can reach a given chunk.
    #[must_use]
    pub const fn chunk_search_radius(&self) -> i32 {
        self.shape.chunk_search_radius()
    }

    /// Draws the ore to place. One draw.
    pub fn ore_state<R: RandomSource + ?Sized>(&self, rng: &mut R) -> BlockState {
        *self.ore.get(rng)
    }

    /// Draws a surface indicator. No draw if the vein has none.
    pub fn indicator<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<&Indicator> {
        self.indicator.as_ref().map(|list| list.get(rng))
    }

    /// One-line summary for diagnostics.
    #[must_use]
    pub fn describe<P: BlockStateParser + ?Sized>(&self, name: &str, blocks: &P) -> String {
        format!(
            "[{name}: Count: {}, Rarity: {}, Y: {} - {}, Size: {} / {}, Density: {:.2}, Ores: [{}], Stones: [{}]]",
            self.count,
            self.rarity,
            self.min_y,
            self.max_y,
            self.shape.horizontal_size(),
            self.shape.vertical_size(),
            self.density,
            format_states(blocks, self.ore.values()),
            format_states(blocks, self.stone.iter()),
        )
    }
}

fn format_states<'a, P: BlockStateParser + ?Sized>(
    blocks: &P,
    states: impl Iterator<Item = &'a BlockState>,
) -> String {
    states
        .map(|&state| blocks.format(state))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::BlockPalette;
    use crate::rule::{DepthRule, Rule};
    use crate::seed::WorldSeed;
    use crate::world::MemoryWorld;

    const STONE: BlockState = BlockState::new(1);
    const IRON: BlockState = BlockState::new(2);

    fn iron() -> VeinType {
        VeinType::new(vec![STONE], WeightedList::single(IRON))
    }

    #[test]
    fn test_defaults_are_valid() {
        let vein = iron();
        assert!(vein.is_valid());
        assert_eq!((vein.count(), vein.rarity()), (1, 10));
        assert_eq!((vein.min_y(), vein.max_y()), (16, 64));
        assert_eq!(vein.shape(), VeinShape::new(15, 8));
        assert!((vein.density() - 20.0).abs() < f32::EPSILON);
        assert_eq!(vein.chunk_search_radius(), 1);
    }

    #[test]
    fn test_validity_bounds() {
        let invalid = [
            VeinType::new(vec![], WeightedList::single(IRON)),
            VeinType::new(vec![STONE], WeightedList::new()),
            iron().with_count(0),
            iron().with_rarity(0),
            iron().with_y_range(-1, 10),
            iron().with_y_range(10, 10),
            iron().with_size(0, 8),
            iron().with_size(8, 0),
            iron().with_density(0.0),
            iron().with_density(f32::NAN),
            iron().with_indicator(WeightedList::new()),
            iron().with_indicator(WeightedList::single(Indicator::new(WeightedList::new()))),
            iron().with_rules(RuleChain::new(vec![Rule::Depth(DepthRule { min_y: 5, max_y: 1 })])),
        ];
        for vein in invalid {
            assert!(!vein.is_valid(), "{vein:?} should be invalid");
        }

        assert!(iron().with_y_range(0, 1).is_valid());
        assert!(iron()
            .with_indicator(WeightedList::single(Indicator::new(WeightedList::single(STONE))))
            .is_valid());
    }

    #[test]
    fn test_size_and_height_limits() {
        let limit = MAX_VEIN_SIZE;
        assert!(iron().with_size(limit, limit).with_y_range(0, MAX_VEIN_Y).is_valid());

        assert_eq!(
            iron().with_size(limit + 1, 8).validate(),
            Err(InvalidReason::SizeOutOfRange {
                horizontal: limit + 1,
                vertical: 8,
                limit,
            })
        );
        assert_eq!(
            iron().with_size(15, 1_500_000_000).validate(),
            Err(InvalidReason::SizeOutOfRange {
                horizontal: 15,
                vertical: 1_500_000_000,
                limit,
            })
        );
        assert_eq!(
            iron().with_y_range(0, i32::MAX).validate(),
            Err(InvalidReason::YTooHigh {
                max_y: i32::MAX,
                limit: MAX_VEIN_Y,
            })
        );
    }

    #[test]
    fn test_validate_reports_first_failure() {
        let vein = VeinType::new(vec![], WeightedList::new()).with_count(0);
        assert_eq!(vein.validate(), Err(InvalidReason::EmptyOre));
    }

    #[test]
    fn test_dimension_filters() {
        let config = GenerationConfig::default();
        let overworld = "minecraft:overworld";
        let nether = "minecraft:the_nether";

        let unfiltered = iron();
        assert!(unfiltered.matches_dimension(overworld, &config));
        assert!(!unfiltered.matches_dimension(nether, &config));

        let nether_config = GenerationConfig {
            default_dimension: nether.to_string(),
            ..GenerationConfig::default()
        };
        assert!(unfiltered.matches_dimension(nether, &nether_config));

        let white = iron().with_dimensions(vec![nether.into()], true);
        assert!(white.matches_dimension(nether, &config));
        assert!(!white.matches_dimension(overworld, &config));

        let black = iron().with_dimensions(vec![nether.into()], false);
        assert!(!black.matches_dimension(nether, &config));
        assert!(black.matches_dimension(overworld, &config));
        assert!(black.matches_dimension("mymod:moon", &config));
    }

    #[test]
    fn test_biome_filters() {
        let plains = Biome::new("plains");
        let desert = Biome::new("desert").with_tag("HOT").with_tag("dry");

        assert!(iron().matches_biome(&plains));

        let white = iron().with_biomes(vec!["plains".into(), "hot".into()], true);
        assert!(white.matches_biome(&plains));
        assert!(white.matches_biome(&desert));
        assert!(!white.matches_biome(&Biome::new("ocean")));

        let black = iron().with_biomes(vec!["minecraft:plains".into(), "Dry".into()], false);
        assert!(!black.matches_biome(&plains));
        assert!(!black.matches_biome(&desert));
        assert!(black.matches_biome(&Biome::new("ocean")));
    }

    #[test]
    fn test_origin_avoids_cutoffs() {
        let config = GenerationConfig::default();
        let vein = iron().with_y_range(10, 50).with_size(15, 8);
        let chunk = ChunkPos::new(-2, 3);
        let mut rng = WorldSeed::new(11).rng();

        for _ in 0..2_000 {
            let origin = vein.choose_origin(chunk, &mut rng, &config);
            assert!((18..42).contains(&origin.y), "y {} outside [18, 42)", origin.y);
            assert!(chunk.contains(origin.x, origin.z));
        }
    }

    #[test]
    fn test_origin_centred_when_too_tall() {
        let config = GenerationConfig::default();
        let vein = iron().with_y_range(20, 30).with_size(15, 5);
        let mut rng = WorldSeed::new(5).rng();
        for _ in 0..100 {
            assert_eq!(vein.choose_origin(ChunkPos::new(0, 0), &mut rng, &config).y, 25);
        }
    }

    #[test]
    fn test_origin_without_avoidance_covers_range() {
        let config = GenerationConfig {
            avoid_vein_cutoffs: false,
            ..GenerationConfig::default()
        };
        let vein = iron().with_y_range(20, 24);
        let mut rng = WorldSeed::new(8).rng();
        let mut seen = [false; 4];
        for _ in 0..500 {
            let y = vein.choose_origin(ChunkPos::new(0, 0), &mut rng, &config).y;
            assert!((20..24).contains(&y));
            seen[(y - 20) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_can_generate_at_needs_stone_and_rules() {
        let world = MemoryWorld::stone_filled(ChunkPos::new(0, 0), 0, 64, 32, STONE, Biome::default());
        let vein = iron().with_rules(RuleChain::new(vec![Rule::Depth(DepthRule { min_y: 0, max_y: 9 })]));

        assert!(vein.can_generate_at(&world, BlockPos::new(1, 5, 1)));
        assert!(!vein.can_generate_at(&world, BlockPos::new(1, 15, 1)));
        assert!(!vein.can_generate_at(&world, BlockPos::new(1, 40, 1)));
        assert!(iron().can_generate_at(&world, BlockPos::new(1, 15, 1)));
    }

    #[test]
    fn test_indicator_draw_only_when_present() {
        let mut rng = WorldSeed::new(2).rng();
        let mut untouched = rng.clone();
        assert!(iron().indicator(&mut rng).is_none());
        assert_eq!(rng.next_seed(), untouched.next_seed());
    }

    #[test]
    fn test_describe() {
        let mut palette = BlockPalette::vanilla();
        let stone = palette.get("stone").unwrap();
        let andesite = palette.get("andesite").unwrap();
        let iron_ore = palette.get("iron_ore").unwrap();
        let gold_ore = palette.register("gold_ore");
        let ore = WeightedList::from_entries([(iron_ore, 3), (gold_ore, 1)]).unwrap();

        let vein = VeinType::new(vec![stone, andesite], ore).with_density(12.5);
        assert_eq!(
            vein.describe("iron", &palette),
            "[iron: Count: 1, Rarity: 10, Y: 16 - 64, Size: 15 / 8, Density: 12.50, \
             Ores: [minecraft:iron_ore, minecraft:gold_ore], Stones: [minecraft:stone, minecraft:andesite]]"
        );
    }
}
