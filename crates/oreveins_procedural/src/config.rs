//! # Vein Configuration
//!
//! Vein types are described in TOML documents:
//!
//! ```toml
//! [settings]
//! avoid_vein_cutoffs = true
//!
//! [veins.iron]
//! stone = ["stone", "andesite"]
//! ore = [{ block = "iron_ore", weight = 3 }, "gold_ore"]
//! rarity = 8
//! biomes = ["plains", "hot"]
//! rules = [{ type = "touching", blocks = "air", max = 0 }]
//! indicator = { blocks = "gravel", rarity = 4 }
//! ```
//!
//! A syntax error fails the whole document. A vein entry that does not
//! deserialize, names an unknown block or fails validation is rejected on
//! its own: it is logged, recorded in [`LoadedVeins::rejected`], and the
//! other entries still load.

use std::path::Path;

use serde::{Deserialize, Serialize};

use oreveins_shared::{BlockState, DEFAULT_DIMENSION};

use crate::error::{VeinError, VeinResult};
use crate::indicator::Indicator;
use crate::noise::SimplexNoise;
use crate::palette::BlockStateParser;
use crate::registry::VeinRegistry;
use crate::rule::{DepthRule, NoiseRule, Rule, RuleChain, TouchingRule};
use crate::seed::WorldSeed;
use crate::shape::SizeRange;
use crate::vein_type::VeinType;
use crate::weighted::WeightedList;

/// Settings shared by every vein type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Keep origins far enough from `min_y`/`max_y` that veins are not cut off.
    pub avoid_vein_cutoffs: bool,
    /// Dimension a vein type without a dimension filter generates in.
    pub default_dimension: String,
    /// Per-instance size factor range.
    pub size_range: SizeRange,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            avoid_vein_cutoffs: true,
            default_dimension: DEFAULT_DIMENSION.to_string(),
            size_range: SizeRange::default(),
        }
    }
}

impl GenerationConfig {
    /// # Errors
    ///
    /// Returns [`VeinError::Config`] if the size range is unusable.
    pub fn validate(&self) -> VeinResult<()> {
        if !self.size_range.is_valid() {
            return Err(VeinError::Config(format!(
                "size_range [{}, {}] must satisfy 0 < min <= max",
                self.size_range.min, self.size_range.max
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Raw document types
// =============================================================================

#[derive(Deserialize)]
struct Document {
    settings: Option<GenerationConfig>,
    #[serde(default)]
    veins: toml::Table,
}

/// `"stone"`, `["stone", "granite"]` or `[{ block = "stone", weight = 2 }]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum BlockList {
    One(BlockEntry),
    Many(Vec<BlockEntry>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BlockEntry {
    Name(String),
    Weighted {
        block: String,
        #[serde(default = "default_weight")]
        weight: u32,
    },
}

impl BlockList {
    fn into_entries(self) -> Vec<BlockEntry> {
        match self {
            Self::One(entry) => vec![entry],
            Self::Many(entries) => entries,
        }
    }

    fn parse_weighted<P: BlockStateParser + ?Sized>(self, blocks: &P) -> VeinResult<WeightedList<BlockState>> {
        let mut list = WeightedList::new();
        for entry in self.into_entries() {
            let (text, weight) = match entry {
                BlockEntry::Name(text) => (text, 1),
                BlockEntry::Weighted { block, weight } => (block, weight),
            };
            list.add(parse_block(&text, blocks)?, weight)?;
        }
        Ok(list)
    }

    fn parse_states<P: BlockStateParser + ?Sized>(self, blocks: &P) -> VeinResult<Vec<BlockState>> {
        self.into_entries()
            .into_iter()
            .map(|entry| match entry {
                BlockEntry::Name(text) | BlockEntry::Weighted { block: text, .. } => parse_block(&text, blocks),
            })
            .collect()
    }
}

fn parse_block<P: BlockStateParser + ?Sized>(text: &str, blocks: &P) -> VeinResult<BlockState> {
    blocks.parse(text).map_err(|source| VeinError::BlockState {
        text: text.to_string(),
        source,
    })
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RuleSpec {
    Depth {
        min_y: i32,
        max_y: i32,
    },
    Touching {
        blocks: BlockList,
        #[serde(default = "default_touching_min")]
        min: u32,
        #[serde(default = "default_touching_max")]
        max: u32,
    },
    Noise {
        seed: Option<u64>,
        #[serde(default = "default_noise_scale")]
        scale: f64,
        #[serde(default)]
        threshold: f64,
        #[serde(default = "default_octaves")]
        octaves: u32,
    },
}

impl RuleSpec {
    fn build<P: BlockStateParser + ?Sized>(self, vein: &str, blocks: &P) -> VeinResult<Rule> {
        Ok(match self {
            Self::Depth { min_y, max_y } => Rule::Depth(DepthRule { min_y, max_y }),
            Self::Touching { blocks: list, min, max } => Rule::Touching(TouchingRule {
                blocks: list.parse_states(blocks)?,
                min,
                max,
            }),
            Self::Noise {
                seed,
                scale,
                threshold,
                octaves,
            } => {
                // Unseeded fields still differ between vein types
                let seed = seed.map_or_else(|| WorldSeed::default().salted(vein), WorldSeed::new);
                Rule::Noise(NoiseRule {
                    noise: SimplexNoise::new(seed),
                    scale,
                    threshold,
                    octaves,
                })
            }
        })
    }
}

#[derive(Deserialize)]
struct IndicatorSpec {
    blocks: BlockList,
    under: Option<BlockList>,
    #[serde(default = "default_rarity")]
    rarity: u32,
    #[serde(default = "default_max_depth")]
    max_depth: i32,
    #[serde(default = "default_true")]
    ignore_vegetation: bool,
    #[serde(default)]
    ignore_liquids: bool,
    #[serde(default = "default_weight")]
    weight: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IndicatorList {
    One(IndicatorSpec),
    Many(Vec<IndicatorSpec>),
}

impl IndicatorList {
    fn build<P: BlockStateParser + ?Sized>(self, blocks: &P) -> VeinResult<WeightedList<Indicator>> {
        let specs = match self {
            Self::One(spec) => vec![spec],
            Self::Many(specs) => specs,
        };

        let mut list = WeightedList::new();
        for spec in specs {
            let indicator = Indicator {
                blocks: spec.blocks.parse_weighted(blocks)?,
                under: match spec.under {
                    Some(under) => under.parse_states(blocks)?,
                    None => Vec::new(),
                },
                rarity: spec.rarity,
                max_depth: spec.max_depth,
                ignore_vegetation: spec.ignore_vegetation,
                ignore_liquids: spec.ignore_liquids,
            };
            list.add(indicator, spec.weight)?;
        }
        Ok(list)
    }
}

/// One `[veins.<name>]` entry as written.
#[derive(Deserialize)]
struct VeinSpec {
    #[serde(default = "default_count")]
    count: u32,
    #[serde(default = "default_rarity")]
    rarity: u32,
    #[serde(default = "default_min_y")]
    min_y: i32,
    #[serde(default = "default_max_y")]
    max_y: i32,
    #[serde(default = "default_vertical_size")]
    vertical_size: i32,
    #[serde(default = "default_horizontal_size")]
    horizontal_size: i32,
    #[serde(default = "default_density")]
    density: f32,
    #[serde(default = "default_true")]
    dimensions_is_whitelist: bool,
    #[serde(default = "default_true")]
    biomes_is_whitelist: bool,
    stone: BlockList,
    ore: BlockList,
    biomes: Option<Vec<String>>,
    dimensions: Option<Vec<String>>,
    #[serde(default)]
    rules: Vec<RuleSpec>,
    indicator: Option<IndicatorList>,
}

impl VeinSpec {
    fn build<P: BlockStateParser + ?Sized>(self, name: &str, blocks: &P) -> VeinResult<VeinType> {
        let rules = self
            .rules
            .into_iter()
            .map(|rule| rule.build(name, blocks))
            .collect::<VeinResult<RuleChain>>()?;

        let mut vein = VeinType::new(self.stone.parse_states(blocks)?, self.ore.parse_weighted(blocks)?)
            .with_count(self.count)
            .with_rarity(self.rarity)
            .with_y_range(self.min_y, self.max_y)
            .with_size(self.horizontal_size, self.vertical_size)
            .with_density(self.density)
            .with_rules(rules);

        if let Some(biomes) = self.biomes {
            vein = vein.with_biomes(biomes, self.biomes_is_whitelist);
        }
        if let Some(dimensions) = self.dimensions {
            vein = vein.with_dimensions(dimensions, self.dimensions_is_whitelist);
        }
        if let Some(indicator) = self.indicator {
            vein = vein.with_indicator(indicator.build(blocks)?);
        }
        Ok(vein)
    }
}

const fn default_weight() -> u32 {
    1
}
const fn default_count() -> u32 {
    1
}
const fn default_rarity() -> u32 {
    10
}
const fn default_min_y() -> i32 {
    16
}
const fn default_max_y() -> i32 {
    64
}
const fn default_vertical_size() -> i32 {
    8
}
const fn default_horizontal_size() -> i32 {
    15
}
const fn default_density() -> f32 {
    20.0
}
const fn default_true() -> bool {
    true
}
const fn default_max_depth() -> i32 {
    32
}
const fn default_touching_min() -> u32 {
    1
}
const fn default_touching_max() -> u32 {
    6
}
const fn default_noise_scale() -> f64 {
    0.05
}
const fn default_octaves() -> u32 {
    1
}

// =============================================================================
// Loading
// =============================================================================

/// A vein entry that was not registered.
#[derive(Clone, Debug, PartialEq)]
pub struct RejectedVein {
    /// Entry name.
    pub name: String,
    /// Why it was rejected.
    pub error: VeinError,
}

/// Everything loaded from one or more configuration documents.
#[derive(Debug, Default)]
pub struct LoadedVeins {
    /// Accepted vein types.
    pub registry: VeinRegistry,
    /// Settings of the last document that had a `[settings]` table.
    pub settings: GenerationConfig,
    /// Entries that failed, in document order.
    pub rejected: Vec<RejectedVein>,
}

impl LoadedVeins {
    /// Creates an empty result with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads one document, adding its veins to the registry.
    ///
    /// Returns the number of veins registered from this document.
    ///
    /// # Errors
    ///
    /// Returns [`VeinError::Config`] if the document is not valid TOML, its
    /// top-level shape is wrong, or its settings are unusable. Nothing is
    /// registered in that case.
    pub fn load_str<P: BlockStateParser + ?Sized>(&mut self, text: &str, blocks: &P) -> VeinResult<usize> {
        let document: Document = toml::from_str(text).map_err(|e| VeinError::Config(e.message().to_string()))?;

        if let Some(settings) = document.settings {
            settings.validate()?;
            self.settings = settings;
        }

        let mut registered = 0;
        for (name, value) in document.veins {
            let result = value
                .try_into::<VeinSpec>()
                .map_err(|e| VeinError::Config(format!("{name}: {}", e.message())))
                .and_then(|spec| spec.build(&name, blocks))
                .and_then(|vein| self.registry.register(&name, vein));

            match result {
                Ok(()) => registered += 1,
                Err(error) => {
                    tracing::warn!(vein = %name, %error, "rejected vein entry");
                    self.rejected.push(RejectedVein { name, error });
                }
            }
        }

        tracing::info!(
            registered,
            rejected = self.rejected.len(),
            total = self.registry.len(),
            "loaded vein configuration"
        );
        Ok(registered)
    }

    /// Reads and loads one file.
    ///
    /// # Errors
    ///
    /// Returns [`VeinError::Io`] if the file cannot be read, otherwise as
    /// [`LoadedVeins::load_str`].
    pub fn load_path<P: BlockStateParser + ?Sized>(
        &mut self,
        path: impl AsRef<Path>,
        blocks: &P,
    ) -> VeinResult<usize> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| VeinError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "reading vein configuration");
        self.load_str(&text, blocks)
    }
}

/// Loads a single document.
///
/// # Errors
///
/// See [`LoadedVeins::load_str`].
pub fn load_str<P: BlockStateParser + ?Sized>(text: &str, blocks: &P) -> VeinResult<LoadedVeins> {
    let mut loaded = LoadedVeins::new();
    loaded.load_str(text, blocks)?;
    Ok(loaded)
}

/// Loads a single file.
///
/// # Errors
///
/// See [`LoadedVeins::load_path`].
pub fn load_path<P: BlockStateParser + ?Sized>(path: impl AsRef<Path>, blocks: &P) -> VeinResult<LoadedVeins> {
    let mut loaded = LoadedVeins::new();
    loaded.load_path(path, blocks)?;
    Ok(loaded)
}
