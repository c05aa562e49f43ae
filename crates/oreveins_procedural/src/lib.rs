//! # OreVeins Procedural Placement
//!
//! Deterministic, data-driven ore vein placement.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same seed + dimension + chunk always produces the same ore
//! 2. **Host-neutral**: The world is reached through [`WorldView`] / [`WorldWriter`] only
//! 3. **Load once**: Vein types are validated at load time and immutable afterwards
//! 4. **Lock-free**: Chunk passes share nothing mutable and may run in parallel
//!
//! ## Core Components
//!
//! - `WeightedList`: Weighted choice of ores and indicators
//! - `VeinType`: One vein kind's filters, shape and origin selection
//! - `RuleChain`: Extra per-block conditions (depth, touching, noise mask)
//! - `VeinRegistry`: Name-keyed storage of loaded vein types
//! - `VeinPlacer`: The per-chunk driver
//! - `LoadedVeins`: TOML configuration loading with per-entry rejection
//!
//! ## Example
//!
//! ```rust,ignore
//! use oreveins_procedural::{config, BlockPalette, VeinPlacer, WorldSeed};
//!
//! let blocks = BlockPalette::vanilla();
//! let loaded = config::load_path("data/veins.toml", &blocks)?;
//! let placer = VeinPlacer::new(&loaded.registry, &loaded.settings, WorldSeed::new(12345));
//!
//! // Once per generated chunk
//! let report = placer.place_chunk(&mut world, "minecraft:overworld", chunk);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod indicator;
pub mod noise;
pub mod palette;
pub mod placement;
pub mod registry;
pub mod rule;
pub mod seed;
pub mod shape;
pub mod vein_type;
pub mod weighted;
pub mod world;

pub use config::{GenerationConfig, LoadedVeins, RejectedVein};
pub use error::{BlockParseError, InvalidReason, VeinError, VeinResult};
pub use indicator::Indicator;
pub use noise::SimplexNoise;
pub use palette::{BlockPalette, BlockStateParser};
pub use placement::{PlacedVein, PlacementReport, VeinInstance, VeinPlacer};
pub use registry::VeinRegistry;
pub use rule::{DepthRule, NoiseRule, Rule, RuleChain, TouchingRule};
pub use seed::{RandomSource, VeinRng, WorldSeed};
pub use shape::{SizeRange, VeinShape};
pub use vein_type::{NameFilter, VeinType};
pub use weighted::WeightedList;
pub use world::{MemoryWorld, WorldView, WorldWriter};
