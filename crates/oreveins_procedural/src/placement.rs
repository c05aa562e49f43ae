//! # Vein Placement
//!
//! The per-chunk driver. The host calls [`VeinPlacer::place_chunk`] once for
//! every chunk it generates.
//!
//! ## Streams
//!
//! ```text
//! instances spawned by chunk N:    seed.for_chunk(dim, N).salted(vein)
//! blocks of instance I in chunk T: WorldSeed(I.seed).for_chunk(dim, T)
//! ```
//!
//! Instances only depend on the chunk that spawns them, and the blocks an
//! instance writes into a chunk only depend on the instance and that chunk.
//! Writes are clipped to the chunk being generated, so a vein crossing a
//! border comes out the same whichever side is generated first.

use oreveins_shared::{BlockPos, ChunkPos};

use crate::config::GenerationConfig;
use crate::indicator::Indicator;
use crate::registry::VeinRegistry;
use crate::seed::{RandomSource, WorldSeed};
use crate::vein_type::VeinType;
use crate::world::{WorldView, WorldWriter};

/// One spawned vein.
#[derive(Clone, Debug, PartialEq)]
pub struct VeinInstance<'r> {
    /// Registry name of the vein type.
    pub name: &'r str,
    /// The vein type.
    pub vein: &'r VeinType,
    /// Center of the vein.
    pub origin: BlockPos,
    /// Size factor drawn from the configured range.
    pub size: f32,
    /// Surface indicator chosen for this vein, if the type has any.
    pub indicator: Option<&'r Indicator>,
    /// Seed of this instance's block streams.
    pub seed: u64,
}

impl VeinInstance<'_> {
    /// Returns true if the column `(x, z)` lies inside the vein's footprint.
    #[inline]
    #[must_use]
    pub fn covers_column(&self, x: i32, z: i32) -> bool {
        self.vein
            .shape()
            .in_range(self.size, x - self.origin.x, z - self.origin.z)
    }
}

/// An instance that reached the generated chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedVein<'r> {
    /// The instance.
    pub instance: VeinInstance<'r>,
    /// Ore blocks written into the chunk.
    pub blocks_placed: u32,
}

/// Result of one chunk pass.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementReport<'r> {
    /// The generated chunk.
    pub chunk: ChunkPos,
    /// Instances whose bounding box overlaps the chunk, in placement order.
    pub veins: Vec<PlacedVein<'r>>,
}

impl PlacementReport<'_> {
    /// Ore blocks written in total.
    #[must_use]
    pub fn total_blocks(&self) -> u32 {
        self.veins.iter().map(|v| v.blocks_placed).sum()
    }
}

/// Places ore for chunks of one world.
///
/// Holds only shared references, so one placer can serve several threads.
#[derive(Clone, Copy, Debug)]
pub struct VeinPlacer<'r> {
    registry: &'r VeinRegistry,
    config: &'r GenerationConfig,
    seed: WorldSeed,
}

impl<'r> VeinPlacer<'r> {
    /// Creates a placer.
    #[must_use]
    pub const fn new(registry: &'r VeinRegistry, config: &'r GenerationConfig, seed: WorldSeed) -> Self {
        Self { registry, config, seed }
    }

    /// The world seed.
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// The generation settings.
    #[must_use]
    pub const fn config(&self) -> &'r GenerationConfig {
        self.config
    }

    /// Every instance that may reach `chunk`: the instances spawned by each
    /// chunk within the vein type's search radius, for every vein type that
    /// generates in `dimension`.
    pub fn instances_for_chunk<W: WorldView + ?Sized>(
        &self,
        world: &W,
        dimension: &str,
        chunk: ChunkPos,
    ) -> Vec<VeinInstance<'r>> {
        let mut instances = Vec::new();
        for (name, vein) in self.registry.iter() {
            if !vein.matches_dimension(dimension, self.config) {
                continue;
            }
            for source in chunk.square_around(vein.chunk_search_radius()) {
                self.spawn_instances(world, dimension, source, name, vein, &mut instances);
            }
        }
        instances
    }

    /// Instances spawned by `source` for one vein type.
    fn spawn_instances<W: WorldView + ?Sized>(
        &self,
        world: &W,
        dimension: &str,
        source: ChunkPos,
        name: &'r str,
        vein: &'r VeinType,
        out: &mut Vec<VeinInstance<'r>>,
    ) {
        let mut rng = self.seed.for_chunk(dimension, source).salted(name).rng();
        if rng.next_int(vein.rarity()) != 0 {
            return;
        }

        for _ in 0..vein.count() {
            let origin = vein.choose_origin(source, &mut rng, self.config);
            if !vein.matches_biome(world.biome(origin)) {
                continue;
            }
            let size = self.config.size_range.draw(&mut rng);
            let indicator = vein.indicator(&mut rng);
            let seed = rng.next_seed();

            tracing::trace!(vein = name, %origin, size, "spawned vein instance");
            out.push(VeinInstance {
                name,
                vein,
                origin,
                size,
                indicator,
                seed,
            });
        }
    }

    /// Places every vein that reaches `chunk`, writing only inside it.
    pub fn place_chunk<W: WorldWriter + ?Sized>(
        &self,
        world: &mut W,
        dimension: &str,
        chunk: ChunkPos,
    ) -> PlacementReport<'r> {
        let instances = self.instances_for_chunk(&*world, dimension, chunk);

        let veins: Vec<_> = instances
            .into_iter()
            .filter_map(|instance| {
                let blocks_placed = place_instance(&mut *world, dimension, chunk, &instance)?;
                Some(PlacedVein {
                    instance,
                    blocks_placed,
                })
            })
            .collect();

        let report = PlacementReport { chunk, veins };
        if !report.veins.is_empty() {
            tracing::debug!(
                %chunk,
                dimension,
                veins = report.veins.len(),
                blocks = report.total_blocks(),
                "placed ore veins"
            );
        }
        report
    }
}

/// Writes one instance into `chunk`. `None` if its box misses the chunk.
fn place_instance<W: WorldWriter + ?Sized>(
    world: &mut W,
    dimension: &str,
    chunk: ChunkPos,
    instance: &VeinInstance<'_>,
) -> Option<u32> {
    let vein = instance.vein;
    let origin = instance.origin;
    let horizontal = vein.shape().horizontal_size();
    let vertical = vein.shape().vertical_size();

    let min_x = (origin.x - horizontal).max(chunk.min_block_x());
    let max_x = (origin.x + horizontal).min(chunk.max_block_x());
    let min_z = (origin.z - horizontal).max(chunk.min_block_z());
    let max_z = (origin.z + horizontal).min(chunk.max_block_z());
    if min_x > max_x || min_z > max_z {
        return None;
    }

    let mut rng = WorldSeed::new(instance.seed).for_chunk(dimension, chunk).rng();
    let mut placed = 0;

    for x in min_x..=max_x {
        for z in min_z..=max_z {
            if !instance.covers_column(x, z) {
                continue;
            }
            for y in (origin.y - vertical)..=(origin.y + vertical) {
                let pos = BlockPos::new(x, y, z);
                if !vein.can_generate_at(&*world, pos) {
                    continue;
                }
                if rng.next_float() * 100.0 < vein.density() {
                    let ore = vein.ore_state(&mut rng);
                    world.set_block_state(pos, ore);
                    placed += 1;
                }
            }
        }
    }

    Some(placed)
}
