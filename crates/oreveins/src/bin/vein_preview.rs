//! # Vein Preview
//!
//! Generates a square of chunks in an in-memory world, places the surface
//! indicators of every vein that reached the surface, and prints per-vein
//! totals plus a top-down ore map.
//!
//! ```bash
//! vein_preview --seed 42 --radius 3
//! vein_preview --dimension minecraft:the_nether
//! ```

use std::process::ExitCode;
use std::time::Instant;

use oreveins::{Options, VeinHost};
use oreveins_procedural::{
    BlockPalette, BlockStateParser, MemoryWorld, VeinInstance, WorldSeed, WorldView, WorldWriter,
};
use oreveins_shared::{Biome, BlockPos, BlockState, ChunkPos};

/// World height of the preview.
const HEIGHT: i32 = 128;
/// First air layer; the layer below it is the ground.
const SURFACE: i32 = 100;

/// Per-vein totals.
#[derive(Default)]
struct VeinStats {
    instances: u32,
    blocks: u32,
    markers: u32,
}

/// Surface blocks the preview needs to tell apart.
struct Surface {
    vegetation: Vec<BlockState>,
    liquids: Vec<BlockState>,
}

impl Surface {
    fn new(blocks: &BlockPalette) -> Self {
        let states = |names: &[&str]| names.iter().filter_map(|name| blocks.parse(name).ok()).collect();
        Self {
            vegetation: states(&["grass", "tall_grass", "dead_bush"]),
            liquids: states(&["water", "lava"]),
        }
    }
}

/// Places the instance's indicator on covered columns of `chunk`.
fn place_markers(
    world: &mut MemoryWorld,
    surface: &Surface,
    dimension: &str,
    chunk: ChunkPos,
    instance: &VeinInstance<'_>,
) -> u32 {
    let Some(indicator) = instance.indicator else {
        return 0;
    };
    let mut rng = WorldSeed::new(instance.seed).salted("indicator").for_chunk(dimension, chunk).rng();
    let mut placed = 0;

    for z in chunk.min_block_z()..=chunk.max_block_z() {
        for x in chunk.min_block_x()..=chunk.max_block_x() {
            if !instance.covers_column(x, z) {
                continue;
            }
            let ground = indicator.find_ground(
                &*world,
                x,
                z,
                HEIGHT - 1,
                |s| surface.vegetation.contains(&s),
                |s| surface.liquids.contains(&s),
            );
            let Some(ground) = ground else { continue };
            let ground_state = world.block_state(ground);
            if let Some(marker) = indicator.surface_state(ground, ground_state, instance.origin, &mut rng) {
                world.set_block_state(ground.up(), marker);
                placed += 1;
            }
        }
    }
    placed
}

fn base_block(dimension: &str) -> &'static str {
    match dimension {
        "minecraft:the_nether" => "netherrack",
        "minecraft:the_end" => "end_stone",
        _ => "stone",
    }
}

fn main() -> ExitCode {
    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::from(2);
        }
    };

    let mut host = VeinHost::new(BlockPalette::vanilla(), WorldSeed::new(options.seed));
    if let Err(error) = host.load_paths(&options.configs) {
        eprintln!("error: {error}");
        return ExitCode::FAILURE;
    }
    for rejected in host.rejected() {
        eprintln!("warning: skipped vein '{}': {}", rejected.name, rejected.error);
    }

    let blocks = host.blocks();
    let dimension = options.dimension.as_str();
    let (Ok(base), Ok(grass)) = (blocks.parse(base_block(dimension)), blocks.parse("grass_block")) else {
        eprintln!("error: block palette is missing base blocks");
        return ExitCode::FAILURE;
    };

    let center = ChunkPos::new(0, 0);
    let mut world = MemoryWorld::stone_filled(center, options.radius, HEIGHT, SURFACE, base, Biome::default());
    if base_block(dimension) == "stone" {
        world.fill_layers(SURFACE - 1, SURFACE, grass);
    }
    let surface = Surface::new(blocks);

    let names: Vec<&str> = host.registry().names().collect();
    let mut stats: Vec<VeinStats> = names.iter().map(|_| VeinStats::default()).collect();

    let start = Instant::now();
    let chunks: Vec<ChunkPos> = world.chunks().collect();
    for &chunk in &chunks {
        let report = host.generate_chunk(&mut world, dimension, chunk);
        for placed in &report.veins {
            let Some(index) = names.iter().position(|&n| n == placed.instance.name) else {
                continue;
            };
            let markers = place_markers(&mut world, &surface, dimension, chunk, &placed.instance);
            let entry = &mut stats[index];
            entry.blocks += placed.blocks_placed;
            entry.markers += markers;
            // Count each instance once, in the chunk holding its origin
            if chunk.contains(placed.instance.origin.x, placed.instance.origin.z) {
                entry.instances += 1;
            }
        }
    }
    let elapsed = start.elapsed();

    println!("═══════════════════════════════════════════════════════════════════");
    println!("                        OREVEINS PREVIEW");
    println!("═══════════════════════════════════════════════════════════════════");
    println!("Seed:       {}", options.seed);
    println!("Dimension:  {dimension}");
    println!("Chunks:     {} ({}x{})", chunks.len(), options.radius * 2 + 1, options.radius * 2 + 1);
    println!("Generated:  {elapsed:?}");
    println!();
    println!("{:<16} {:>10} {:>10} {:>10}", "vein", "instances", "blocks", "markers");
    println!("{}", "─".repeat(49));
    for (name, entry) in names.iter().zip(&stats) {
        println!("{name:<16} {:>10} {:>10} {:>10}", entry.instances, entry.blocks, entry.markers);
    }

    let ores: Vec<BlockState> = host
        .registry()
        .iter()
        .flat_map(|(_, vein)| vein.ore_states().copied())
        .collect();

    println!();
    println!("Ore per column (. none, : 1-2, + 3-5, # 6+):");
    let min = ChunkPos::new(center.x - options.radius, center.z - options.radius);
    let max = ChunkPos::new(center.x + options.radius, center.z + options.radius);
    for z in min.min_block_z()..=max.max_block_z() {
        let row: String = (min.min_block_x()..=max.max_block_x())
            .map(|x| {
                let count = (0..SURFACE)
                    .filter(|&y| ores.contains(&world.block_state(BlockPos::new(x, y, z))))
                    .count();
                match count {
                    0 => '.',
                    1..=2 => ':',
                    3..=5 => '+',
                    _ => '#',
                }
            })
            .collect();
        println!("{row}");
    }

    ExitCode::SUCCESS
}
