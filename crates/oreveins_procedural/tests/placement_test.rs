//! # Placement Integration Tests
//!
//! End-to-end chunk passes over an in-memory world.

use oreveins_procedural::{
    GenerationConfig, MemoryWorld, RandomSource, VeinPlacer, VeinRegistry, VeinType, WeightedList, WorldSeed,
    WorldView,
};
use oreveins_shared::{Biome, BlockState, ChunkPos, MAX_VEIN_SIZE};

const OVERWORLD: &str = "minecraft:overworld";
const STONE: BlockState = BlockState::new(1);
const IRON: BlockState = BlockState::new(2);

fn iron_registry(vein: VeinType) -> VeinRegistry {
    let mut registry = VeinRegistry::new();
    registry.register("iron", vein).unwrap();
    registry
}

fn stone_world() -> MemoryWorld {
    MemoryWorld::stone_filled(ChunkPos::new(0, 0), 2, 128, 100, STONE, Biome::default())
}

/// Every in-range stone block gets ore at density 100, nothing else does.
#[test]
fn test_iron_scenario_exact_footprint() {
    let vein = VeinType::new(vec![STONE], WeightedList::single(IRON))
        .with_y_range(16, 64)
        .with_size(15, 8)
        .with_density(100.0)
        .with_rarity(1)
        .with_count(1);
    let registry = iron_registry(vein);
    let config = GenerationConfig::default();
    let placer = VeinPlacer::new(&registry, &config, WorldSeed::new(20_240_601));
    let chunk = ChunkPos::new(0, 0);

    let mut world = stone_world();
    let before = world.clone();
    let instances = placer.instances_for_chunk(&world, OVERWORLD, chunk);
    assert_eq!(instances.len(), 9, "rarity 1 spawns one vein in each of the 3x3 chunks");

    let report = placer.place_chunk(&mut world, OVERWORLD, chunk);

    let mut expected_total = 0;
    for pos in world.positions_in_chunk(chunk) {
        let expected = before.block_state(pos) == STONE
            && instances.iter().any(|instance| {
                instance.covers_column(pos.x, pos.z) && (pos.y - instance.origin.y).abs() <= 8
            });
        let actual = world.block_state(pos);

        if expected {
            expected_total += 1;
            assert_eq!(actual, IRON, "missing ore at {pos}");
        } else {
            assert_eq!(actual, before.block_state(pos), "unexpected change at {pos}");
        }
    }

    assert!(expected_total > 0);
    assert_eq!(report.total_blocks(), expected_total);
    assert_eq!(world.count(IRON), expected_total as usize);
}

/// At density 25 about a quarter of the stone inside a single footprint
/// becomes ore.
#[test]
fn test_density_fraction() {
    let vein = VeinType::new(vec![STONE], WeightedList::single(IRON))
        .with_y_range(16, 64)
        .with_size(15, 8)
        .with_density(25.0)
        .with_rarity(1);
    let registry = iron_registry(vein);
    let config = GenerationConfig::default();
    let placer = VeinPlacer::new(&registry, &config, WorldSeed::new(4_242));

    let before = stone_world();
    let mut world = before.clone();
    let mut candidates = 0u32;
    let mut placed = 0u32;

    for chunk in before.chunks().collect::<Vec<_>>() {
        let instances = placer.instances_for_chunk(&before, OVERWORLD, chunk);
        placer.place_chunk(&mut world, OVERWORLD, chunk);

        for pos in before.positions_in_chunk(chunk) {
            if before.block_state(pos) != STONE {
                continue;
            }
            let covering = instances
                .iter()
                .filter(|instance| {
                    instance.covers_column(pos.x, pos.z) && (pos.y - instance.origin.y).abs() <= 8
                })
                .count();
            // Overlaps get a second chance; only single coverage is one draw
            if covering == 1 {
                candidates += 1;
                if world.block_state(pos) == IRON {
                    placed += 1;
                }
            }
        }
    }

    assert!(candidates > 10_000, "only {candidates} candidates");
    let fraction = f64::from(placed) / f64::from(candidates);
    assert!((fraction - 0.25).abs() < 0.02, "placed {placed} of {candidates} ({fraction:.3})");
}

/// The largest accepted extents place without arithmetic overflow.
#[test]
fn test_largest_valid_vein_places() {
    let vein = VeinType::new(vec![STONE], WeightedList::single(IRON))
        .with_y_range(0, 600)
        .with_size(MAX_VEIN_SIZE, MAX_VEIN_SIZE)
        .with_rarity(20);
    assert_eq!(vein.validate(), Ok(()));
    assert_eq!(vein.chunk_search_radius(), 17);

    let registry = iron_registry(vein);
    let config = GenerationConfig::default();
    let placer = VeinPlacer::new(&registry, &config, WorldSeed::new(77));
    let chunk = ChunkPos::new(0, 0);
    let mut world = stone_world();

    assert!(!placer.instances_for_chunk(&world, OVERWORLD, chunk).is_empty());
    let report = placer.place_chunk(&mut world, OVERWORLD, chunk);
    assert!(report.total_blocks() > 0);
    assert_eq!(world.count_in_chunk(chunk, IRON), report.total_blocks() as usize);
}

/// A biome whitelist keeps origins inside matching columns.
#[test]
fn test_biome_whitelist_limits_origins() {
    let desert = ChunkPos::new(1, 0);
    let registry = iron_registry(
        VeinType::new(vec![STONE], WeightedList::single(IRON))
            .with_rarity(1)
            .with_count(4)
            .with_biomes(vec!["desert".to_string()], true),
    );
    let config = GenerationConfig::default();
    let placer = VeinPlacer::new(&registry, &config, WorldSeed::new(12));
    let mut world = stone_world();
    world.set_chunk_biome(desert, &Biome::new("desert"));

    let instances = placer.instances_for_chunk(&world, OVERWORLD, ChunkPos::new(0, 0));
    assert_eq!(instances.len(), 4);
    assert!(instances
        .iter()
        .all(|instance| desert.contains(instance.origin.x, instance.origin.z)));

    assert!(placer
        .instances_for_chunk(&world, OVERWORLD, ChunkPos::new(-2, -2))
        .is_empty());
}

/// A failed rarity roll in every source chunk means no instance at all.
#[test]
fn test_failed_rarity_roll_attempts_nothing() {
    let registry = iron_registry(VeinType::new(vec![STONE], WeightedList::single(IRON)).with_rarity(1000));
    let config = GenerationConfig::default();
    let seed = WorldSeed::new(99);
    let placer = VeinPlacer::new(&registry, &config, seed);
    let world = stone_world();

    let rolls_zero = |chunk: ChunkPos| seed.for_chunk(OVERWORLD, chunk).salted("iron").rng().next_int(1000) == 0;

    let quiet = (0..10_000)
        .map(|x| ChunkPos::new(x, 0))
        .find(|chunk| chunk.square_around(1).all(|source| !rolls_zero(source)))
        .expect("some chunk has no successful roll around it");
    assert!(placer.instances_for_chunk(&world, OVERWORLD, quiet).is_empty());

    let lucky = (0..100_000)
        .map(|x| ChunkPos::new(x, 7))
        .find(|&chunk| rolls_zero(chunk))
        .expect("some chunk rolls zero");
    let instances = placer.instances_for_chunk(&world, OVERWORLD, lucky);
    assert!(instances
        .iter()
        .any(|instance| lucky.contains(instance.origin.x, instance.origin.z)));
}

#[test]
fn test_same_seed_same_world() {
    let registry = iron_registry(
        VeinType::new(vec![STONE], WeightedList::single(IRON))
            .with_rarity(2)
            .with_count(2)
            .with_density(40.0),
    );
    let config = GenerationConfig::default();
    let generate = |seed: u64| {
        let placer = VeinPlacer::new(&registry, &config, WorldSeed::new(seed));
        let mut world = stone_world();
        for chunk in world.chunks().collect::<Vec<_>>() {
            placer.place_chunk(&mut world, OVERWORLD, chunk);
        }
        world
    };

    let a = generate(5);
    let b = generate(5);
    assert_eq!(a.as_bytes(), b.as_bytes());
    assert!(a.count(IRON) > 0);

    let c = generate(6);
    assert_ne!(a.as_bytes(), c.as_bytes());
}

/// Veins crossing chunk borders do not depend on generation order.
#[test]
fn test_generation_order_does_not_matter() {
    let registry = iron_registry(
        VeinType::new(vec![STONE], WeightedList::single(IRON))
            .with_rarity(1)
            .with_size(30, 6)
            .with_density(60.0),
    );
    let config = GenerationConfig::default();
    let placer = VeinPlacer::new(&registry, &config, WorldSeed::new(31_337));

    let mut forward = stone_world();
    let chunks: Vec<_> = forward.chunks().collect();
    for &chunk in &chunks {
        placer.place_chunk(&mut forward, OVERWORLD, chunk);
    }

    let mut backward = stone_world();
    for &chunk in chunks.iter().rev() {
        placer.place_chunk(&mut backward, OVERWORLD, chunk);
    }

    assert_eq!(forward.as_bytes(), backward.as_bytes());
}

/// Chunks generated on separate threads match a sequential pass.
#[test]
fn test_parallel_chunks_match_sequential() {
    let registry = iron_registry(
        VeinType::new(vec![STONE], WeightedList::single(IRON))
            .with_rarity(1)
            .with_density(50.0),
    );
    let config = GenerationConfig::default();
    let placer = VeinPlacer::new(&registry, &config, WorldSeed::new(8));

    let mut sequential = stone_world();
    let chunks: Vec<_> = sequential.chunks().collect();
    for &chunk in &chunks {
        placer.place_chunk(&mut sequential, OVERWORLD, chunk);
    }

    let template = stone_world();
    let parallel: Vec<(ChunkPos, MemoryWorld)> = std::thread::scope(|scope| {
        let handles: Vec<_> = chunks
            .iter()
            .map(|&chunk| {
                let mut world = template.clone();
                scope.spawn(move || {
                    placer.place_chunk(&mut world, OVERWORLD, chunk);
                    (chunk, world)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (chunk, world) in parallel {
        for pos in world.positions_in_chunk(chunk) {
            assert_eq!(world.block_state(pos), sequential.block_state(pos), "mismatch at {pos}");
        }
    }
}

#[test]
fn test_dimension_default_is_configurable() {
    let registry = iron_registry(VeinType::new(vec![STONE], WeightedList::single(IRON)).with_rarity(1));
    let config = GenerationConfig {
        default_dimension: "mymod:caves".to_string(),
        ..GenerationConfig::default()
    };
    let placer = VeinPlacer::new(&registry, &config, WorldSeed::new(1));
    let world = stone_world();

    assert!(placer.instances_for_chunk(&world, OVERWORLD, ChunkPos::new(0, 0)).is_empty());
    assert!(!placer.instances_for_chunk(&world, "mymod:caves", ChunkPos::new(0, 0)).is_empty());
}
