//! Benchmark for the per-chunk placement pass.
//!
//! Run with: cargo bench --package oreveins_procedural --bench placement_benchmark

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use oreveins_procedural::{
    GenerationConfig, MemoryWorld, VeinPlacer, VeinRegistry, VeinShape, VeinType, WeightedList, WorldSeed,
};
use oreveins_shared::{Biome, BlockState, ChunkPos};

const STONE: BlockState = BlockState::new(1);
const IRON: BlockState = BlockState::new(2);
const GOLD: BlockState = BlockState::new(3);

fn registry() -> VeinRegistry {
    let mut registry = VeinRegistry::new();
    let ores = WeightedList::from_entries([(IRON, 3), (GOLD, 1)]).unwrap();
    registry
        .register("dense", VeinType::new(vec![STONE], ores.clone()).with_rarity(1).with_density(60.0))
        .unwrap();
    registry
        .register("wide", VeinType::new(vec![STONE], ores).with_rarity(4).with_size(40, 6))
        .unwrap();
    registry
}

fn benchmark_place_chunk(c: &mut Criterion) {
    let registry = registry();
    let config = GenerationConfig::default();
    let placer = VeinPlacer::new(&registry, &config, WorldSeed::new(42));
    let world = MemoryWorld::stone_filled(ChunkPos::new(0, 0), 0, 128, 100, STONE, Biome::default());

    c.bench_function("place_chunk_two_veins", |b| {
        b.iter_batched(
            || world.clone(),
            |mut world| black_box(placer.place_chunk(&mut world, "minecraft:overworld", ChunkPos::new(0, 0)).total_blocks()),
            BatchSize::LargeInput,
        );
    });
}

fn benchmark_instances(c: &mut Criterion) {
    let registry = registry();
    let config = GenerationConfig::default();
    let placer = VeinPlacer::new(&registry, &config, WorldSeed::new(42));
    let world = MemoryWorld::new(ChunkPos::new(0, 0), ChunkPos::new(0, 0), 1, Biome::default());

    let mut group = c.benchmark_group("instances_for_chunk");
    group.throughput(Throughput::Elements(1_000));
    group.bench_function("1000_chunks", |b| {
        b.iter(|| {
            for x in 0..1_000 {
                black_box(placer.instances_for_chunk(&world, "minecraft:overworld", ChunkPos::new(x, -x)));
            }
        });
    });
    group.finish();
}

fn benchmark_in_range(c: &mut Criterion) {
    let shape = VeinShape::new(15, 8);

    c.bench_function("in_range_31x31", |b| {
        b.iter(|| {
            let mut hits = 0u32;
            for x in -15..=15 {
                for z in -15..=15 {
                    hits += u32::from(shape.in_range(black_box(0.85), x, z));
                }
            }
            black_box(hits)
        });
    });
}

criterion_group!(benches, benchmark_place_chunk, benchmark_instances, benchmark_in_range);
criterion_main!(benches);
