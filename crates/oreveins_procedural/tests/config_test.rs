//! # Configuration Integration Tests
//!
//! Loads the shipped vein definitions and places them.

use oreveins_procedural::{config, BlockPalette, BlockStateParser, MemoryWorld, VeinPlacer, WorldSeed};
use oreveins_shared::{Biome, ChunkPos};

const SHIPPED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/veins.toml");

#[test]
fn test_shipped_definitions_load_cleanly() {
    let blocks = BlockPalette::vanilla();
    let loaded = config::load_path(SHIPPED, &blocks).unwrap();

    assert!(loaded.rejected.is_empty(), "rejected: {:?}", loaded.rejected);
    assert_eq!(
        loaded.registry.names().collect::<Vec<_>>(),
        ["coal", "iron", "gold", "redstone", "diamond", "emerald", "quartz", "nether_gold"]
    );
    assert!(loaded.settings.avoid_vein_cutoffs);
    assert_eq!(loaded.settings.default_dimension, "minecraft:overworld");
}

#[test]
fn test_shipped_definitions_describe() {
    let blocks = BlockPalette::vanilla();
    let loaded = config::load_path(SHIPPED, &blocks).unwrap();

    assert_eq!(
        loaded.registry.describe("iron", &blocks).unwrap(),
        "[iron: Count: 1, Rarity: 8, Y: 10 - 64, Size: 15 / 8, Density: 20.00, \
         Ores: [minecraft:iron_ore, minecraft:copper_ore], \
         Stones: [minecraft:stone, minecraft:andesite, minecraft:diorite, minecraft:granite]]"
    );
}

#[test]
fn test_shipped_definitions_generate_ore() {
    let blocks = BlockPalette::vanilla();
    let loaded = config::load_path(SHIPPED, &blocks).unwrap();
    let stone = blocks.parse("stone").unwrap();
    let netherrack = blocks.parse("netherrack").unwrap();

    let placer = VeinPlacer::new(&loaded.registry, &loaded.settings, WorldSeed::new(4242));

    let mut overworld = MemoryWorld::stone_filled(ChunkPos::new(0, 0), 4, 128, 100, stone, Biome::default());
    let mut names = Vec::new();
    for chunk in overworld.chunks().collect::<Vec<_>>() {
        let report = placer.place_chunk(&mut overworld, "minecraft:overworld", chunk);
        names.extend(report.veins.iter().filter(|v| v.blocks_placed > 0).map(|v| v.instance.name));
    }
    assert!(names.contains(&"coal"), "coal is common enough to appear in 81 chunks");
    assert!(!names.contains(&"quartz"));
    assert_eq!(overworld.count(blocks.parse("nether_quartz_ore").unwrap()), 0);

    let mut nether = MemoryWorld::stone_filled(ChunkPos::new(0, 0), 2, 128, 128, netherrack, Biome::new("nether_wastes"));
    let mut total = 0;
    for chunk in nether.chunks().collect::<Vec<_>>() {
        total += placer.place_chunk(&mut nether, "minecraft:the_nether", chunk).total_blocks();
    }
    assert!(total > 0);
    assert_eq!(nether.count(blocks.parse("coal_ore").unwrap()), 0);
}
