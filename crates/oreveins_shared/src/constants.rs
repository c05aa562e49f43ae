//! # World Constants
//!
//! Values baked into the placement engine. Changing any of them changes
//! where every vein lands in an existing world.

// =============================================================================
// WORLD LAYOUT
// =============================================================================

/// Chunk width/depth in blocks.
pub const CHUNK_SIZE: i32 = 16;

/// log2 of [`CHUNK_SIZE`].
pub const CHUNK_SHIFT: u32 = 4;

// =============================================================================
// VEIN LIMITS
// =============================================================================

/// Largest `horizontal_size` or `vertical_size` a vein type may have.
///
/// Keeps the footprint arithmetic in range and the chunk search radius at
/// most 17.
pub const MAX_VEIN_SIZE: i32 = 256;

/// Largest `max_y` a vein type may have.
pub const MAX_VEIN_Y: i32 = 4096;

// =============================================================================
// NAMING
// =============================================================================

/// Namespace assumed for block and biome names written without one.
pub const NAMESPACE: &str = "minecraft";

/// Dimension a vein type spawns in when it has no dimension filter.
///
/// This is only the default of `GenerationConfig::default_dimension`;
/// hosts with a different primary world override it there.
pub const DEFAULT_DIMENSION: &str = "minecraft:overworld";
