//! # OreVeins Shared
//!
//! Value types used by every OreVeins crate and by host adapters.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on a host engine. Hosts convert their own
//! block, biome and position types into these at the boundary.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod biome;
pub mod block;
pub mod constants;
pub mod math;

pub use biome::Biome;
pub use block::BlockState;
pub use constants::{CHUNK_SIZE, DEFAULT_DIMENSION, MAX_VEIN_SIZE, MAX_VEIN_Y, NAMESPACE};
pub use math::{BlockPos, ChunkPos};
