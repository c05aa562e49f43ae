//! # OreVeins
//!
//! Host integration for the ore vein placement engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                              HOST                                │
//! │   chunk generator ──┐                      ┌── command dispatch  │
//! └─────────────────────┼──────────────────────┼─────────────────────┘
//!                       v                      v
//!               ┌──────────────────────────────────────┐
//!               │ VeinHost                             │
//!               │  • BlockPalette   • VeinRegistry     │
//!               │  • WorldSeed      • GenerationConfig │
//!               └──────────┬───────────────┬───────────┘
//!                          v               v
//!                    VeinPlacer      VeinInfoCommand
//!               (oreveins_procedural)
//! ```
//!
//! ## Modules
//!
//! - `host`: Process-wide vein state and the chunk generation hook
//! - `command`: The `veininfo` diagnostics command
//! - `options`: Command-line options of the binaries

pub mod command;
pub mod host;
pub mod options;

// Re-export the engine crates
pub use oreveins_procedural as procedural;
pub use oreveins_shared as shared;

pub use command::{CommandError, VeinInfoCommand};
pub use host::VeinHost;
pub use options::{Options, OptionsError};
