//! # Host Integration
//!
//! [`VeinHost`] owns everything the host keeps for the life of the process:
//! the block palette, the loaded vein registry and the world seed. The host
//! builds it once at startup, then hands out shared references to chunk
//! generation threads and to the `veininfo` command.

use std::path::Path;

use oreveins_procedural::{
    BlockPalette, GenerationConfig, LoadedVeins, PlacementReport, RejectedVein, VeinPlacer, VeinRegistry,
    VeinResult, WorldSeed, WorldWriter,
};
use oreveins_shared::ChunkPos;

use crate::command::VeinInfoCommand;

/// Process-wide vein state.
#[derive(Debug)]
pub struct VeinHost {
    blocks: BlockPalette,
    loaded: LoadedVeins,
    seed: WorldSeed,
}

impl VeinHost {
    /// Creates a host with no veins registered.
    #[must_use]
    pub fn new(blocks: BlockPalette, seed: WorldSeed) -> Self {
        Self {
            blocks,
            loaded: LoadedVeins::new(),
            seed,
        }
    }

    /// Loads configuration files in order.
    ///
    /// Bad entries are skipped and kept in [`VeinHost::rejected`].
    ///
    /// # Errors
    ///
    /// Returns the first file that cannot be read or parsed at all.
    pub fn load_paths<I>(&mut self, paths: I) -> VeinResult<usize>
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        let mut registered = 0;
        for path in paths {
            let path = path.as_ref();
            let count = self.loaded.load_path(path, &self.blocks)?;
            tracing::info!(path = %path.display(), veins = count, "loaded vein file");
            registered += count;
        }
        Ok(registered)
    }

    /// Loads one configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be parsed at all.
    pub fn load_str(&mut self, text: &str) -> VeinResult<usize> {
        self.loaded.load_str(text, &self.blocks)
    }

    /// The block palette.
    #[must_use]
    pub const fn blocks(&self) -> &BlockPalette {
        &self.blocks
    }

    /// The vein registry.
    #[must_use]
    pub const fn registry(&self) -> &VeinRegistry {
        &self.loaded.registry
    }

    /// Generation settings from the configuration.
    #[must_use]
    pub const fn settings(&self) -> &GenerationConfig {
        &self.loaded.settings
    }

    /// Entries that failed to load.
    #[must_use]
    pub fn rejected(&self) -> &[RejectedVein] {
        &self.loaded.rejected
    }

    /// The world seed.
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// A placer over the loaded veins.
    #[must_use]
    pub const fn placer(&self) -> VeinPlacer<'_> {
        VeinPlacer::new(&self.loaded.registry, &self.loaded.settings, self.seed)
    }

    /// The chunk generation hook.
    pub fn generate_chunk<W: WorldWriter + ?Sized>(
        &self,
        world: &mut W,
        dimension: &str,
        chunk: ChunkPos,
    ) -> PlacementReport<'_> {
        self.placer().place_chunk(world, dimension, chunk)
    }

    /// The `veininfo` command.
    #[must_use]
    pub const fn command(&self) -> VeinInfoCommand<'_, BlockPalette> {
        VeinInfoCommand::new(&self.loaded.registry, &self.blocks)
    }
}
