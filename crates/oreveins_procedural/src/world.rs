//! # World Access
//!
//! The placement engine never owns chunk storage. It reads block states and
//! biomes through [`WorldView`] and writes ore through [`WorldWriter`].
//!
//! [`MemoryWorld`] is a flat in-memory implementation covering a rectangle
//! of chunks. Hosts use their own storage; tests, benches and the preview
//! binary use this one.

use oreveins_shared::{Biome, BlockPos, BlockState, ChunkPos, CHUNK_SIZE};

/// Read access to the host world.
pub trait WorldView {
    /// Block state at `pos`. Positions the host does not have read as air.
    fn block_state(&self, pos: BlockPos) -> BlockState;

    /// Biome at `pos`.
    fn biome(&self, pos: BlockPos) -> &Biome;
}

/// Write access to the host world.
pub trait WorldWriter: WorldView {
    /// Replaces the block state at `pos`.
    fn set_block_state(&mut self, pos: BlockPos, state: BlockState);
}

/// A rectangle of chunks held in memory, indexed `[y][z][x]`.
#[derive(Clone, Debug)]
pub struct MemoryWorld {
    min_chunk: ChunkPos,
    /// Extent in blocks along X and Z.
    width: i32,
    depth: i32,
    height: i32,
    blocks: Vec<BlockState>,
    /// Index into `biome_table` per column, indexed `[z][x]`.
    columns: Vec<u16>,
    biome_table: Vec<Biome>,
}

impl MemoryWorld {
    /// Creates an all-air world spanning `min_chunk..=max_chunk` and
    /// heights `0..height`, every column in `biome`.
    #[must_use]
    pub fn new(min_chunk: ChunkPos, max_chunk: ChunkPos, height: i32, biome: Biome) -> Self {
        let width = (max_chunk.x - min_chunk.x + 1).max(0) * CHUNK_SIZE;
        let depth = (max_chunk.z - min_chunk.z + 1).max(0) * CHUNK_SIZE;
        let height = height.max(0);
        let volume = (width * depth * height) as usize;

        Self {
            min_chunk,
            width,
            depth,
            height,
            blocks: vec![BlockState::AIR; volume],
            columns: vec![0; (width * depth) as usize],
            biome_table: vec![biome],
        }
    }

    /// Creates a world of `radius` chunks around `center`, filled with
    /// `stone` from y = 0 up to (excluding) `surface`.
    #[must_use]
    pub fn stone_filled(
        center: ChunkPos,
        radius: i32,
        height: i32,
        surface: i32,
        stone: BlockState,
        biome: Biome,
    ) -> Self {
        let mut world = Self::new(
            ChunkPos::new(center.x - radius, center.z - radius),
            ChunkPos::new(center.x + radius, center.z + radius),
            height,
            biome,
        );
        world.fill_layers(0, surface, stone);
        world
    }

    /// Chunks covered by this world, row-major.
    pub fn chunks(&self) -> impl Iterator<Item = ChunkPos> + '_ {
        let chunks_x = self.width / CHUNK_SIZE;
        let chunks_z = self.depth / CHUNK_SIZE;
        (0..chunks_z).flat_map(move |z| {
            (0..chunks_x).map(move |x| ChunkPos::new(self.min_chunk.x + x, self.min_chunk.z + z))
        })
    }

    /// Sets every block with `min_y <= y < max_y` to `state`.
    pub fn fill_layers(&mut self, min_y: i32, max_y: i32, state: BlockState) {
        let layer = (self.width * self.depth) as usize;
        let start = min_y.clamp(0, self.height) as usize * layer;
        let end = max_y.clamp(0, self.height) as usize * layer;
        if start < end {
            self.blocks[start..end].fill(state);
        }
    }

    /// Assigns a biome to one block column.
    pub fn set_biome(&mut self, x: i32, z: i32, biome: Biome) {
        let Some(column) = self.column_index(x, z) else {
            return;
        };
        let id = match self.biome_table.iter().position(|b| *b == biome) {
            Some(id) => id,
            None => {
                self.biome_table.push(biome);
                self.biome_table.len() - 1
            }
        };
        self.columns[column] = id as u16;
    }

    /// Assigns a biome to every column of a chunk.
    pub fn set_chunk_biome(&mut self, chunk: ChunkPos, biome: &Biome) {
        for z in chunk.min_block_z()..=chunk.max_block_z() {
            for x in chunk.min_block_x()..=chunk.max_block_x() {
                self.set_biome(x, z, biome.clone());
            }
        }
    }

    /// Number of blocks equal to `state`.
    #[must_use]
    pub fn count(&self, state: BlockState) -> usize {
        self.blocks.iter().filter(|&&b| b == state).count()
    }

    /// Number of blocks equal to `state` inside one chunk.
    #[must_use]
    pub fn count_in_chunk(&self, chunk: ChunkPos, state: BlockState) -> usize {
        self.positions_in_chunk(chunk)
            .filter(|&pos| self.block_state(pos) == state)
            .count()
    }

    /// Every position inside one chunk, bottom to top.
    pub fn positions_in_chunk(&self, chunk: ChunkPos) -> impl Iterator<Item = BlockPos> {
        let height = self.height;
        (0..height).flat_map(move |y| {
            (chunk.min_block_z()..=chunk.max_block_z()).flat_map(move |z| {
                (chunk.min_block_x()..=chunk.max_block_x()).map(move |x| BlockPos::new(x, y, z))
            })
        })
    }

    /// Raw block data, for byte-exact comparisons between runs.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.blocks)
    }

    fn column_index(&self, x: i32, z: i32) -> Option<usize> {
        let lx = x - self.min_chunk.min_block_x();
        let lz = z - self.min_chunk.min_block_z();
        if lx < 0 || lz < 0 || lx >= self.width || lz >= self.depth {
            return None;
        }
        Some((lz * self.width + lx) as usize)
    }

    fn block_index(&self, pos: BlockPos) -> Option<usize> {
        if pos.y < 0 || pos.y >= self.height {
            return None;
        }
        let column = self.column_index(pos.x, pos.z)?;
        Some(pos.y as usize * (self.width * self.depth) as usize + column)
    }
}

impl WorldView for MemoryWorld {
    #[inline]
    fn block_state(&self, pos: BlockPos) -> BlockState {
        self.block_index(pos)
            .map_or(BlockState::AIR, |index| self.blocks[index])
    }

    /// Columns outside the world report the biome the world was created with.
    fn biome(&self, pos: BlockPos) -> &Biome {
        let id = self
            .column_index(pos.x, pos.z)
            .map_or(0, |column| self.columns[column]);
        &self.biome_table[id as usize]
    }
}

impl WorldWriter for MemoryWorld {
    #[inline]
    fn set_block_state(&mut self, pos: BlockPos, state: BlockState) {
        if let Some(index) = self.block_index(pos) {
            self.blocks[index] = state;
        }
    }
}
