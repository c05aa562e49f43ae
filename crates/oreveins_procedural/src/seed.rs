//! # Seeds and Random Streams
//!
//! Every random draw the engine makes comes from a stream derived from
//! `(world seed, dimension, chunk)`. Nothing else feeds the streams, so a
//! chunk's ore is independent of thread scheduling and of the order in which
//! the host generates chunks.
//!
//! ## Derivation
//!
//! ```text
//! stream(seed, dimension, chunk, vein) =
//!     ChaCha8(seed.for_chunk(dimension, chunk).salted(vein))
//! ```
//!
//! `derive` is a multiply-xorshift mix; ChaCha8 expands the final 64 bits.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use oreveins_shared::ChunkPos;

/// The random stream type handed to placement.
pub type VeinRng = ChaCha8Rng;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01B3;

/// FNV-1a over a byte string.
#[inline]
const fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// World seed for deterministic generation.
///
/// All vein placement derives from this seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WorldSeed(u64);

impl WorldSeed {
    /// Creates a new world seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose.
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }

    /// Derives a sub-seed keyed by a name (a vein type, a rule).
    #[inline]
    #[must_use]
    pub const fn salted(self, name: &str) -> Self {
        self.derive(fnv1a(name.as_bytes()))
    }

    /// The seed of one chunk column in one dimension.
    ///
    /// Pure function of its inputs: `seed(global, dimension, x, z)`.
    #[inline]
    #[must_use]
    pub const fn for_chunk(self, dimension: &str, chunk: ChunkPos) -> Self {
        // Both coordinates packed losslessly into one word.
        let packed = ((chunk.x as u32 as u64) << 32) | (chunk.z as u32 as u64);
        self.salted(dimension).derive(packed)
    }

    /// Starts a random stream from this seed.
    #[inline]
    #[must_use]
    pub fn rng(self) -> VeinRng {
        ChaCha8Rng::seed_from_u64(self.0)
    }
}

impl Default for WorldSeed {
    fn default() -> Self {
        Self(0xDEAD_BEEF_CAFE_BABE)
    }
}

/// The draws the engine needs from a random source.
///
/// Implemented for every [`RngCore`]; hosts that need to replay their own
/// generator can implement it directly.
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`. `bound` must be positive.
    fn next_int(&mut self, bound: u32) -> u32;

    /// Uniform float in `[0, 1)`.
    fn next_float(&mut self) -> f32;

    /// Fresh 64 bits, used to seed child streams.
    fn next_seed(&mut self) -> u64;
}

impl<R: RngCore> RandomSource for R {
    #[inline]
    fn next_int(&mut self, bound: u32) -> u32 {
        self.gen_range(0..bound)
    }

    #[inline]
    fn next_float(&mut self) -> f32 {
        self.gen::<f32>()
    }

    #[inline]
    fn next_seed(&mut self) -> u64 {
        self.next_u64()
    }
}
