//! # Simplex Noise
//!
//! 2D simplex noise backing the noise rule: a vein type can restrict its
//! ore to columns where a seeded noise field exceeds a threshold, which
//! breaks up the otherwise round footprint of a vein.
//!
//! Given the same [`WorldSeed`], values are identical on every platform.

use crate::seed::WorldSeed;

/// Permutation and gradient tables, shuffled from the seed.
#[derive(Clone)]
struct PermutationTable {
    /// 256 entries doubled so lookups never wrap.
    perm: [u8; 512],
}

impl PermutationTable {
    /// 12 gradient directions for 2D simplex.
    const GRADIENTS: [[i8; 2]; 12] = [
        [1, 0], [1, 1], [0, 1], [-1, 1],
        [-1, 0], [-1, -1], [0, -1], [1, -1],
        [1, 0], [0, 1], [-1, 0], [0, -1],
    ];

    fn new(seed: WorldSeed) -> Self {
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().take(256).enumerate() {
            *slot = i as u8;
        }

        // Fisher-Yates driven by xorshift64
        let mut state = seed.value() | 1;
        for i in (1..256).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let j = (state % (i as u64 + 1)) as usize;
            perm.swap(i, j);
        }

        let (low, high) = perm.split_at_mut(256);
        high.copy_from_slice(low);

        Self { perm }
    }

    #[inline]
    fn get(&self, index: usize) -> u8 {
        self.perm[index & 511]
    }

    #[inline]
    fn gradient(hash: u8) -> [i8; 2] {
        Self::GRADIENTS[(hash % 12) as usize]
    }
}

/// 2D simplex noise generator with values in `[-1, 1]`.
///
/// O(1) per sample, no allocation.
#[derive(Clone)]
pub struct SimplexNoise {
    seed: WorldSeed,
    table: PermutationTable,
}

impl SimplexNoise {
    /// Skewing factor for the 2D simplex grid: (sqrt(3) - 1) / 2.
    const F2: f64 = 0.366_025_403_784_439;
    /// Unskewing factor: (3 - sqrt(3)) / 6.
    const G2: f64 = 0.211_324_865_405_187;

    /// Creates a new simplex noise generator from a seed.
    #[must_use]
    pub fn new(seed: WorldSeed) -> Self {
        Self {
            seed,
            table: PermutationTable::new(seed),
        }
    }

    /// The seed this generator was built from.
    #[must_use]
    pub const fn seed(&self) -> WorldSeed {
        self.seed
    }

    /// Samples the noise field at `(x, y)`.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let skew = (x + y) * Self::F2;
        let i = fast_floor(x + skew);
        let j = fast_floor(y + skew);

        let unskew = f64::from(i + j) * Self::G2;
        let x0 = x - (f64::from(i) - unskew);
        let y0 = y - (f64::from(j) - unskew);

        // Lower or upper triangle of the skewed cell
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - f64::from(i1) + Self::G2;
        let y1 = y0 - f64::from(j1) + Self::G2;
        let x2 = x0 - 1.0 + 2.0 * Self::G2;
        let y2 = y0 - 1.0 + 2.0 * Self::G2;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let i1 = i1 as usize;
        let j1 = j1 as usize;

        let g0 = self.table.get(ii + self.table.get(jj) as usize);
        let g1 = self.table.get(ii + i1 + self.table.get(jj + j1) as usize);
        let g2 = self.table.get(ii + 1 + self.table.get(jj + 1) as usize);

        70.0 * (corner(x0, y0, g0) + corner(x1, y1, g1) + corner(x2, y2, g2))
    }

    /// Fractal noise: `octaves` layers, each at `lacunarity` times the
    /// frequency and `persistence` times the amplitude of the last.
    ///
    /// Normalized back to roughly `[-1, 1]`.
    #[must_use]
    pub fn octaved(&self, x: f64, y: f64, octaves: u32, persistence: f64, lacunarity: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..octaves.max(1) {
            total += self.sample(x * frequency, y * frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= lacunarity;
        }

        total / max_amplitude
    }
}

impl std::fmt::Debug for SimplexNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplexNoise")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl PartialEq for SimplexNoise {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed
    }
}

/// Contribution of one simplex corner.
#[inline]
fn corner(x: f64, y: f64, hash: u8) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        0.0
    } else {
        let grad = PermutationTable::gradient(hash);
        let t2 = t * t;
        t2 * t2 * (x * f64::from(grad[0]) + y * f64::from(grad[1]))
    }
}

#[inline]
fn fast_floor(x: f64) -> i32 {
    let xi = x as i32;
    if x < f64::from(xi) { xi - 1 } else { xi }
}
