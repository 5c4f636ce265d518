//! Random number generation for level layout
//!
//! Every random draw made by the layout core goes through [`RandomSource`],
//! so a seeded [`GameRng`] reproduces sizes, sampled cells, door centers and
//! tunnels exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Source of randomness consumed by the layout core.
///
/// Draw order matters: the core calls these in a fixed sequence so that a
/// fixed stream regenerates the same level.
pub trait RandomSource {
    /// Uniform integer in `[lo, hi)`. Returns `lo` when the range is empty.
    fn int(&mut self, lo: i32, hi: i32) -> i32;

    /// Uniform float in `[0, 1)`.
    fn float(&mut self) -> f32;

    /// Uniform float in `[0, upper)`.
    fn float_to(&mut self, upper: f32) -> f32 {
        self.float() * upper
    }

    /// Returns true with probability `percent / 100`.
    fn chance(&mut self, percent: f32) -> bool {
        self.float() * 100.0 < percent
    }
}

/// Layout random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
/// Note: RNG state is not serialized - only the seed round-trips.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

// Custom serialization - only serialize seed, recreate RNG on deserialize
impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.seed.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(GameRng::new(seed))
    }
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn int(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    fn float(&mut self) -> f32 {
        self.rng.r#gen::<f32>()
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
