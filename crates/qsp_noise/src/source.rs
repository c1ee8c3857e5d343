//! Resettable random source
//!
//! Gantree: L2_Noise → SeededSource
//!
//! One optimization run owns one `SeededSource`. Resetting it before each
//! objective evaluation replays the same noise draws for every candidate
//! parameter vector, which turns the Monte Carlo objective into a
//! deterministic function of the parameters.

use qsp_core::sim;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded generator that can be rewound to its seed
/// Gantree: SeededSource // 시드 고정 난수원
#[derive(Debug, Clone)]
pub struct SeededSource {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededSource {
    /// Create from an explicit seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw a seed in `[0, SEED_UPPER_BOUND)` from an outer generator
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.gen_range(0..sim::SEED_UPPER_BOUND))
    }

    /// Seed this source replays
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewind to the start of the seeded stream
    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
    }

    /// Rewind, then hand out the generator
    pub fn reset_rng(&mut self) -> &mut ChaCha8Rng {
        self.reset();
        &mut self.rng
    }

    /// Generator at its current position
    #[inline]
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }
}

// ============================================================================
// Tests
// ============================================================================
