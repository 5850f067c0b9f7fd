//! Seeded uniform randomness.
//!
//! Every draw in this crate consumes values in `[0, 1)`. [`UniformSource`] is the
//! generator a [`Sampler`](crate::Sampler) owns: a ChaCha8 stream keyed by a `u64`
//! seed, so two sources built from the same seed replay the same sequence on every
//! platform.
//!
//! The draw functions themselves are generic over `R: Rng + ?Sized`, and
//! `UniformSource` implements [`RngCore`], so it can be passed anywhere a
//! `rand` generator is expected.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A seeded, replayable stream of uniform values.
#[derive(Debug, Clone)]
pub struct UniformSource {
    seed: u64,
    rng: ChaCha8Rng,
}

impl UniformSource {
    /// Create a source keyed by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a source with a fresh non-zero seed from the thread-local generator.
    ///
    /// The chosen seed is still reported by [`seed`](Self::seed), so the stream can
    /// be replayed later.
    pub fn from_entropy() -> Self {
        let seed = rand::rng().random_range(1..=u64::MAX);
        Self::seeded(seed)
    }

    /// The seed this source was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Next value in `[0, 1)`.
    #[inline]
    pub fn normalized(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

impl RngCore for UniformSource {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    #[inline]
    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.rng.fill_bytes(dst)
    }
}
