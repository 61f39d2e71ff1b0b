//! Seedable deterministic randomness for attack demos.
//!
//! The attacks draw plaintexts through this wrapper rather than any
//! implicit global RNG, so that a fixed seed reproduces bit-identical
//! recovered-key dictionaries across machines.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct BlockRng(ChaCha8Rng);

impl BlockRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Draws a uniformly random 64-bit block.
    pub fn next_block(&mut self) -> u64 {
        self.0.next_u64()
    }
}
