// src/core/seed.rs

use rand::SeedableRng;
use rand::rngs::StdRng;
use sha2::{Digest, Sha256};

/// Returns a generator seeded from the SHA-256 digest of `name`.
///
/// Each call builds a fresh generator, so the same name always produces
/// the same sequence, across runs and process restarts, with no shared
/// state between callers.
pub fn rng_for(name: &str) -> StdRng {
    let digest = Sha256::digest(name.as_bytes());
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest);
    StdRng::from_seed(seed)
}
