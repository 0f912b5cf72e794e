//! Seeded random streams.
//!
//! Game states carry a `seed` and a step counter instead of a live RNG, so a
//! state stays plain data. Every random event (a shuffle, a dice roll, a bag
//! reshuffle) bumps the step and draws from its own ChaCha8 stream, which makes
//! whole games replayable from the seed alone.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const STREAM_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Use the configured seed, or draw one from the thread RNG.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| rand::rng().random())
}

/// The deterministic stream for event number `step` of the game seeded with `seed`.
pub fn stream(seed: u64, step: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.wrapping_add(step.wrapping_mul(STREAM_STRIDE)))
}
