//! A single, process-local seeded PRNG. One instance is created from the
//! user's seed at startup and threaded through every heuristic that needs
//! randomized order; no other part of the engine touches global random
//! state.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub struct Rng(StdRng);

impl Rng {
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// A uniformly random permutation of `items`, in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.0);
    }
}
