//! Seeded RNG for service-time sampling.
//!
//! Randomness is drawn in exactly one place: when the arrivals table is
//! materialized, each passenger without a recorded duration gets one sample,
//! in manifest order, from a single `SimRng`.  The tick loop never touches an
//! RNG, so every optimizer re-run over the same table is reproducible.

use rand::distributions::Distribution;
use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Draw one value from a `rand_distr` distribution.
    #[inline]
    pub fn sample<T, D: Distribution<T>>(&mut self, dist: &D) -> T {
        self.0.sample(dist)
    }

    #[inline]
    pub fn gen_range<T: SampleUniform, R: SampleRange<T>>(&mut self, range: R) -> T {
        self.0.gen_range(range)
    }
}
