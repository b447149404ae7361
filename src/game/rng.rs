use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG for apple placement and the initial snake position. Keeping the
/// seed around makes a run reproducible from its logs.
pub struct EngineRng {
    rng: StdRng,
    seed: u64,
}

impl EngineRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }
}
