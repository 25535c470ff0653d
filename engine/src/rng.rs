use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded RNG so any game can be replayed from its logged seed.
pub struct GameRng {
    rng: StdRng,
    seed: u64,
}

impl GameRng {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_yields_the_same_draws() {
        let mut a = GameRng::new(42);
        let mut b = GameRng::new(42);
        for _ in 0..32 {
            let x: usize = a.random_range(0..1000);
            let y: usize = b.random_range(0..1000);
            assert_eq!(x, y);
        }
    }

    #[test]
    fn test_seed_is_reported_back() {
        let rng = GameRng::new(7);
        assert_eq!(rng.seed(), 7);
    }
}
