use rand::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    /// Same seed, same sequence.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_bool(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sequences_repeat() {
        let mut a = Random::from_seed(7);
        let mut b = Random::from_seed(7);
        let first: Vec<bool> = (0..64).map(|_| a.next_bool(0.5)).collect();
        let second: Vec<bool> = (0..64).map(|_| b.next_bool(0.5)).collect();
        assert_eq!(first, second);
    }
}
