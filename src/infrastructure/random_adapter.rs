//! Random number generation adapter.
//!
//! Implements `RandomPort` on top of a `rand` generator, seeded from OS
//! entropy or from a configured seed when plays must be reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::application::ports::outbound::RandomPort;

/// Production random number generator backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct StdRngAdapter {
    rng: StdRng,
}

impl StdRngAdapter {
    /// Generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible generator, useful when replaying a session.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when a seed is configured, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl RandomPort for StdRngAdapter {
    fn random_f64(&mut self) -> f64 {
        self.rng.gen()
    }
}
