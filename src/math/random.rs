//! Seeded uniform random stream shared by the stochastic operators
//!
//! The stream is passed explicitly to every operator call, so one seed and
//! one step sequence always produce the same draws in the same order.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Deterministic source of uniform draws in `[-1, 1)`
#[derive(Debug, Clone)]
pub struct NoiseSource {
    rng: StdRng,
    draws: u64,
}

impl NoiseSource {
    /// Create a deterministic stream from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// Next uniform draw in `[-1, 1)`
    pub fn next_signed(&mut self) -> f64 {
        self.draws += 1;
        self.rng.random::<f64>() * 2.0 - 1.0
    }

    /// Draw `count` values in sequence
    pub fn draw(&mut self, count: usize) -> Vec<f64> {
        (0..count).map(|_| self.next_signed()).collect()
    }

    /// Number of values drawn so far
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}
