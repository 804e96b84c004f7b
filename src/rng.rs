// src/rng.rs
//! Random Number Generation for Monte Carlo Simulations
//!
//! Every path owns an independent `StdRng` seeded with `base_seed + path_id`.
//! The draws of a path therefore depend only on the seed and the path index,
//! never on how rayon schedules paths across threads.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// RNG factory for reproducible parallel simulations
#[derive(Debug, Clone, Copy)]
pub struct RngFactory {
    base_seed: u64,
}

impl RngFactory {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    /// Create the RNG for a specific path
    pub fn create_std_rng(&self, path_id: u64) -> StdRng {
        seed_rng_from_u64(self.base_seed.wrapping_add(path_id))
    }
}

pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}
