//! Deterministic per-float and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each float gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (float_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive float IDs uniformly across the seed space.
//! Floats never share RNG state, so stochastic advection gives identical
//! trajectories whether the step runs sequentially or on Rayon.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::FloatId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── FloatRng ──────────────────────────────────────────────────────────────────

/// Per-float deterministic RNG.
///
/// Stored in a parallel `Vec<FloatRng>` alongside the fleet's SoA arrays.
pub struct FloatRng(SmallRng);

impl FloatRng {
    /// Seed deterministically from the run's global seed and a float ID.
    pub fn new(global_seed: u64, float: FloatId) -> Self {
        let seed = global_seed ^ (float.0 as u64).wrapping_mul(MIXING_CONSTANT);
        FloatRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Zero-mean, unit-variance noise (uniform on `[-√3, √3)`).
    #[inline]
    pub fn unit_noise(&mut self) -> f64 {
        const SQRT_3: f64 = 1.732_050_807_568_877_2;
        self.0.gen_range(-SQRT_3..SQRT_3)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (deployment plan generation).
///
/// Used only in single-threaded setup code.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }
}
