//! Seedable randomness shared by every stochastic decision in a race.
//!
//! Discrete draws (spawn positions, speeds, culling, mutation, outcome rolls)
//! come from a [`SmallRng`]. The lateral wiggle of agents comes from a smooth
//! 1D Perlin field so that consecutive ticks of one agent stay continuous.

use libnoise::{Generator, ImprovedPerlin, Source};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Smooth, seeded 1D noise in `[-1, 1]`.
///
/// Sampling is a pure function of the offset, so the field can be read from
/// many threads at once.
pub struct NoiseField {
    seed: u64,
    generator: ImprovedPerlin<1>,
}

impl NoiseField {
    /// Builds the field for a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            generator: Source::<1>::improved_perlin(seed),
        }
    }

    /// Samples the field at `offset`, clamped to `[-1, 1]`.
    pub fn sample(&self, offset: f32) -> f32 {
        (self.generator.sample([f64::from(offset)]) as f32).clamp(-1.0, 1.0)
    }

    /// Seed the field was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}

/// Seeded random source used for all draws of a simulation run.
#[derive(Debug)]
pub struct RandomSource {
    seed: u64,
    rng: SmallRng,
    noise: NoiseField,
}

impl RandomSource {
    /// Creates a deterministic source from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
            noise: NoiseField::new(seed),
        }
    }

    /// Creates a source from an optional seed, drawing one from the OS if absent.
    pub fn from_seed_or_entropy(seed: Option<u64>) -> Self {
        Self::new(seed.unwrap_or_else(rand::random))
    }

    /// Seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw in `[low, high)`.
    ///
    /// Returns `low` when the range is empty or its span does not fit in an `f32`.
    pub fn uniform(&mut self, low: f32, high: f32) -> f32 {
        if low < high && (high - low).is_finite() {
            self.rng.random_range(low..high)
        } else {
            low
        }
    }

    /// Uniform draw in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// The shared noise field.
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }
}
