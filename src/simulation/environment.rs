//! Randomized conditions of a single attempt.

use serde::{Deserialize, Serialize};

use super::agent::Motion;
use super::params::Params;
use super::rng::RandomSource;

/// Conditions drawn fresh at the start of every attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Overall swimming strength. Drives mean speed and wiggle.
    pub vigor: f32,
    /// Spread of agent speeds around `vigor`.
    pub diversity: f32,
    /// Size of the single target.
    pub target_size: f32,
    /// Percent chance, in `[0, 100]`, that an agent is culled at spawn.
    pub immune_strength: f32,
    /// Number of agents in the attempt.
    pub cohort_size: usize,
}

impl Environment {
    /// Draws a new environment. `immune_strength` comes from the UI and is clamped to `[0, 100]`.
    pub fn draw(params: &Params, immune_strength: f32, rng: &mut RandomSource) -> Self {
        let vigor = rng.uniform(params.vigor_range.0, params.vigor_range.1);
        let diversity = rng.uniform(params.diversity_range.0, params.diversity_range.1);
        let target_size = rng.uniform(params.target_size_range.0, params.target_size_range.1);
        let cohort_size = rng
            .uniform(1.0, params.max_attempt_cohort as f32 + 1.0)
            .floor() as usize;

        Self {
            vigor,
            diversity,
            target_size,
            immune_strength: immune_strength.clamp(0.0, 100.0),
            cohort_size,
        }
    }

    /// Draws the motion of one agent under these conditions.
    pub fn motion(&self, min_speed: f32, rng: &mut RandomSource) -> Motion {
        let low = (self.vigor - self.diversity).max(min_speed);
        let high = self.vigor + self.diversity;
        Motion {
            speed: rng.uniform(low, high),
            wiggle: map_clamped(self.vigor, (2.0, 5.0), (1.0, 4.0)),
            noise_step: map_clamped(self.vigor, (2.0, 5.0), (0.08, 0.15)),
        }
    }
}

/// Linearly maps `value` from one range onto another, clamping to the output range.
pub fn map_clamped(value: f32, from: (f32, f32), to: (f32, f32)) -> f32 {
    let t = ((value - from.0) / (from.1 - from.0)).clamp(0.0, 1.0);
    to.0 + t * (to.1 - to.0)
}
