//! Generational selection and mutation.
//!
//! Only agents that captured a target reproduce. Their genomes are averaged
//! into a new [`GenePool`], and every agent of the next cohort draws its genes
//! from that pool plus uniform noise. There is no crossover: the floor clamps
//! in [`Genome::clamped`] are the only thing stopping the genes from collapsing.

use serde::{Deserialize, Serialize};

use super::agent::{Agent, AgentKind, Genome, Motion};
use super::rng::RandomSource;

/// Mean trait values from which the next cohort is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenePool {
    /// Mean speed of the last generation's winners.
    pub avg_speed: f32,
    /// Mean agility of the last generation's winners.
    pub avg_agility: f32,
}

impl GenePool {
    /// Pool used for the first generation and after a generation with no winners.
    pub const BASELINE: Self = Self {
        avg_speed: 3.0,
        avg_agility: 1.5,
    };

    /// Averages the winners' genomes, or returns `baseline` if there are none.
    pub fn from_winners(winners: &[Genome], baseline: Self) -> Self {
        if winners.is_empty() {
            return baseline;
        }

        let n = winners.len() as f32;
        Self {
            avg_speed: winners.iter().map(|g| g.speed).sum::<f32>() / n,
            avg_agility: winners.iter().map(|g| g.agility).sum::<f32>() / n,
        }
    }

    /// Largest mutation half-width actually drawn. Keeps the span `2 * rate` finite.
    pub const MAX_MUTATION_RATE: f32 = f32::MAX / 4.0;

    /// Draws one mutated, floor-clamped genome from the pool.
    ///
    /// Any rate is accepted. Its magnitude is capped at [`Self::MAX_MUTATION_RATE`]
    /// and a `NaN` rate counts as no mutation.
    pub fn sample(&self, mutation_rate: f32, rng: &mut RandomSource) -> Genome {
        let rate = if mutation_rate.is_nan() {
            0.0
        } else {
            mutation_rate.abs().min(Self::MAX_MUTATION_RATE)
        };
        let speed = self.avg_speed + rng.uniform(-rate, rate);
        let agility = self.avg_agility + rng.uniform(-rate, rate);
        Genome::clamped(speed, agility)
    }
}

impl Default for GenePool {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// Where a new cohort is placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnLine {
    /// Agents spawn at a uniform x in `[0, width)`.
    pub width: f32,
    /// Shared starting y.
    pub y: f32,
    /// Noise offset advance per tick.
    pub noise_step: f32,
}

/// Turns the winners of one generation into the next cohort.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationManager {
    /// Pool to fall back to after an extinction.
    pub baseline: GenePool,
    /// Half-width of the uniform mutation on each gene.
    pub mutation_rate: f32,
    /// Placement of new agents.
    pub spawn: SpawnLine,
}

impl GenerationManager {
    /// Creates a manager.
    pub fn new(baseline: GenePool, mutation_rate: f32, spawn: SpawnLine) -> Self {
        Self {
            baseline,
            mutation_rate,
            spawn,
        }
    }

    /// Builds the next gene pool from `previous_winners` and spawns `cohort_size` agents from it.
    ///
    /// The previous pool is ignored: a generation without winners resets to the baseline.
    pub fn next_cohort(
        &self,
        previous_winners: &[Genome],
        cohort_size: usize,
        rng: &mut RandomSource,
    ) -> (GenePool, Vec<Agent>) {
        let pool = GenePool::from_winners(previous_winners, self.baseline);
        let agents = self.spawn_cohort(&pool, cohort_size, rng);
        (pool, agents)
    }

    /// Spawns `cohort_size` agents whose genomes are drawn from `pool`.
    pub fn spawn_cohort(
        &self,
        pool: &GenePool,
        cohort_size: usize,
        rng: &mut RandomSource,
    ) -> Vec<Agent> {
        (0..cohort_size)
            .map(|id| {
                let genome = pool.sample(self.mutation_rate, rng);
                let motion = Motion {
                    noise_step: self.spawn.noise_step,
                    ..Motion::from(genome)
                };
                Agent::spawn(
                    id,
                    AgentKind::Rival,
                    self.spawn.width,
                    self.spawn.y,
                    motion,
                    Some(genome),
                    rng,
                )
            })
            .collect()
    }
}
