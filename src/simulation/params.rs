use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::ConfigError;
use super::evolution::GenePool;

/// Simulation parameters that control arena layout, cohorts and evolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Arena width.
    pub width: f32,
    /// Arena height.
    pub height: f32,
    /// Distance an agent may travel past the arena edge before it is off-screen.
    pub arena_margin: f32,
    /// Agents spawn at `height - spawn_offset`.
    pub spawn_offset: f32,
    /// Vertical position of every target.
    pub target_y: f32,

    /// Cohort size of the classic race (the last agent is the self agent).
    pub classic_cohort_size: usize,
    /// Target size of the classic race.
    pub classic_target_size: f32,
    /// Vertical speed range `[min, max)` of classic agents.
    pub classic_speed_range: (f32, f32),
    /// Wiggle amplitude of classic agents.
    pub classic_wiggle: f32,
    /// Noise offset advance per tick for classic agents.
    pub classic_noise_step: f32,

    /// Range `[min, max)` of the per-attempt vigor draw.
    pub vigor_range: (f32, f32),
    /// Range `[min, max)` of the per-attempt population diversity draw.
    pub diversity_range: (f32, f32),
    /// Range `[min, max)` of the per-attempt target size draw.
    pub target_size_range: (f32, f32),
    /// Largest cohort an attempt may draw (cohort sizes are `1..=max_attempt_cohort`).
    pub max_attempt_cohort: usize,
    /// Lower bound on an attempt's agent speed.
    pub min_attempt_speed: f32,
    /// Starting value of the immune strength control, in percent.
    pub immune_strength: f32,

    /// Number of targets in the evolution race.
    pub num_targets: usize,
    /// Target size in the evolution race.
    pub evolution_target_size: f32,
    /// Cohort size of each generation.
    pub evolution_cohort_size: usize,
    /// Half-width of the uniform mutation applied to each gene.
    pub mutation_rate: f32,
    /// Gene pool used for the first generation and after an extinction.
    pub baseline_pool: GenePool,
    /// Noise offset advance per tick for evolving agents.
    pub evolution_noise_step: f32,

    /// Frames to wait on a results screen before an automatic restart.
    pub restart_delay: u32,
    /// Number of generation records kept for plotting.
    pub max_history: usize,
    /// Number of entries kept in the event log.
    pub max_events: usize,
    /// Seed for the random source. `None` picks one from the OS.
    pub seed: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            arena_margin: 20.0,
            spawn_offset: 20.0,
            target_y: 80.0,

            classic_cohort_size: 2000,
            classic_target_size: 50.0,
            classic_speed_range: (2.0, 4.0),
            classic_wiggle: 1.0,
            classic_noise_step: 0.05,

            vigor_range: (2.0, 5.0),
            diversity_range: (0.1, 2.0),
            target_size_range: (20.0, 80.0),
            max_attempt_cohort: 500,
            min_attempt_speed: 0.5,
            immune_strength: 30.0,

            num_targets: 2,
            evolution_target_size: 35.0,
            evolution_cohort_size: 200,
            mutation_rate: 0.3,
            baseline_pool: GenePool::BASELINE,
            evolution_noise_step: 0.1,

            restart_delay: 120,
            max_history: 500,
            max_events: 20,
            seed: None,
        }
    }
}

impl Params {
    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads parameters from a JSON file. Fields missing from the file keep their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let params = serde_json::from_str(&json)?;
        Ok(params)
    }
}
