use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::evolution::GenePool;

/// Summary of one finished generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Generation number (the first one is 1).
    pub generation: u32,
    /// Number of targets captured.
    pub winners: usize,
    /// Number of targets in the race.
    pub targets: usize,
    /// Gene pool derived from this generation's winners.
    pub pool: GenePool,
}

impl GenerationRecord {
    /// Fraction of targets captured, `0.0` for a race without targets.
    pub fn success_rate(&self) -> f64 {
        if self.targets == 0 {
            0.0
        } else {
            self.winners as f64 / self.targets as f64
        }
    }
}

/// Bounded history of generation summaries, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationHistory {
    /// Recent generations
    pub records: VecDeque<GenerationRecord>,
    /// Maximum number of generations to track
    pub max_history: usize,
}

impl Default for GenerationHistory {
    fn default() -> Self {
        Self::new(500)
    }
}

impl GenerationHistory {
    /// Creates an empty history keeping at most `max_history` records.
    pub fn new(max_history: usize) -> Self {
        Self {
            records: VecDeque::new(),
            max_history,
        }
    }

    /// Record a finished generation, dropping the oldest one if full
    pub fn record(&mut self, record: GenerationRecord) {
        self.records.push_back(record);
        while self.records.len() > self.max_history {
            self.records.pop_front();
        }
    }

    /// Most recent record
    pub fn latest(&self) -> Option<&GenerationRecord> {
        self.records.back()
    }

    /// Average success rate over the tracked generations
    pub fn avg_success_rate(&self) -> f64 {
        if self.records.is_empty() {
            0.0
        } else {
            self.records
                .iter()
                .map(GenerationRecord::success_rate)
                .sum::<f64>()
                / self.records.len() as f64
        }
    }

    /// Number of tracked generations with no winner at all
    pub fn extinction_count(&self) -> usize {
        self.records.iter().filter(|r| r.winners == 0).count()
    }

    /// `(generation, avg speed)` points for plotting
    pub fn speed_points(&self) -> Vec<[f64; 2]> {
        self.records
            .iter()
            .map(|r| [f64::from(r.generation), f64::from(r.pool.avg_speed)])
            .collect()
    }

    /// `(generation, avg agility)` points for plotting
    pub fn agility_points(&self) -> Vec<[f64; 2]> {
        self.records
            .iter()
            .map(|r| [f64::from(r.generation), f64::from(r.pool.avg_agility)])
            .collect()
    }

    /// Clears all records
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
