//! Capture zones ("eggs") that agents race towards.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::locatable::Locatable;

/// A fixed capture zone.
///
/// `fertilized` and `captured_by` are set together, once, by the first agent
/// that comes strictly closer than half the target's size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Index in the race's target list. Ties between targets are broken by this order.
    pub id: usize,
    /// Center of the zone.
    pub pos: Array1<f32>,
    /// Diameter of the zone. Capture needs a distance below half of it.
    pub capture_radius: f32,
    /// Whether an agent already captured this target.
    pub fertilized: bool,
    /// Id of the capturing agent.
    pub captured_by: Option<usize>,
}

impl Target {
    /// Creates an unfertilized target.
    pub fn new(id: usize, x: f32, y: f32, capture_radius: f32) -> Self {
        Self {
            id,
            pos: Array1::from_vec(vec![x, y]),
            capture_radius,
            fertilized: false,
            captured_by: None,
        }
    }

    /// Lays out `count` targets evenly across `width` at height `y`.
    pub fn row(count: usize, width: f32, y: f32, capture_radius: f32) -> Vec<Self> {
        let spacing = width / (count as f32 + 1.0);
        (0..count)
            .map(|i| Self::new(i, (i + 1) as f32 * spacing, y, capture_radius))
            .collect()
    }

    /// Distance below which an agent captures this target.
    pub fn reach(&self) -> f32 {
        self.capture_radius / 2.0
    }

    /// Marks the target as captured by `agent_id`.
    ///
    /// Returns `false`, leaving the target untouched, if it was already fertilized.
    pub fn fertilize(&mut self, agent_id: usize) -> bool {
        if self.fertilized {
            return false;
        }
        self.fertilized = true;
        self.captured_by = Some(agent_id);
        true
    }

    /// Clears the capture state for a new race.
    pub fn reset(&mut self) {
        self.fertilized = false;
        self.captured_by = None;
    }
}

impl Locatable for Target {
    fn pos(&self) -> &Array1<f32> {
        &self.pos
    }

    fn pos_mut(&mut self) -> &mut Array1<f32> {
        &mut self.pos
    }
}
