//! Geometric utility functions for distance calculations and arena bounds.

use geo::algorithm::Distance;
use geo::{Euclidean, Point};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::locatable::Locatable;

/// Euclidean distance between two positions.
pub fn distance(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    Euclidean.distance(Point::new(a[0], a[1]), Point::new(b[0], b[1]))
}

/// Euclidean distance between two locatable entities.
pub fn distance_between(a: &impl Locatable, b: &impl Locatable) -> f32 {
    distance(a.pos(), b.pos())
}

/// Arena rectangle `[0, width] x [0, height]` grown by a margin on every side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Arena width.
    pub width: f32,
    /// Arena height.
    pub height: f32,
    /// Tolerance past each edge before a position counts as outside.
    pub margin: f32,
}

impl Arena {
    /// Creates an arena.
    pub fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// Checks whether a position lies inside the arena, margin included.
    pub fn contains(&self, pos: &Array1<f32>) -> bool {
        let (x, y) = (pos[0], pos[1]);
        x >= -self.margin
            && x <= self.width + self.margin
            && y >= -self.margin
            && y <= self.height + self.margin
    }
}
