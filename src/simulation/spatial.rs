//! Spatial indexing of targets for capture queries.
//!
//! Targets never move during a race, so the KD-tree is built once per race and
//! queried by every racing agent on every tick.

use kdtree::distance::squared_euclidean;
use kdtree::{ErrorKind as KdTreeError, KdTree};
use ndarray::Array1;

use super::target::Target;

/// Type alias for 2D spatial KD-tree used for efficient neighbor queries.
pub type Tree2D = KdTree<f32, usize, Vec<f32>>;

const BUCKET_SIZE: usize = 16;

/// KD-tree over target positions.
#[derive(Debug)]
pub struct TargetIndex {
    /// `None` when a target position could not be indexed.
    tree: Option<Tree2D>,
    /// Largest capture reach of any indexed target.
    reach: f32,
    /// Number of indexed targets.
    len: usize,
}

impl TargetIndex {
    /// Builds the index for a race's targets.
    ///
    /// Targets with non-finite positions make the index fall back to a linear scan.
    pub fn build(targets: &[Target]) -> Self {
        let reach = targets.iter().map(Target::reach).fold(0.0_f32, f32::max);
        Self {
            tree: build_tree(targets, |t| t.pos.to_vec()).ok(),
            reach,
            len: targets.len(),
        }
    }

    /// Number of indexed targets.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Checks whether the index holds no targets.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Indices of targets that may be within capture reach of `pos`, in ascending order.
    ///
    /// The result is a superset of the capturable targets; callers still apply the
    /// exact distance test.
    pub fn candidates(&self, pos: &Array1<f32>) -> Vec<usize> {
        let found = self.tree.as_ref().map(|tree| {
            tree.within(&pos.to_vec(), self.reach.powi(2), &squared_euclidean)
                .map(|hits| hits.into_iter().map(|(_, &idx)| idx).collect::<Vec<_>>())
        });

        match found {
            Some(Ok(mut indices)) => {
                indices.sort_unstable();
                indices
            }
            _ => (0..self.len).collect(),
        }
    }
}

/// Helper function to build a KD-tree from a collection of items.
fn build_tree<T>(items: &[T], get_pos: impl Fn(&T) -> Vec<f32>) -> Result<Tree2D, KdTreeError> {
    let mut tree = KdTree::with_capacity(2, BUCKET_SIZE);
    for (i, item) in items.iter().enumerate() {
        tree.add(get_pos(item), i)?;
    }
    Ok(tree)
}
