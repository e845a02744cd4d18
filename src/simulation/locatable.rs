//! Trait for entities that have a position in the arena.

use ndarray::Array1;

/// Trait for entities with a 2D position.
///
/// Implemented by [`Agent`](super::agent::Agent) and [`Target`](super::target::Target)
/// so that distance checks can be written once.
pub trait Locatable {
    /// Returns a reference to the entity's position.
    fn pos(&self) -> &Array1<f32>;

    /// Returns a mutable reference to the entity's position.
    fn pos_mut(&mut self) -> &mut Array1<f32>;
}
