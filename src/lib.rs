//! # Conception - Race to the Egg
//!
//! A frame-stepped particle race: a cohort of agents swims up the arena towards
//! one or more targets ("eggs"), and whoever gets there first decides the outcome.
//!
//! ## Features
//!
//! - Smooth, seeded lateral wiggle sampled from a Perlin noise field
//! - Single-target races with a rare-first birth outcome roll
//! - An attempts counter that re-rolls the environment and culls agents at spawn
//! - Generational evolution of speed and agility genes from the winners
//! - Real-time visualization with egui/macroquad
//!
//! ## Core Modules
//!
//! - [`simulation::race`] - Per-tick movement, capture and end detection
//! - [`simulation::evolution`] - Gene pool averaging and cohort spawning
//! - [`simulation::outcome`] - Race results and the birth roll
//! - [`simulation::state`] - Frame-stepped state for the three race modes
//! - [`simulation::params`] - Simulation parameters

/// Core simulation logic and data structures.
pub mod simulation {
    /// Race participants and their genomes.
    pub mod agent;
    /// Randomized conditions of a single attempt.
    pub mod environment;
    /// Error types.
    pub mod error;
    /// Event log for display.
    pub mod event_log;
    /// Gene pool and generation management.
    pub mod evolution;
    /// Geometric utility functions for distance calculations.
    pub mod geometric_utils;
    /// Generation history tracking.
    pub mod history;
    /// Trait for entities with a position.
    pub mod locatable;
    /// Race and birth outcomes.
    pub mod outcome;
    /// Simulation parameters.
    pub mod params;
    /// Per-tick race engine.
    pub mod race;
    /// Seeded randomness and noise.
    pub mod rng;
    /// Spatial index over targets.
    pub mod spatial;
    /// Frame-stepped simulation state.
    pub mod state;
    /// Capture zones.
    pub mod target;
}
