//! Race participants and their genomes.
//!
//! An agent swims upward with a constant base velocity plus a smooth lateral
//! wiggle. Its `alive`, `off_screen` and `has_won` flags only ever go from
//! `false` to `true` (or `true` to `false` for `alive`), and any of them takes
//! the agent out of the race for good.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::geometric_utils::Arena;
use super::locatable::Locatable;
use super::rng::{NoiseField, RandomSource};

/// Number of past positions kept for drawing the tail.
pub const TRAIL_LENGTH: usize = 7;

/// Which side of the race an agent is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    /// One of the many competitors.
    Rival,
    /// The designated agent whose win triggers a birth outcome.
    You,
}

/// Heritable traits of an evolving agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    /// Upward speed per tick.
    pub speed: f32,
    /// Amplitude of the lateral wiggle.
    pub agility: f32,
}

impl Genome {
    /// Lowest speed a genome can carry.
    pub const MIN_SPEED: f32 = 0.5;
    /// Lowest agility a genome can carry.
    pub const MIN_AGILITY: f32 = 0.1;

    /// Creates a genome with both genes clamped to their floors.
    ///
    /// `NaN` genes collapse onto the floor as well.
    pub fn clamped(speed: f32, agility: f32) -> Self {
        Self {
            speed: speed.max(Self::MIN_SPEED),
            agility: agility.max(Self::MIN_AGILITY),
        }
    }
}

/// How an agent moves for the whole race.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Upward speed per tick.
    pub speed: f32,
    /// Maximum lateral displacement per tick.
    pub wiggle: f32,
    /// Noise offset advance per tick.
    pub noise_step: f32,
}

impl From<Genome> for Motion {
    fn from(genome: Genome) -> Self {
        Self {
            speed: genome.speed,
            wiggle: genome.agility,
            noise_step: 0.1,
        }
    }
}

/// Drawing category of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    /// The designated agent.
    You,
    /// Any other competitor.
    Rival,
    /// Killed at spawn time.
    Culled,
    /// Captured a target.
    Winner,
}

/// A single race participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Creation index inside the cohort. Ties between agents are broken by this order.
    pub id: usize,
    /// Rival or the designated agent.
    pub kind: AgentKind,
    /// Position in 2D space.
    pub pos: Array1<f32>,
    /// Base velocity applied every tick.
    pub vel: Array1<f32>,
    /// Maximum lateral displacement per tick.
    pub wiggle: f32,
    /// Current sampling offset into the noise field.
    pub noise_offset: f32,
    /// Noise offset advance per tick.
    pub noise_step: f32,
    /// Inherited traits, only present in the evolution race.
    pub genome: Option<Genome>,
    /// `false` once culled. Never becomes `true` again.
    pub alive: bool,
    /// `true` once the agent left the arena.
    pub off_screen: bool,
    /// `true` once the agent captured a target.
    pub has_won: bool,
    /// Most recent positions, oldest first.
    pub trail: VecDeque<Array1<f32>>,
}

impl Agent {
    /// Creates an agent at `pos` moving straight up at `motion.speed`.
    pub fn new(
        id: usize,
        kind: AgentKind,
        pos: Array1<f32>,
        motion: Motion,
        noise_offset: f32,
        genome: Option<Genome>,
    ) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Array1::from_vec(vec![0.0, -motion.speed]),
            wiggle: motion.wiggle,
            noise_offset,
            noise_step: motion.noise_step,
            genome,
            alive: true,
            off_screen: false,
            has_won: false,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Spawns an agent at a random x on the starting line `y`, with a random noise offset.
    pub fn spawn(
        id: usize,
        kind: AgentKind,
        width: f32,
        y: f32,
        motion: Motion,
        genome: Option<Genome>,
        rng: &mut RandomSource,
    ) -> Self {
        let x = rng.uniform(0.0, width);
        let noise_offset = rng.uniform(0.0, 1000.0);
        Self::new(
            id,
            kind,
            Array1::from_vec(vec![x, y]),
            motion,
            noise_offset,
            genome,
        )
    }

    /// Checks whether the agent can still move and capture.
    pub fn is_racing(&self) -> bool {
        self.alive && !self.off_screen && !self.has_won
    }

    /// Kills the agent permanently.
    pub fn cull(&mut self) {
        self.alive = false;
    }

    /// Moves the agent one tick and marks it off-screen if it left the arena.
    ///
    /// Does nothing for agents that are no longer racing.
    pub fn advance(&mut self, noise: &NoiseField, arena: &Arena) {
        if !self.is_racing() {
            return;
        }

        let wiggle = noise.sample(self.noise_offset) * self.wiggle;
        self.pos[0] += wiggle;
        self.pos += &self.vel;
        self.noise_offset += self.noise_step;

        if !arena.contains(&self.pos) {
            self.off_screen = true;
        }

        self.trail.push_back(self.pos.clone());
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    /// Category the renderer should use for this agent.
    pub fn color_class(&self) -> ColorClass {
        if self.has_won {
            ColorClass::Winner
        } else if !self.alive {
            ColorClass::Culled
        } else {
            match self.kind {
                AgentKind::You => ColorClass::You,
                AgentKind::Rival => ColorClass::Rival,
            }
        }
    }
}

impl Locatable for Agent {
    fn pos(&self) -> &Array1<f32> {
        &self.pos
    }

    fn pos_mut(&mut self) -> &mut Array1<f32> {
        &mut self.pos
    }
}
