//! Bounded, newest-first record of what happened during a run.
//!
//! Entries keep the structured [`RaceEvent`] rather than a rendered string, so
//! callers can match on captures or births and the UI formats them on demand.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use super::evolution::GenePool;
use super::outcome::BirthOutcome;
use super::race::Capture;

/// Something worth showing in the event panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RaceEvent {
    /// A classic race started.
    RaceStarted {
        /// Race number since launch.
        race: u32,
        /// Agents in the cohort.
        population: usize,
    },
    /// An attempt started with freshly drawn conditions.
    AttemptStarted {
        /// Attempt number since the last reset.
        attempt: u32,
        /// Agents in the cohort, culled ones included.
        population: usize,
        /// Cull chance in percent.
        immunity: f32,
    },
    /// A generation was spawned from `pool`.
    GenerationStarted {
        /// Generation number.
        generation: u32,
        /// Pool the cohort was drawn from.
        pool: GenePool,
    },
    /// An agent fertilized a target.
    Captured(Capture),
    /// The designated agent won and a birth type was rolled.
    Born(BirthOutcome),
    /// Nobody was left racing.
    PopulationLost,
    /// The attempt counter was cleared by a click.
    CounterReset {
        /// Attempts counted before the reset.
        attempts: u32,
    },
}

/// Coarse category of an event, used for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// A race, attempt or generation started.
    RaceStart,
    /// A target was captured.
    Capture,
    /// A birth outcome was rolled.
    Birth,
    /// Nobody was left in the race.
    PopulationLost,
    /// Counters were reset.
    Reset,
}

impl RaceEvent {
    /// Category of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::RaceStarted { .. }
            | Self::AttemptStarted { .. }
            | Self::GenerationStarted { .. } => EventKind::RaceStart,
            Self::Captured(_) => EventKind::Capture,
            Self::Born(_) => EventKind::Birth,
            Self::PopulationLost => EventKind::PopulationLost,
            Self::CounterReset { .. } => EventKind::Reset,
        }
    }
}

impl fmt::Display for RaceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RaceStarted { race, population } => {
                write!(f, "Race #{} with {} agents", race, population)
            }
            Self::AttemptStarted {
                attempt,
                population,
                immunity,
            } => write!(
                f,
                "Attempt #{}: {} agents, immunity {:.0}%",
                attempt, population, immunity
            ),
            Self::GenerationStarted { generation, pool } => write!(
                f,
                "Generation {}: speed {:.2}, agility {:.2}",
                generation, pool.avg_speed, pool.avg_agility
            ),
            Self::Captured(capture) => write!(
                f,
                "Agent {} captured target {}",
                capture.agent_id, capture.target_id
            ),
            Self::Born(birth) => f.write_str(birth.headline()),
            Self::PopulationLost => f.write_str("Population lost. No survivors."),
            Self::CounterReset { attempts } => write!(f, "Reset after {} attempts", attempts),
        }
    }
}

/// An event stamped with the frame it happened on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Frame counter at the time of the event.
    pub frame: u64,
    /// What happened.
    pub event: RaceEvent,
}

/// Keeps the most recent `capacity` events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<LoggedEvent>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(20)
    }
}

impl EventLog {
    /// Creates an empty log holding at most `capacity` events.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records `event` at `frame`, evicting the oldest entry when full.
    pub fn record(&mut self, frame: u64, event: RaceEvent) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(LoggedEvent { frame, event });
    }

    /// Entries, newest first.
    pub fn events(&self) -> &VecDeque<LoggedEvent> {
        &self.entries
    }

    /// Most recent capture, if any is still in the log.
    pub fn last_capture(&self) -> Option<Capture> {
        self.entries.iter().find_map(|e| match e.event {
            RaceEvent::Captured(capture) => Some(capture),
            _ => None,
        })
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
