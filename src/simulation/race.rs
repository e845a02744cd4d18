//! Per-tick race logic: movement, capture and end detection.
//!
//! A tick runs in two phases. Movement only touches each agent's own state
//! plus the read-only noise field, so it runs in parallel. Captures are the
//! only cross-agent writes and are resolved serially in agent creation order,
//! checking targets in list order: the first agent to reach an unfertilized
//! target takes it, and an agent takes at most one target.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::agent::Agent;
use super::geometric_utils::{Arena, distance_between};
use super::outcome::RaceOutcome;
use super::rng::NoiseField;
use super::spatial::TargetIndex;
use super::target::Target;

/// When a race is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndPolicy {
    /// Ends on the first capture of any target, or when nobody is left racing.
    FirstCapture,
    /// Ends once every target is fertilized, or when nobody is left racing.
    AllTargets,
}

/// An agent capturing a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    /// Capturing agent.
    pub agent_id: usize,
    /// Captured target.
    pub target_id: usize,
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickResult {
    /// Captures made this tick, in resolution order.
    pub captures: Vec<Capture>,
    /// Set once the race has ended.
    pub ended: Option<RaceOutcome>,
}

/// Advances a race one tick at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaceEngine {
    /// Bounds outside which agents drop out.
    pub arena: Arena,
    /// End condition.
    pub policy: EndPolicy,
}

impl RaceEngine {
    /// Creates an engine.
    pub fn new(arena: Arena, policy: EndPolicy) -> Self {
        Self { arena, policy }
    }

    /// Advances every racing agent, resolves captures and checks the end condition.
    ///
    /// `index` must have been built from `targets`.
    pub fn tick(
        &self,
        agents: &mut [Agent],
        targets: &mut [Target],
        index: &TargetIndex,
        noise: &NoiseField,
    ) -> TickResult {
        // parallel phase, agents only update themselves
        agents
            .par_iter_mut()
            .for_each(|agent| agent.advance(noise, &self.arena));

        let mut captures = Vec::new();
        for agent in agents.iter_mut() {
            if !agent.is_racing() {
                continue;
            }

            for target_id in index.candidates(&agent.pos) {
                let target = &mut targets[target_id];
                if target.fertilized || distance_between(&*agent, &*target) >= target.reach() {
                    continue;
                }

                target.fertilize(agent.id);
                agent.has_won = true;
                captures.push(Capture {
                    agent_id: agent.id,
                    target_id,
                });
                debug!(agent = agent.id, target = target_id, "target captured");
                break;
            }

            if self.policy == EndPolicy::FirstCapture && !captures.is_empty() {
                break;
            }
        }

        let ended = self.end_state(agents, targets, &captures);
        TickResult { captures, ended }
    }

    fn end_state(
        &self,
        agents: &[Agent],
        targets: &[Target],
        captures: &[Capture],
    ) -> Option<RaceOutcome> {
        let anyone_racing = agents.iter().any(Agent::is_racing);
        let all_fertilized = targets.iter().all(|t| t.fertilized);

        let over = match self.policy {
            EndPolicy::FirstCapture => !captures.is_empty() || all_fertilized || !anyone_racing,
            EndPolicy::AllTargets => all_fertilized || !anyone_racing,
        };
        if !over {
            return None;
        }

        if let (EndPolicy::FirstCapture, Some(first)) = (self.policy, captures.first()) {
            return Some(RaceOutcome::Captured {
                target_id: first.target_id,
                agent_id: first.agent_id,
            });
        }

        Some(
            targets
                .iter()
                .find_map(|t| {
                    t.captured_by.map(|agent_id| RaceOutcome::Captured {
                        target_id: t.id,
                        agent_id,
                    })
                })
                .unwrap_or(RaceOutcome::PopulationLost),
        )
    }
}
