//! Frame-stepped state of a running simulation.
//!
//! The caller owns a [`SimulationState`] and a [`RandomSource`] and calls
//! [`SimulationState::step`] once per frame. Everything the renderer needs
//! (agents, targets, counters, outcome, gene pool) is readable from the state.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::agent::{Agent, AgentKind, Genome, Motion};
use super::environment::Environment;
use super::event_log::{EventLog, RaceEvent};
use super::evolution::{GenePool, GenerationManager, SpawnLine};
use super::geometric_utils::Arena;
use super::history::{GenerationHistory, GenerationRecord};
use super::outcome::{self, BirthOutcome, OutcomeType, RaceOutcome};
use super::params::Params;
use super::race::{EndPolicy, RaceEngine, TickResult};
use super::rng::RandomSource;
use super::spatial::TargetIndex;
use super::target::Target;

/// Which race scenario is being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// One race, one target, a birth roll if the designated agent wins, click to restart.
    Classic,
    /// Randomized attempts that restart on their own until the designated agent wins.
    Attempts,
    /// Generations of evolving agents racing to several targets.
    Evolution,
}

impl Mode {
    /// End condition used by this mode.
    pub fn policy(self) -> EndPolicy {
        match self {
            Self::Classic | Self::Attempts => EndPolicy::FirstCapture,
            Self::Evolution => EndPolicy::AllTargets,
        }
    }

    /// Human readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Attempts => "Attempts",
            Self::Evolution => "Evolution",
        }
    }
}

/// Where the state machine is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Agents are moving.
    Racing,
    /// The race is over and the results are on screen.
    Finished {
        /// Frames left before an automatic restart. `None` waits for a restart trigger.
        countdown: Option<u32>,
    },
}

/// UI input sampled every frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Immune strength control in `[0, 100]`, read when an attempt starts.
    pub immune_strength: f32,
    /// Restart trigger (a click).
    pub restart: bool,
}

/// Complete state of a simulation run.
#[derive(Debug)]
pub struct SimulationState {
    /// Running scenario.
    pub mode: Mode,
    /// Current cohort, indexed by agent id.
    pub agents: Vec<Agent>,
    /// Current targets, indexed by target id.
    pub targets: Vec<Target>,
    /// Gene pool the current cohort was drawn from (evolution only).
    pub gene_pool: GenePool,
    /// Conditions of the current attempt (attempts only).
    pub environment: Option<Environment>,
    /// Races or attempts started since the last reset.
    pub attempt_count: u32,
    /// Current generation (evolution only, starts at 1).
    pub generation_count: u32,
    /// Result of the current race once it ended.
    pub race_outcome: Option<RaceOutcome>,
    /// Birth type rolled when the designated agent won.
    pub birth_outcome: Option<BirthOutcome>,
    /// Racing or showing results.
    pub phase: Phase,
    /// Frames stepped so far.
    pub frame: u64,
    /// Finished generations (evolution only).
    pub history: GenerationHistory,
    /// Recent events for display.
    pub event_log: EventLog,
    index: TargetIndex,
}

impl SimulationState {
    /// Creates the state and starts the first race.
    pub fn new(mode: Mode, params: &Params, rng: &mut RandomSource, input: &FrameInput) -> Self {
        let mut state = Self {
            mode,
            agents: Vec::new(),
            targets: Vec::new(),
            gene_pool: params.baseline_pool,
            environment: None,
            attempt_count: 0,
            generation_count: 0,
            race_outcome: None,
            birth_outcome: None,
            phase: Phase::Racing,
            frame: 0,
            history: GenerationHistory::new(params.max_history),
            event_log: EventLog::new(params.max_events),
            index: TargetIndex::build(&[]),
        };
        state.start_race(params, rng, input.immune_strength);
        state
    }

    /// Advances the simulation by one frame.
    ///
    /// While racing this runs one engine tick and returns its result. On the results
    /// screen it counts down to the automatic restart or handles the restart trigger,
    /// and returns an empty result.
    pub fn step(
        &mut self,
        params: &Params,
        rng: &mut RandomSource,
        input: &FrameInput,
    ) -> TickResult {
        self.frame += 1;

        match self.phase {
            Phase::Racing => {
                let engine = RaceEngine::new(
                    Arena::new(params.width, params.height, params.arena_margin),
                    self.mode.policy(),
                );
                let result = engine.tick(
                    &mut self.agents,
                    &mut self.targets,
                    &self.index,
                    rng.noise(),
                );

                for &capture in &result.captures {
                    self.event_log
                        .record(self.frame, RaceEvent::Captured(capture));
                }

                if let Some(outcome) = result.ended {
                    self.finish_race(outcome, params, rng);
                }
                result
            }
            Phase::Finished {
                countdown: Some(remaining),
            } => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    self.start_race(params, rng, input.immune_strength);
                } else {
                    self.phase = Phase::Finished {
                        countdown: Some(remaining),
                    };
                }
                TickResult::default()
            }
            Phase::Finished { countdown: None } => {
                if input.restart {
                    self.restart(params, rng, input);
                }
                TickResult::default()
            }
        }
    }

    /// Handles a restart trigger.
    ///
    /// Only accepted on a results screen that waits for one; returns whether it was.
    /// In attempts mode the attempt counter starts over.
    pub fn restart(
        &mut self,
        params: &Params,
        rng: &mut RandomSource,
        input: &FrameInput,
    ) -> bool {
        if self.phase != (Phase::Finished { countdown: None }) {
            return false;
        }

        if self.mode == Mode::Attempts {
            info!("resetting attempt counter");
            self.event_log.record(
                self.frame,
                RaceEvent::CounterReset {
                    attempts: self.attempt_count,
                },
            );
            self.attempt_count = 0;
        }

        self.start_race(params, rng, input.immune_strength);
        true
    }

    /// Display category for the current outcome.
    pub fn outcome_type(&self) -> OutcomeType {
        match (self.race_outcome, self.birth_outcome) {
            (Some(RaceOutcome::PopulationLost), _) => OutcomeType::PopulationLost,
            (_, Some(birth)) => birth.into(),
            _ => OutcomeType::None,
        }
    }

    /// Agent that ended the race by capturing a target.
    pub fn winner(&self) -> Option<&Agent> {
        match self.race_outcome {
            Some(RaceOutcome::Captured { agent_id, .. }) => self.agent(agent_id),
            _ => None,
        }
    }

    /// Checks whether the designated agent won the race.
    pub fn you_won(&self) -> bool {
        self.winner().is_some_and(|a| a.kind == AgentKind::You)
    }

    /// Looks up an agent by id.
    pub fn agent(&self, id: usize) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Number of agents still able to move and capture.
    pub fn racing_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_racing()).count()
    }

    /// Number of fertilized targets.
    pub fn fertilized_count(&self) -> usize {
        self.targets.iter().filter(|t| t.fertilized).count()
    }

    /// Genomes of the agents that captured a target, in target order.
    pub fn winner_genomes(&self) -> Vec<Genome> {
        self.targets
            .iter()
            .filter_map(|t| t.captured_by)
            .filter_map(|id| self.agent(id))
            .filter_map(|a| a.genome)
            .collect()
    }

    fn start_race(&mut self, params: &Params, rng: &mut RandomSource, immune_strength: f32) {
        self.race_outcome = None;
        self.birth_outcome = None;
        self.phase = Phase::Racing;

        match self.mode {
            Mode::Classic => self.start_classic(params, rng),
            Mode::Attempts => self.start_attempt(params, rng, immune_strength),
            Mode::Evolution => self.start_generation(params, rng),
        }

        self.index = TargetIndex::build(&self.targets);
    }

    fn start_classic(&mut self, params: &Params, rng: &mut RandomSource) {
        self.attempt_count += 1;
        self.targets = vec![Target::new(
            0,
            params.width / 2.0,
            params.target_y,
            params.classic_target_size,
        )];

        let (low, high) = params.classic_speed_range;
        self.agents = spawn_contestants(params.classic_cohort_size, params, None, rng, |rng| {
            Motion {
                speed: rng.uniform(low, high),
                wiggle: params.classic_wiggle,
                noise_step: params.classic_noise_step,
            }
        });

        info!(race = self.attempt_count, population = self.agents.len(), "race started");
        self.event_log.record(
            self.frame,
            RaceEvent::RaceStarted {
                race: self.attempt_count,
                population: self.agents.len(),
            },
        );
    }

    fn start_attempt(&mut self, params: &Params, rng: &mut RandomSource, immune_strength: f32) {
        self.attempt_count += 1;
        let env = Environment::draw(params, immune_strength, rng);

        info!(
            attempt = self.attempt_count,
            population = env.cohort_size,
            immunity = env.immune_strength,
            vigor = env.vigor,
            diversity = env.diversity,
            target = env.target_size.floor(),
            "attempt started"
        );

        self.targets = vec![Target::new(
            0,
            params.width / 2.0,
            params.target_y,
            env.target_size,
        )];
        self.agents = spawn_contestants(
            env.cohort_size,
            params,
            Some(env.immune_strength),
            rng,
            |rng| env.motion(params.min_attempt_speed, rng),
        );
        self.environment = Some(env);

        self.event_log.record(
            self.frame,
            RaceEvent::AttemptStarted {
                attempt: self.attempt_count,
                population: env.cohort_size,
                immunity: env.immune_strength,
            },
        );
    }

    fn start_generation(&mut self, params: &Params, rng: &mut RandomSource) {
        let manager = GenerationManager::new(
            params.baseline_pool,
            params.mutation_rate,
            SpawnLine {
                width: params.width,
                y: params.height - params.spawn_offset,
                noise_step: params.evolution_noise_step,
            },
        );

        if self.generation_count == 0 {
            self.generation_count = 1;
            self.gene_pool = params.baseline_pool;
            self.agents =
                manager.spawn_cohort(&self.gene_pool, params.evolution_cohort_size, rng);

            info!(
                generation = self.generation_count,
                success = "N/A",
                avg_speed = self.gene_pool.avg_speed,
                avg_agility = self.gene_pool.avg_agility,
                "generation started"
            );
        } else {
            let winners = self.winner_genomes();
            let (pool, agents) =
                manager.next_cohort(&winners, params.evolution_cohort_size, rng);

            self.history.record(GenerationRecord {
                generation: self.generation_count,
                winners: winners.len(),
                targets: self.targets.len(),
                pool,
            });

            self.gene_pool = pool;
            self.agents = agents;
            self.generation_count += 1;

            info!(
                generation = self.generation_count,
                success = %format!("{}/{}", winners.len(), self.targets.len()),
                avg_speed = pool.avg_speed,
                avg_agility = pool.avg_agility,
                "generation started"
            );
        }

        if self.targets.len() == params.num_targets {
            for target in &mut self.targets {
                target.reset();
            }
        } else {
            self.targets = Target::row(
                params.num_targets,
                params.width,
                params.target_y,
                params.evolution_target_size,
            );
        }

        self.event_log.record(
            self.frame,
            RaceEvent::GenerationStarted {
                generation: self.generation_count,
                pool: self.gene_pool,
            },
        );
    }

    fn finish_race(&mut self, outcome: RaceOutcome, params: &Params, rng: &mut RandomSource) {
        self.race_outcome = Some(outcome);

        match outcome {
            RaceOutcome::PopulationLost => {
                info!("result: population lost");
                self.event_log
                    .record(self.frame, RaceEvent::PopulationLost);
            }
            RaceOutcome::Captured { agent_id, .. } => {
                if self.mode != Mode::Evolution && self.you_won() {
                    let birth = outcome::roll(rng.unit());
                    self.birth_outcome = Some(birth);
                    info!(attempts = self.attempt_count, outcome = ?birth, "result: you were born");
                    self.event_log.record(self.frame, RaceEvent::Born(birth));
                } else if self.mode != Mode::Evolution {
                    info!(winner = agent_id, "result: another agent won");
                }
            }
        }

        let countdown = match self.mode {
            Mode::Classic => None,
            Mode::Attempts if self.you_won() => None,
            Mode::Attempts | Mode::Evolution => Some(params.restart_delay),
        };
        self.phase = Phase::Finished { countdown };
    }
}

/// Spawns `count` agents on the starting line; the last one is the designated agent.
///
/// With `immune_strength`, each agent is culled at spawn with that percent chance.
fn spawn_contestants(
    count: usize,
    params: &Params,
    immune_strength: Option<f32>,
    rng: &mut RandomSource,
    mut motion: impl FnMut(&mut RandomSource) -> Motion,
) -> Vec<Agent> {
    let y = params.height - params.spawn_offset;
    (0..count)
        .map(|id| {
            let kind = if id + 1 == count {
                AgentKind::You
            } else {
                AgentKind::Rival
            };
            let motion = motion(rng);
            let mut agent = Agent::spawn(id, kind, params.width, y, motion, None, rng);
            if let Some(strength) = immune_strength {
                if rng.uniform(0.0, 100.0) < strength {
                    agent.cull();
                }
            }
            agent
        })
        .collect()
}
