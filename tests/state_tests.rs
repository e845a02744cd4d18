#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use conception::simulation::agent::AgentKind;
use conception::simulation::event_log::{EventKind, RaceEvent};
use conception::simulation::evolution::GenePool;
use conception::simulation::outcome::{OutcomeType, RaceOutcome};
use conception::simulation::params::Params;
use conception::simulation::race::Capture;
use conception::simulation::rng::RandomSource;
use conception::simulation::state::{FrameInput, Mode, Phase, SimulationState};

fn create_test_params() -> Params {
    Params {
        classic_cohort_size: 20,
        max_attempt_cohort: 20,
        evolution_cohort_size: 20,
        restart_delay: 3,
        seed: Some(42),
        ..Params::default()
    }
}

const IDLE: FrameInput = FrameInput {
    immune_strength: 0.0,
    restart: false,
};

const CLICK: FrameInput = FrameInput {
    immune_strength: 0.0,
    restart: true,
};

fn run_until_finished(
    state: &mut SimulationState,
    params: &Params,
    rng: &mut RandomSource,
    input: &FrameInput,
) {
    for _ in 0..2000 {
        if state.phase != Phase::Racing {
            return;
        }
        state.step(params, rng, input);
    }
    panic!("race did not finish");
}

#[test]
fn test_classic_race_setup() {
    let params = create_test_params();
    let mut rng = RandomSource::new(1);
    let state = SimulationState::new(Mode::Classic, &params, &mut rng, &IDLE);

    assert_eq!(state.phase, Phase::Racing);
    assert_eq!(state.attempt_count, 1);
    assert_eq!(state.agents.len(), 20);
    assert_eq!(state.targets.len(), 1);
    assert_eq!(state.targets[0].pos[0], 300.0);
    assert_eq!(state.targets[0].pos[1], 80.0);
    assert_eq!(state.outcome_type(), OutcomeType::None);

    // only the last agent is the designated one
    let you: Vec<_> = state
        .agents
        .iter()
        .filter(|a| a.kind == AgentKind::You)
        .collect();
    assert_eq!(you.len(), 1);
    assert_eq!(you[0].id, 19);

    for agent in &state.agents {
        assert_eq!(agent.pos[1], 580.0);
        assert!(-agent.vel[1] >= 2.0 && -agent.vel[1] < 4.0);
        assert!(agent.alive);
    }
}

#[test]
fn test_classic_waits_for_click() {
    let params = create_test_params();
    let mut rng = RandomSource::new(1);
    let mut state = SimulationState::new(Mode::Classic, &params, &mut rng, &IDLE);

    run_until_finished(&mut state, &params, &mut rng, &IDLE);
    assert_eq!(state.phase, Phase::Finished { countdown: None });
    assert!(state.race_outcome.is_some());

    for _ in 0..500 {
        state.step(&params, &mut rng, &IDLE);
    }
    assert_eq!(state.phase, Phase::Finished { countdown: None });

    state.step(&params, &mut rng, &CLICK);
    assert_eq!(state.phase, Phase::Racing);
    assert_eq!(state.attempt_count, 2);
    assert_eq!(state.race_outcome, None);
    assert!(state.agents.iter().all(|a| !a.has_won));
}

#[test]
fn test_self_win_rolls_birth_outcome() {
    // a lone agent and a target covering the whole arena
    let params = Params {
        classic_cohort_size: 1,
        classic_target_size: 4000.0,
        ..create_test_params()
    };
    let mut rng = RandomSource::new(1);
    let mut state = SimulationState::new(Mode::Classic, &params, &mut rng, &IDLE);

    let result = state.step(&params, &mut rng, &IDLE);

    assert_eq!(result.captures.len(), 1);
    assert_eq!(
        state.race_outcome,
        Some(RaceOutcome::Captured {
            target_id: 0,
            agent_id: 0
        })
    );
    assert!(state.you_won());
    assert!(state.birth_outcome.is_some());
    assert_ne!(state.outcome_type(), OutcomeType::None);
    assert_ne!(state.outcome_type(), OutcomeType::PopulationLost);
    assert_eq!(state.phase, Phase::Finished { countdown: None });
}

#[test]
fn test_attempts_success_click_resets_counter() {
    let params = Params {
        max_attempt_cohort: 1,
        target_size_range: (4000.0, 4001.0),
        ..create_test_params()
    };
    let mut rng = RandomSource::new(1);
    let mut state = SimulationState::new(Mode::Attempts, &params, &mut rng, &IDLE);

    assert_eq!(state.agents.len(), 1);
    assert_eq!(state.agents[0].kind, AgentKind::You);

    state.step(&params, &mut rng, &IDLE);
    assert!(state.you_won());
    assert!(state.birth_outcome.is_some());
    assert_eq!(state.phase, Phase::Finished { countdown: None });
    assert_eq!(state.attempt_count, 1);

    state.step(&params, &mut rng, &CLICK);
    assert_eq!(state.phase, Phase::Racing);
    assert_eq!(state.attempt_count, 1);
    assert_eq!(state.birth_outcome, None);
}

#[test]
fn test_attempts_full_immunity_loses_population() {
    let params = create_test_params();
    let mut rng = RandomSource::new(1);
    let immune = FrameInput {
        immune_strength: 100.0,
        restart: false,
    };
    let mut state = SimulationState::new(Mode::Attempts, &params, &mut rng, &immune);

    assert!(state.agents.iter().all(|a| !a.alive));
    assert_eq!(state.environment.map(|e| e.immune_strength), Some(100.0));

    state.step(&params, &mut rng, &immune);
    assert_eq!(state.race_outcome, Some(RaceOutcome::PopulationLost));
    assert_eq!(state.outcome_type(), OutcomeType::PopulationLost);
    assert_eq!(state.birth_outcome, None);
    assert_eq!(
        state.phase,
        Phase::Finished {
            countdown: Some(params.restart_delay)
        }
    );
}

#[test]
fn test_attempts_countdown_ignores_clicks_and_restarts() {
    let params = create_test_params();
    let mut rng = RandomSource::new(1);
    let immune = FrameInput {
        immune_strength: 100.0,
        restart: true,
    };
    let mut state = SimulationState::new(Mode::Attempts, &params, &mut rng, &immune);
    state.step(&params, &mut rng, &immune);

    assert!(!state.restart(&params, &mut rng, &immune));
    assert_eq!(state.attempt_count, 1);

    state.step(&params, &mut rng, &immune);
    state.step(&params, &mut rng, &immune);
    assert_eq!(state.phase, Phase::Finished { countdown: Some(1) });
    assert_eq!(state.attempt_count, 1);

    state.step(&params, &mut rng, &immune);
    assert_eq!(state.phase, Phase::Racing);
    assert_eq!(state.attempt_count, 2);
}

#[test]
fn test_attempt_environment_ranges() {
    let params = create_test_params();
    let mut rng = RandomSource::new(17);
    let mut state = SimulationState::new(Mode::Attempts, &params, &mut rng, &IDLE);

    for _ in 0..20 {
        let env = state.environment.expect("attempts draw an environment");
        assert!(env.vigor >= 2.0 && env.vigor < 5.0);
        assert!(env.diversity >= 0.1 && env.diversity < 2.0);
        assert!(env.target_size >= 20.0 && env.target_size < 80.0);
        assert!(env.cohort_size >= 1 && env.cohort_size <= 20);
        assert_eq!(state.agents.len(), env.cohort_size);
        assert_eq!(state.targets[0].capture_radius, env.target_size);

        let min_speed = (env.vigor - env.diversity).max(0.5);
        for agent in &state.agents {
            let speed = -agent.vel[1];
            assert!(speed >= min_speed - 1e-5 && speed <= env.vigor + env.diversity + 1e-5);
            assert!(agent.wiggle >= 1.0 && agent.wiggle <= 4.0);
        }

        run_until_finished(&mut state, &params, &mut rng, &IDLE);
        if state.you_won() {
            state.step(&params, &mut rng, &CLICK);
        } else {
            for _ in 0..params.restart_delay {
                state.step(&params, &mut rng, &IDLE);
            }
        }
        assert_eq!(state.phase, Phase::Racing);
    }
}

#[test]
fn test_evolution_generation_records_history() {
    // every agent is within reach of both targets
    let params = Params {
        evolution_cohort_size: 3,
        evolution_target_size: 4000.0,
        ..create_test_params()
    };
    let mut rng = RandomSource::new(1);
    let mut state = SimulationState::new(Mode::Evolution, &params, &mut rng, &IDLE);

    assert_eq!(state.generation_count, 1);
    assert_eq!(state.gene_pool, GenePool::BASELINE);
    assert_eq!(state.targets.len(), 2);
    assert!(state.agents.iter().all(|a| a.genome.is_some()));

    let result = state.step(&params, &mut rng, &IDLE);
    assert_eq!(result.captures.len(), 2);
    assert_eq!(state.fertilized_count(), 2);
    assert_eq!(state.birth_outcome, None);
    assert_eq!(
        state.phase,
        Phase::Finished {
            countdown: Some(params.restart_delay)
        }
    );

    let winners = state.winner_genomes();
    assert_eq!(winners.len(), 2);
    let expected_speed = (winners[0].speed + winners[1].speed) / 2.0;

    // clicks do nothing in evolution
    assert!(!state.restart(&params, &mut rng, &CLICK));

    for _ in 0..params.restart_delay {
        state.step(&params, &mut rng, &CLICK);
    }

    assert_eq!(state.phase, Phase::Racing);
    assert_eq!(state.generation_count, 2);
    assert!((state.gene_pool.avg_speed - expected_speed).abs() < 1e-5);
    assert_eq!(state.fertilized_count(), 0);
    assert_eq!(state.agents.len(), 3);

    let record = state.history.latest().expect("one generation recorded");
    assert_eq!(record.generation, 1);
    assert_eq!(record.winners, 2);
    assert_eq!(record.targets, 2);
    assert_eq!(record.success_rate(), 1.0);
}

#[test]
fn test_evolution_extinction_resets_pool() {
    let params = Params {
        evolution_cohort_size: 0,
        baseline_pool: GenePool {
            avg_speed: 2.5,
            avg_agility: 1.0,
        },
        ..create_test_params()
    };
    let mut rng = RandomSource::new(1);
    let mut state = SimulationState::new(Mode::Evolution, &params, &mut rng, &IDLE);

    state.step(&params, &mut rng, &IDLE);
    assert_eq!(state.race_outcome, Some(RaceOutcome::PopulationLost));

    for _ in 0..params.restart_delay {
        state.step(&params, &mut rng, &IDLE);
    }

    assert_eq!(state.generation_count, 2);
    assert_eq!(state.gene_pool, params.baseline_pool);
    assert_eq!(state.history.extinction_count(), 1);
}

#[test]
fn test_events_are_logged() {
    let params = Params {
        classic_cohort_size: 1,
        classic_target_size: 4000.0,
        ..create_test_params()
    };
    let mut rng = RandomSource::new(1);
    let mut state = SimulationState::new(Mode::Classic, &params, &mut rng, &IDLE);
    state.step(&params, &mut rng, &IDLE);

    // newest first: birth, capture, race start
    let events = state.event_log.events();
    assert_eq!(events.len(), 3);
    assert_eq!(
        events[2].event,
        RaceEvent::RaceStarted {
            race: 1,
            population: 1
        }
    );
    assert_eq!(events[2].event.to_string(), "Race #1 with 1 agents");
    assert_eq!(
        events[1].event,
        RaceEvent::Captured(Capture {
            agent_id: 0,
            target_id: 0
        })
    );
    assert_eq!(events[0].event.kind(), EventKind::Birth);
    assert_eq!(events[0].frame, 1);
    assert_eq!(
        state.event_log.last_capture(),
        Some(Capture {
            agent_id: 0,
            target_id: 0
        })
    );
}

#[test]
fn test_attempt_reset_is_logged() {
    let params = Params {
        max_attempt_cohort: 1,
        target_size_range: (4000.0, 4001.0),
        ..create_test_params()
    };
    let mut rng = RandomSource::new(1);
    let mut state = SimulationState::new(Mode::Attempts, &params, &mut rng, &IDLE);
    state.step(&params, &mut rng, &IDLE);
    state.step(&params, &mut rng, &CLICK);

    let events = state.event_log.events();
    assert!(matches!(
        events[0].event,
        RaceEvent::AttemptStarted {
            attempt: 1,
            population: 1,
            ..
        }
    ));
    assert_eq!(events[1].event, RaceEvent::CounterReset { attempts: 1 });
    assert_eq!(events[1].event.kind(), EventKind::Reset);
}

#[test]
fn test_same_seed_same_race() {
    let params = create_test_params();
    let mut a = RandomSource::new(99);
    let mut b = RandomSource::new(99);
    let mut first = SimulationState::new(Mode::Evolution, &params, &mut a, &IDLE);
    let mut second = SimulationState::new(Mode::Evolution, &params, &mut b, &IDLE);

    for _ in 0..50 {
        first.step(&params, &mut a, &IDLE);
        second.step(&params, &mut b, &IDLE);
    }

    for (x, y) in first.agents.iter().zip(second.agents.iter()) {
        assert_eq!(x.pos, y.pos);
    }
    assert_eq!(first.race_outcome, second.race_outcome);
}

#[test]
fn test_default_immunity_culls_some_agents() {
    let params = Params {
        max_attempt_cohort: 500,
        ..create_test_params()
    };
    let input = FrameInput {
        immune_strength: Params::default().immune_strength,
        restart: false,
    };
    let mut rng = RandomSource::new(8);

    // over a few attempts roughly 30% of the agents start culled
    let mut culled = 0;
    let mut total = 0;
    let mut state = SimulationState::new(Mode::Attempts, &params, &mut rng, &input);
    for _ in 0..5 {
        assert_eq!(state.environment.map(|e| e.immune_strength), Some(30.0));
        culled += state.agents.iter().filter(|a| !a.alive).count();
        total += state.agents.len();

        run_until_finished(&mut state, &params, &mut rng, &input);
        if state.you_won() {
            let click = FrameInput {
                restart: true,
                ..input
            };
            state.step(&params, &mut rng, &click);
        } else {
            for _ in 0..params.restart_delay {
                state.step(&params, &mut rng, &input);
            }
        }
    }

    assert!(total > 0);
    let share = culled as f64 / total as f64;
    assert!(share > 0.15 && share < 0.45, "culled share was {}", share);
}
