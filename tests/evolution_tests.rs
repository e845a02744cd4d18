#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use conception::simulation::agent::{AgentKind, Genome};
use conception::simulation::evolution::{GenePool, GenerationManager, SpawnLine};
use conception::simulation::rng::RandomSource;

fn create_test_manager(mutation_rate: f32) -> GenerationManager {
    GenerationManager::new(
        GenePool::BASELINE,
        mutation_rate,
        SpawnLine {
            width: 600.0,
            y: 580.0,
            noise_step: 0.1,
        },
    )
}

#[test]
fn test_pool_is_mean_of_winners() {
    let winners = vec![
        Genome {
            speed: 4.0,
            agility: 2.0,
        },
        Genome {
            speed: 6.0,
            agility: 1.0,
        },
    ];

    let pool = GenePool::from_winners(&winners, GenePool::BASELINE);

    assert!((pool.avg_speed - 5.0).abs() < 1e-6);
    assert!((pool.avg_agility - 1.5).abs() < 1e-6);
}

#[test]
fn test_no_winners_resets_to_baseline() {
    let manager = create_test_manager(0.3);
    let mut rng = RandomSource::new(3);

    let (pool, agents) = manager.next_cohort(&[], 50, &mut rng);

    assert_eq!(pool, GenePool::BASELINE);
    assert_eq!(pool.avg_speed, 3.0);
    assert_eq!(pool.avg_agility, 1.5);
    assert_eq!(agents.len(), 50);
}

#[test]
fn test_cohort_genes_stay_within_mutation_range() {
    let manager = create_test_manager(0.3);
    let mut rng = RandomSource::new(5);
    let winners = vec![Genome {
        speed: 4.0,
        agility: 2.0,
    }];

    let (pool, agents) = manager.next_cohort(&winners, 200, &mut rng);

    assert_eq!(pool.avg_speed, 4.0);
    for agent in &agents {
        let genome = agent.genome.expect("evolving agents carry a genome");
        assert!(genome.speed >= 3.7 - 1e-5 && genome.speed < 4.3 + 1e-5);
        assert!(genome.agility >= 1.7 - 1e-5 && genome.agility < 2.3 + 1e-5);

        // genes drive the motion
        assert_eq!(agent.vel[1], -genome.speed);
        assert_eq!(agent.wiggle, genome.agility);
        assert_eq!(agent.noise_step, 0.1);
    }
}

#[test]
fn test_floors_hold_for_any_rate() {
    let mut rng = RandomSource::new(9);
    let pool = GenePool {
        avg_speed: -4.0,
        avg_agility: -2.0,
    };

    for rate in [
        0.0,
        0.3,
        5.0,
        -1.0,
        f32::MAX,
        -f32::MAX,
        f32::INFINITY,
        f32::NEG_INFINITY,
        f32::NAN,
    ] {
        for _ in 0..100 {
            let genome = pool.sample(rate, &mut rng);
            assert!(genome.speed >= Genome::MIN_SPEED);
            assert!(genome.agility >= Genome::MIN_AGILITY);
        }
    }
}

#[test]
fn test_huge_rates_on_extreme_pools_stay_above_floors() {
    let mut rng = RandomSource::new(10);
    let pools = [
        GenePool::BASELINE,
        GenePool {
            avg_speed: f32::MAX,
            avg_agility: f32::MAX,
        },
        GenePool {
            avg_speed: -f32::MAX,
            avg_agility: f32::MIN_POSITIVE,
        },
    ];

    for pool in pools {
        for rate in [f32::MAX, f32::INFINITY] {
            let genome = pool.sample(rate, &mut rng);
            assert!(genome.speed >= Genome::MIN_SPEED);
            assert!(genome.agility >= Genome::MIN_AGILITY);
        }
    }
}

#[test]
fn test_nan_rate_copies_pool() {
    let mut rng = RandomSource::new(9);
    let genome = GenePool::BASELINE.sample(f32::NAN, &mut rng);

    assert_eq!(genome.speed, 3.0);
    assert_eq!(genome.agility, 1.5);
}

#[test]
fn test_uniform_with_unbounded_span_returns_low() {
    let mut rng = RandomSource::new(4);

    assert_eq!(rng.uniform(-f32::MAX, f32::MAX), -f32::MAX);
    assert_eq!(rng.uniform(0.0, f32::INFINITY), 0.0);
    assert_eq!(rng.uniform(5.0, 5.0), 5.0);

    let finite = rng.uniform(-f32::MAX / 4.0, f32::MAX / 4.0);
    assert!(finite.is_finite());
}

#[test]
fn test_zero_rate_copies_pool() {
    let mut rng = RandomSource::new(9);
    let pool = GenePool {
        avg_speed: 3.5,
        avg_agility: 0.8,
    };

    let genome = pool.sample(0.0, &mut rng);

    assert_eq!(genome.speed, 3.5);
    assert_eq!(genome.agility, 0.8);
}

#[test]
fn test_cohort_spawns_on_line_as_rivals() {
    let manager = create_test_manager(0.3);
    let mut rng = RandomSource::new(13);

    let agents = manager.spawn_cohort(&GenePool::BASELINE, 100, &mut rng);

    assert_eq!(agents.len(), 100);
    for (i, agent) in agents.iter().enumerate() {
        assert_eq!(agent.id, i);
        assert_eq!(agent.kind, AgentKind::Rival);
        assert_eq!(agent.pos[1], 580.0);
        assert!(agent.pos[0] >= 0.0 && agent.pos[0] < 600.0);
        assert!(agent.is_racing());
    }
}

#[test]
fn test_empty_cohort() {
    let manager = create_test_manager(0.3);
    let mut rng = RandomSource::new(13);

    let (_, agents) = manager.next_cohort(&[], 0, &mut rng);
    assert!(agents.is_empty());
}

#[test]
fn test_same_seed_same_cohort() {
    let manager = create_test_manager(0.3);
    let mut a = RandomSource::new(21);
    let mut b = RandomSource::new(21);

    let first = manager.spawn_cohort(&GenePool::BASELINE, 20, &mut a);
    let second = manager.spawn_cohort(&GenePool::BASELINE, 20, &mut b);

    for (x, y) in first.iter().zip(second.iter()) {
        assert_eq!(x.pos, y.pos);
        assert_eq!(x.genome, y.genome);
    }
}
