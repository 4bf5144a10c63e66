//! Tests for the round loop
//!
//! Covers the fixed-point property, sequential vs snapshot peer
//! visibility, pairing counts, snapshot timing, and dispersion.

use goal_alignment_core::{
    GoalCatalog, GoalStateSeed, InitialValues, Orchestrator, RoundMode, SimulationConfig, Tier,
};

const EPS: f64 = 1e-12;

/// Single-goal-per-tier catalog to keep arithmetic traceable
fn small_catalog() -> GoalCatalog {
    GoalCatalog::new(
        vec!["Safety".to_string()],
        vec!["TrafficManagement".to_string()],
        vec!["Braking".to_string()],
    )
}

fn two_agent_config(
    seeds: Vec<GoalStateSeed>,
    alpha: f64,
    beta: f64,
    round_mode: RoundMode,
) -> SimulationConfig {
    SimulationConfig {
        rng_seed: 1,
        agent_ids: vec!["CAR_0".to_string(), "CAR_1".to_string()],
        catalog: small_catalog(),
        alpha,
        beta,
        initial_values: InitialValues::Predetermined(seeds),
        round_mode,
    }
}

fn seed(high: f64, mid: f64, low: f64) -> GoalStateSeed {
    GoalStateSeed {
        high: vec![high],
        mid: vec![mid],
        low: vec![low],
    }
}

// ============================================================================
// Fixed point
// ============================================================================

#[test]
fn test_identical_population_is_a_fixed_point_sequential() {
    let catalog = GoalCatalog::default();
    let seeds = vec![
        GoalStateSeed::uniform(&catalog, 0.5),
        GoalStateSeed::uniform(&catalog, 0.5),
        GoalStateSeed::uniform(&catalog, 0.5),
    ];
    let config = SimulationConfig {
        rng_seed: 7,
        agent_ids: vec![
            "CAR_0".to_string(),
            "CAR_1".to_string(),
            "CAR_2".to_string(),
        ],
        catalog,
        alpha: 0.1,
        beta: 0.05,
        initial_values: InitialValues::Predetermined(seeds),
        round_mode: RoundMode::Sequential,
    };
    let mut orchestrator = Orchestrator::new(config).unwrap();
    let before = orchestrator.state().agent_snapshots();

    orchestrator.round();

    assert_eq!(orchestrator.state().agent_snapshots(), before);
}

#[test]
fn test_identical_population_is_a_fixed_point_snapshot() {
    let catalog = GoalCatalog::default();
    let seeds = vec![
        GoalStateSeed::uniform(&catalog, 0.25),
        GoalStateSeed::uniform(&catalog, 0.25),
    ];
    let config = SimulationConfig {
        rng_seed: 7,
        agent_ids: vec!["CAR_0".to_string(), "CAR_1".to_string()],
        catalog,
        alpha: 0.2,
        beta: 0.1,
        initial_values: InitialValues::Predetermined(seeds),
        round_mode: RoundMode::Snapshot,
    };
    let mut orchestrator = Orchestrator::new(config).unwrap();
    let before = orchestrator.state().agent_snapshots();

    orchestrator.round();

    assert_eq!(orchestrator.state().agent_snapshots(), before);
}

// ============================================================================
// Sequential vs snapshot visibility
// ============================================================================

#[test]
fn test_sequential_round_shows_updated_peers() {
    // beta 0 isolates the same-tier step. CAR_0 steps first:
    //   0.0 + 0.5 * (1.0 - 0.0) = 0.5
    // CAR_1 then sees the updated 0.5, not the original 0.0:
    //   1.0 + 0.5 * (0.5 - 1.0) = 0.75
    let config = two_agent_config(
        vec![seed(0.0, 0.0, 0.0), seed(1.0, 1.0, 1.0)],
        0.5,
        0.0,
        RoundMode::Sequential,
    );
    let mut orchestrator = Orchestrator::new(config).unwrap();

    orchestrator.round();

    let state = orchestrator.state();
    let car0 = state.get_agent("CAR_0").unwrap().goals();
    let car1 = state.get_agent("CAR_1").unwrap().goals();
    assert!((car0.high().get("Safety").unwrap() - 0.5).abs() < EPS);
    assert!((car1.high().get("Safety").unwrap() - 0.75).abs() < EPS);
}

#[test]
fn test_snapshot_round_shows_round_start_peers() {
    // Same setup, but CAR_1 reads CAR_0's frozen 0.0:
    //   1.0 + 0.5 * (0.0 - 1.0) = 0.5
    let config = two_agent_config(
        vec![seed(0.0, 0.0, 0.0), seed(1.0, 1.0, 1.0)],
        0.5,
        0.0,
        RoundMode::Snapshot,
    );
    let mut orchestrator = Orchestrator::new(config).unwrap();

    orchestrator.round();

    let state = orchestrator.state();
    let car0 = state.get_agent("CAR_0").unwrap().goals();
    let car1 = state.get_agent("CAR_1").unwrap().goals();
    assert!((car0.high().get("Safety").unwrap() - 0.5).abs() < EPS);
    assert!((car1.high().get("Safety").unwrap() - 0.5).abs() < EPS);
}

// ============================================================================
// Round bookkeeping
// ============================================================================

#[test]
fn test_round_counts_and_counter() {
    let config = SimulationConfig::default_population(3, 42);
    let mut orchestrator = Orchestrator::new(config).unwrap();
    assert_eq!(orchestrator.current_round(), 0);

    let result = orchestrator.round();

    // 3 agents, ordered pairs: 3 * 2 = 6 pairings. Default catalog has
    // 2 goals per tier, so each pairing applies 2+2+2 EMA updates plus
    // 4 + 4 leak nudges.
    assert_eq!(result.round, 0);
    assert_eq!(result.num_pairings, 6);
    assert_eq!(result.stats.high_updates, 12);
    assert_eq!(result.stats.mid_updates, 12);
    assert_eq!(result.stats.low_updates, 12);
    assert_eq!(result.stats.mid_to_high_nudges, 24);
    assert_eq!(result.stats.low_to_mid_nudges, 24);
    assert_eq!(orchestrator.current_round(), 1);

    let result = orchestrator.round();
    assert_eq!(result.round, 1);
}

#[test]
fn test_round_snapshots_are_post_step_values() {
    let config = two_agent_config(
        vec![seed(0.0, 0.0, 0.0), seed(1.0, 1.0, 1.0)],
        0.5,
        0.0,
        RoundMode::Sequential,
    );
    let mut orchestrator = Orchestrator::new(config).unwrap();

    let result = orchestrator.round();

    assert_eq!(result.agent_snapshots.len(), 2);
    assert_eq!(result.agent_snapshots[0].id, "CAR_0");
    let (_, car0_high) = result.agent_snapshots[0].high[0].clone();
    let (_, car1_high) = result.agent_snapshots[1].high[0].clone();
    assert!((car0_high - 0.5).abs() < EPS);
    assert!((car1_high - 0.75).abs() < EPS);
}

#[test]
fn test_rounds_converge_toward_agreement() {
    // Dispersion shrinks every round for sane rates
    let config = two_agent_config(
        vec![seed(0.1, 0.2, 0.3), seed(0.9, 0.8, 0.7)],
        0.1,
        0.05,
        RoundMode::Sequential,
    );
    let mut orchestrator = Orchestrator::new(config).unwrap();

    let mut previous = orchestrator.state().dispersion(Tier::Low);
    for _ in 0..10 {
        orchestrator.round();
        let current = orchestrator.state().dispersion(Tier::Low);
        assert!(current < previous);
        previous = current;
    }
    assert!(previous < 0.1);
}

#[test]
fn test_dispersion_measures_population_spread() {
    let config = two_agent_config(
        vec![seed(0.2, 0.5, 0.9), seed(0.6, 0.5, 0.1)],
        0.1,
        0.05,
        RoundMode::Sequential,
    );
    let orchestrator = Orchestrator::new(config).unwrap();
    let state = orchestrator.state();

    assert!((state.dispersion(Tier::High) - 0.4).abs() < EPS);
    assert!((state.dispersion(Tier::Mid) - 0.0).abs() < EPS);
    assert!((state.dispersion(Tier::Low) - 0.8).abs() < EPS);
}

#[test]
fn test_modes_differ_when_order_matters() {
    let seeds = vec![seed(0.0, 0.0, 0.0), seed(1.0, 1.0, 1.0)];

    let mut sequential = Orchestrator::new(two_agent_config(
        seeds.clone(),
        0.5,
        0.0,
        RoundMode::Sequential,
    ))
    .unwrap();
    let mut snapshot =
        Orchestrator::new(two_agent_config(seeds, 0.5, 0.0, RoundMode::Snapshot)).unwrap();

    sequential.round();
    snapshot.round();

    let seq_car1 = sequential
        .state()
        .get_agent("CAR_1")
        .unwrap()
        .goals()
        .high()
        .get("Safety")
        .unwrap();
    let snap_car1 = snapshot
        .state()
        .get_agent("CAR_1")
        .unwrap()
        .goals()
        .high()
        .get("Safety")
        .unwrap();

    assert!((seq_car1 - snap_car1).abs() > 0.1);
}
