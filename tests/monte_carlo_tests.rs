use fan_replacement_sim::analysis::summary::summarize;
use fan_replacement_sim::model::costs::CostConstants;
use fan_replacement_sim::model::distribution::DistributionTable;
use fan_replacement_sim::model::policy::{PolicyKind, PolicyParameters};
use fan_replacement_sim::simulation::config::SimulationConfig;
use fan_replacement_sim::simulation::engine::{CostSimulator, RunResult};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn approx_eq(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "expected {b}, got {a}");
}

fn stock_runs(seed: u64, runs: usize) -> Vec<RunResult> {
    let sim = CostSimulator::with_defaults().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    sim.run_monte_carlo(
        &PolicyParameters::current(),
        &PolicyParameters::proposed(),
        runs,
        45,
        &mut rng,
    )
    .unwrap()
}

#[test]
fn same_seed_reproduces_every_run() {
    assert_eq!(stock_runs(42, 200), stock_runs(42, 200));
}

#[test]
fn each_run_simulates_current_then_proposed_on_one_stream() {
    let sim = CostSimulator::with_defaults().unwrap();
    let (current, proposed) = (PolicyParameters::current(), PolicyParameters::proposed());
    for seed in [1, 42, 2024] {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let runs = sim.run_monte_carlo(&current, &proposed, 2, 45, &mut rng).unwrap();

        let mut replay = ChaCha8Rng::seed_from_u64(seed);
        for run in &runs {
            let expected_current = sim.simulate_policy(&current, 45, &mut replay).unwrap();
            let expected_proposed = sim.simulate_policy(&proposed, 45, &mut replay).unwrap();
            assert_eq!(run.cost_current, expected_current);
            assert_eq!(run.cost_proposed, expected_proposed);
        }
    }
}

#[test]
fn different_seeds_diverge() {
    assert_ne!(stock_runs(42, 50), stock_runs(43, 50));
}

#[test]
fn fixed_delay_totals_match_manual_calculation() {
    let sim = CostSimulator::new(
        DistributionTable::fan_lifetimes().unwrap(),
        DistributionTable::constant("arrival delay", 20.0).unwrap(),
        CostConstants::default(),
    );
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let results = sim
        .run_monte_carlo(
            &PolicyParameters::current(),
            &PolicyParameters::proposed(),
            5,
            45,
            &mut rng,
        )
        .unwrap();
    for r in &results {
        assert_eq!(r.cost_current, 19_890.0);
        assert_eq!(r.cost_proposed, 32_220.0);
    }
}

#[test]
fn means_converge_to_expected_event_cost() {
    // E[delay] = 25.5 min, so E[event] is 497 (current) and 771 (proposed).
    let config = SimulationConfig::default();
    let results = stock_runs(config.seed, config.num_runs);
    let summary = summarize(&results, config.cost_significance).unwrap();

    approx_eq(summary.mean_current(), 45.0 * 497.0, 100.0);
    approx_eq(summary.mean_proposed(), 45.0 * 771.0, 100.0);
    assert_eq!(summary.recommendation, PolicyKind::Current);
    assert!(summary.significant);
}

#[test]
fn run_totals_are_never_negative() {
    assert!(stock_runs(11, 100)
        .iter()
        .all(|r| r.cost_current >= 0.0 && r.cost_proposed >= 0.0));
}

#[test]
fn invalid_policy_is_rejected_before_any_run() {
    let sim = CostSimulator::with_defaults().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let bad = PolicyParameters {
        fans_to_replace: 0,
        replacement_duration_minutes: 20.0,
    };
    let err = sim
        .run_monte_carlo(&bad, &PolicyParameters::proposed(), 10, 45, &mut rng)
        .unwrap_err();
    assert!(err.is_configuration());
}
