use fan_replacement_sim::analysis::summary::summarize_rates;
use fan_replacement_sim::model::policy::{PolicyKind, PolicyParameters};
use fan_replacement_sim::simulation::aging::{run_cost_rate_monte_carlo, run_trial};
use fan_replacement_sim::simulation::engine::CostSimulator;
use fan_replacement_sim::strategy::implementations::policy_for;

#[test]
fn failure_log_is_chronological() {
    let sim = CostSimulator::with_defaults().unwrap();
    let policy = policy_for(PolicyKind::Current, &PolicyParameters::current()).unwrap();
    let trial = run_trial(&sim, policy.as_ref(), 45, 42, 3).unwrap();

    assert_eq!(trial.history.len(), 45);
    assert!(trial
        .history
        .windows(2)
        .all(|w| w[0].elapsed_hours <= w[1].elapsed_hours));
    assert!(trial.history.iter().all(|r| r.fans_replaced == 1));
    let logged: f64 = trial.history.iter().map(|r| r.cost).sum();
    assert!((logged - trial.total_cost).abs() < 1e-6);
}

#[test]
fn replace_all_spends_more_per_visit() {
    let sim = CostSimulator::with_defaults().unwrap();
    let current = policy_for(PolicyKind::Current, &PolicyParameters::current()).unwrap();
    let proposed = policy_for(PolicyKind::Proposed, &PolicyParameters::proposed()).unwrap();

    let a = run_trial(&sim, current.as_ref(), 45, 42, 0).unwrap();
    let b = run_trial(&sim, proposed.as_ref(), 45, 42, 0).unwrap();
    assert!(b.total_cost > a.total_cost);
    // Fresh units last longer between failures under replace-all.
    assert!(b.elapsed_hours > a.elapsed_hours);
}

#[test]
fn rate_comparison_over_many_trials() {
    let sim = CostSimulator::with_defaults().unwrap();
    let current = policy_for(PolicyKind::Current, &PolicyParameters::current()).unwrap();
    let proposed = policy_for(PolicyKind::Proposed, &PolicyParameters::proposed()).unwrap();

    let results =
        run_cost_rate_monte_carlo(&sim, current.as_ref(), proposed.as_ref(), 200, 45, 42).unwrap();
    assert_eq!(results.len(), 200);

    let summary = summarize_rates(&results, 0.01).unwrap();
    assert!(summary.current.mean > 0.0 && summary.proposed.mean > 0.0);
    assert!(summary.test.p_value >= 0.0 && summary.test.p_value <= 1.0);
}
