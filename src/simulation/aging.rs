// src/simulation/aging.rs

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, SimError};
use crate::model::policy::{PolicyParameters, FANS_PER_UNIT};
use crate::simulation::engine::CostSimulator;
use crate::strategy::traits::{FanLives, ReplacementPolicy};

/// One failure inside an aging trial.
#[derive(Debug, Clone, Serialize)]
pub struct FailureRecord {
    pub event: usize,
    pub elapsed_hours: f64,
    pub failed_fan: usize,
    pub delay_minutes: f64,
    pub fans_replaced: u32,
    pub cost: f64,
}

/// Cost per operating hour of both policies in one trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateResult {
    pub trial: usize,
    pub rate_current: f64,
    pub rate_proposed: f64,
}

/// A three-fan unit aging continuously between failures.
///
/// Each failure advances the clock by the shortest remaining life, draws
/// three fresh lifetimes and then one technician delay, and lets the policy
/// decide which fans get the fresh lifetimes.
pub struct AgingSimulation<'a> {
    simulator: &'a CostSimulator,
    policy: &'a dyn ReplacementPolicy,
    lives: FanLives,
    pub elapsed_hours: f64,
    pub total_cost: f64,
    pub history: Vec<FailureRecord>,
}

impl<'a> AgingSimulation<'a> {
    /// Installs three new fans drawn from the lifetime table.
    pub fn new<R: Rng + ?Sized>(
        simulator: &'a CostSimulator,
        policy: &'a dyn ReplacementPolicy,
        rng: &mut R,
    ) -> Result<Self> {
        let lives = draw_lives(simulator, rng)?;
        Ok(Self {
            simulator,
            policy,
            lives,
            elapsed_hours: 0.0,
            total_cost: 0.0,
            history: Vec::new(),
        })
    }

    pub fn lives(&self) -> &FanLives {
        &self.lives
    }

    pub fn run<R: Rng + ?Sized>(&mut self, num_events: usize, rng: &mut R) -> Result<()> {
        for _ in 0..num_events {
            self.step(rng)?;
        }
        Ok(())
    }

    fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        // Next failure: the fan with the least life left.
        let failed = (0..FANS_PER_UNIT)
            .min_by(|&a, &b| self.lives[a].total_cmp(&self.lives[b]))
            .unwrap_or(0);
        let time_to_failure = self.lives[failed];
        self.elapsed_hours += time_to_failure;
        for life in self.lives.iter_mut() {
            *life -= time_to_failure;
        }

        let fresh = draw_lives(self.simulator, rng)?;
        let delay_minutes = self.simulator.delays().sample(rng)?;
        let fans_replaced = self.policy.renew(&mut self.lives, failed, &fresh);

        let visit = PolicyParameters {
            fans_to_replace: fans_replaced,
            ..self.policy.parameters()
        };
        let cost = self.simulator.costs().event_cost(&visit, delay_minutes).total();
        self.total_cost += cost;

        self.history.push(FailureRecord {
            event: self.history.len() + 1,
            elapsed_hours: self.elapsed_hours,
            failed_fan: failed,
            delay_minutes,
            fans_replaced,
            cost,
        });
        Ok(())
    }

    /// Total cost divided by operating hours so far.
    pub fn cost_rate(&self) -> Result<f64> {
        if self.elapsed_hours <= 0.0 {
            return Err(SimError::InsufficientData {
                context: "cost rate",
                needed: 1,
                got: 0,
            });
        }
        Ok(self.total_cost / self.elapsed_hours)
    }
}

fn draw_lives<R: Rng + ?Sized>(simulator: &CostSimulator, rng: &mut R) -> Result<FanLives> {
    let mut lives = [0.0; FANS_PER_UNIT];
    for life in lives.iter_mut() {
        *life = simulator.lifetimes().sample(rng)?;
    }
    Ok(lives)
}

/// Generator for one trial: shared seed, one stream per trial.
pub fn trial_rng(seed: u64, trial: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(trial as u64);
    rng
}

/// Runs one trial of `policy` and returns the finished simulation.
pub fn run_trial<'a>(
    simulator: &'a CostSimulator,
    policy: &'a dyn ReplacementPolicy,
    num_events: usize,
    seed: u64,
    trial: usize,
) -> Result<AgingSimulation<'a>> {
    let mut rng = trial_rng(seed, trial);
    let mut sim = AgingSimulation::new(simulator, policy, &mut rng)?;
    sim.run(num_events, &mut rng)?;
    Ok(sim)
}

/// Checks that the aging model can run on `simulator`'s tables with both
/// policies. Every lifetime must be positive or the clock never advances.
pub fn validate_aging_inputs(
    simulator: &CostSimulator,
    current: &dyn ReplacementPolicy,
    proposed: &dyn ReplacementPolicy,
) -> Result<()> {
    if let Some(bad) = simulator.lifetimes().values().iter().find(|&&v| v <= 0.0) {
        return Err(SimError::invalid_distribution(
            simulator.lifetimes().name(),
            format!("lifetime {bad} must be positive for the aging model"),
        ));
    }
    current.parameters().validate()?;
    proposed.parameters().validate()
}

/// Cost per operating hour for both policies over `num_trials` trials.
///
/// Both policies replay the same random stream within a trial (common
/// random numbers), so per-trial differences come from the policy alone.
pub fn run_cost_rate_monte_carlo(
    simulator: &CostSimulator,
    current: &dyn ReplacementPolicy,
    proposed: &dyn ReplacementPolicy,
    num_trials: usize,
    num_events: usize,
    seed: u64,
) -> Result<Vec<RateResult>> {
    if num_trials == 0 || num_events == 0 {
        return Err(SimError::invalid_config(
            "cost-rate analysis needs at least one trial and one event",
        ));
    }
    validate_aging_inputs(simulator, current, proposed)?;

    info!(num_trials, num_events, seed, "starting cost-rate Monte Carlo");
    let mut results = Vec::with_capacity(num_trials);
    for trial in 0..num_trials {
        let rate_current = run_trial(simulator, current, num_events, seed, trial)?.cost_rate()?;
        let rate_proposed = run_trial(simulator, proposed, num_events, seed, trial)?.cost_rate()?;
        debug!(trial, rate_current, rate_proposed, "trial complete");
        results.push(RateResult {
            trial,
            rate_current,
            rate_proposed,
        });
    }
    Ok(results)
}
