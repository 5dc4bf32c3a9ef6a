// src/simulation/engine.rs

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::error::{Result, SimError};
use crate::model::costs::CostConstants;
use crate::model::distribution::DistributionTable;
use crate::model::policy::{EventSample, PolicyParameters};

/// Paired run totals, one row per Monte Carlo run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunResult {
    pub run: usize,
    pub cost_current: f64,
    pub cost_proposed: f64,
}

/// Prices failure events for a replacement policy.
///
/// Every event draws the technician delay first and the fan lifetime second
/// from the shared generator. The lifetime does not enter the cost, but it
/// is always drawn so a run consumes two uniforms per event.
#[derive(Debug, Clone)]
pub struct CostSimulator {
    lifetimes: DistributionTable,
    delays: DistributionTable,
    costs: CostConstants,
}

impl CostSimulator {
    pub fn new(lifetimes: DistributionTable, delays: DistributionTable, costs: CostConstants) -> Self {
        Self {
            lifetimes,
            delays,
            costs,
        }
    }

    /// Simulator over the stock tables and prices.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(
            DistributionTable::fan_lifetimes()?,
            DistributionTable::arrival_delays()?,
            CostConstants::default(),
        ))
    }

    pub fn costs(&self) -> &CostConstants {
        &self.costs
    }

    pub fn lifetimes(&self) -> &DistributionTable {
        &self.lifetimes
    }

    pub fn delays(&self) -> &DistributionTable {
        &self.delays
    }

    /// Draws the delay and lifetime for one event, in that order.
    pub fn draw_event<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<EventSample> {
        let delay_minutes = self.delays.sample(rng)?;
        let lifetime_hours = self.lifetimes.sample(rng)?;
        Ok(EventSample {
            delay_minutes,
            lifetime_hours,
        })
    }

    /// Total cost of `num_events` failures handled under `policy`.
    pub fn simulate_policy<R: Rng + ?Sized>(
        &self,
        policy: &PolicyParameters,
        num_events: usize,
        rng: &mut R,
    ) -> Result<f64> {
        policy.validate()?;
        if num_events == 0 {
            return Err(SimError::invalid_config("num_events must be positive"));
        }

        let mut total = 0.0;
        for event in 1..=num_events {
            let sample = self.draw_event(rng)?;
            let cost = self.costs.event_cost(policy, sample.delay_minutes);
            trace!(
                event,
                lifetime_hours = sample.lifetime_hours,
                delay_minutes = sample.delay_minutes,
                fans = policy.fans_to_replace,
                replacement = cost.replacement,
                downtime = cost.downtime,
                labor = cost.labor,
                total = cost.total(),
                "priced failure event"
            );
            total += cost.total();
        }
        Ok(total)
    }

    /// Runs both policies `num_runs` times on the same generator.
    ///
    /// Within a run the current policy is simulated before the proposed one,
    /// so a fixed seed always reproduces the same sequence.
    pub fn run_monte_carlo<R: Rng + ?Sized>(
        &self,
        current: &PolicyParameters,
        proposed: &PolicyParameters,
        num_runs: usize,
        num_events: usize,
        rng: &mut R,
    ) -> Result<Vec<RunResult>> {
        if num_runs == 0 {
            return Err(SimError::invalid_config("num_runs must be positive"));
        }
        current.validate()?;
        proposed.validate()?;

        info!(num_runs, num_events, "starting total-cost Monte Carlo");
        let mut results = Vec::with_capacity(num_runs);
        for run in 0..num_runs {
            let cost_current = self.simulate_policy(current, num_events, rng)?;
            let cost_proposed = self.simulate_policy(proposed, num_events, rng)?;
            debug!(run, cost_current, cost_proposed, "run complete");
            results.push(RunResult {
                run,
                cost_current,
                cost_proposed,
            });
        }
        Ok(results)
    }
}
