// src/analysis/summary.rs

use serde::Serialize;

use crate::analysis::statistics::{paired_t_test_greater, welch_t_test, Descriptive, TTest};
use crate::error::{Result, SimError};
use crate::model::policy::PolicyKind;
use crate::simulation::aging::RateResult;
use crate::simulation::engine::RunResult;

/// Total-cost comparison across all Monte Carlo runs.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyComparison {
    pub current: Descriptive,
    pub proposed: Descriptive,
    /// Welch test; `None` with a single run.
    pub test: Option<TTest>,
    pub recommendation: PolicyKind,
    pub significant: bool,
}

impl PolicyComparison {
    pub fn mean_current(&self) -> f64 {
        self.current.mean
    }

    pub fn mean_proposed(&self) -> f64 {
        self.proposed.mean
    }

    /// Expected saving of the recommended policy over the other one.
    pub fn mean_saving(&self) -> f64 {
        (self.current.mean - self.proposed.mean).abs()
    }
}

/// Summarizes paired run totals and recommends the cheaper policy.
///
/// Ties go to the current policy since switching would gain nothing.
pub fn summarize(results: &[RunResult], significance: f64) -> Result<PolicyComparison> {
    if results.is_empty() {
        return Err(SimError::InsufficientData {
            context: "run summary",
            needed: 1,
            got: 0,
        });
    }
    let current: Vec<f64> = results.iter().map(|r| r.cost_current).collect();
    let proposed: Vec<f64> = results.iter().map(|r| r.cost_proposed).collect();

    let current_stats = Descriptive::from_values(&current)?;
    let proposed_stats = Descriptive::from_values(&proposed)?;
    let test = if results.len() >= 2 {
        Some(welch_t_test(&current, &proposed)?)
    } else {
        None
    };

    let recommendation = if proposed_stats.mean < current_stats.mean {
        PolicyKind::Proposed
    } else {
        PolicyKind::Current
    };

    Ok(PolicyComparison {
        current: current_stats,
        proposed: proposed_stats,
        significant: test.is_some_and(|t| t.p_value < significance),
        test,
        recommendation,
    })
}

/// Cost-per-hour comparison across aging trials.
#[derive(Debug, Clone, Serialize)]
pub struct RateComparison {
    pub current: Descriptive,
    pub proposed: Descriptive,
    /// Paired test of "current costs more per hour than proposed".
    pub test: TTest,
    /// True when the proposed policy is cheaper per hour at the requested level.
    pub proposed_significantly_cheaper: bool,
}

pub fn summarize_rates(results: &[RateResult], significance: f64) -> Result<RateComparison> {
    let current: Vec<f64> = results.iter().map(|r| r.rate_current).collect();
    let proposed: Vec<f64> = results.iter().map(|r| r.rate_proposed).collect();

    let test = paired_t_test_greater(&current, &proposed)?;
    let current_stats = Descriptive::from_values(&current)?;
    let proposed_stats = Descriptive::from_values(&proposed)?;

    Ok(RateComparison {
        proposed_significantly_cheaper: current_stats.mean > proposed_stats.mean
            && test.p_value < significance,
        current: current_stats,
        proposed: proposed_stats,
        test,
    })
}
