// src/simulation/config.rs

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SimError};
use crate::model::costs::CostConstants;
use crate::model::policy::PolicyParameters;

pub const NUM_FAILURES_PER_RUN: usize = 45;
pub const NUM_MONTE_CARLO_RUNS: usize = 1000;
pub const RANDOM_SEED: u64 = 42;
pub const HISTOGRAM_BINS: usize = 30;
/// Upper bound on histogram bins accepted from a config file.
pub const MAX_HISTOGRAM_BINS: usize = 10_000;
/// Significance level for the total-cost comparison.
pub const COST_SIGNIFICANCE: f64 = 0.05;
/// Significance level for the cost-per-hour comparison.
pub const RATE_SIGNIFICANCE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub num_runs: usize,
    pub num_events: usize,
    pub seed: u64,
    pub costs: CostConstants,
    pub current: PolicyParameters,
    pub proposed: PolicyParameters,
    pub histogram_bins: usize,
    pub cost_significance: f64,
    pub rate_significance: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_runs: NUM_MONTE_CARLO_RUNS,
            num_events: NUM_FAILURES_PER_RUN,
            seed: RANDOM_SEED,
            costs: CostConstants::default(),
            current: PolicyParameters::current(),
            proposed: PolicyParameters::proposed(),
            histogram_bins: HISTOGRAM_BINS,
            cost_significance: COST_SIGNIFICANCE,
            rate_significance: RATE_SIGNIFICANCE,
        }
    }
}

impl SimulationConfig {
    /// Reads a TOML config file. Missing keys fall back to the defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|err| SimError::ConfigParse {
            path: path.to_path_buf(),
            details: err.to_string(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_runs == 0 {
            return Err(SimError::invalid_config("num_runs must be positive"));
        }
        if self.num_events == 0 {
            return Err(SimError::invalid_config("num_events must be positive"));
        }
        if self.histogram_bins == 0 || self.histogram_bins > MAX_HISTOGRAM_BINS {
            return Err(SimError::invalid_config(format!(
                "histogram_bins must lie in 1..={MAX_HISTOGRAM_BINS}, got {}",
                self.histogram_bins
            )));
        }
        if !self.costs.is_valid() {
            return Err(SimError::invalid_config(
                "cost constants must be finite and non-negative",
            ));
        }
        for (name, alpha) in [
            ("cost_significance", self.cost_significance),
            ("rate_significance", self.rate_significance),
        ] {
            if !(alpha > 0.0 && alpha < 1.0) {
                return Err(SimError::invalid_config(format!(
                    "{name} must lie in (0, 1), got {alpha}"
                )));
            }
        }
        self.current.validate()?;
        self.proposed.validate()?;
        Ok(())
    }
}
