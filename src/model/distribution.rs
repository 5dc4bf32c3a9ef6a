// src/model/distribution.rs

use rand::Rng;

use crate::error::{Result, SimError};

/// Maximum allowed distance between the probability sum and 1.0.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Fan lifetime table: hours until a fan fails.
pub const FAN_LIFETIME_HOURS: [f64; 10] = [
    1000.0, 1100.0, 1200.0, 1300.0, 1400.0, 1500.0, 1600.0, 1700.0, 1800.0, 1900.0,
];
pub const FAN_LIFETIME_PROBS: [f64; 10] = [0.10, 0.13, 0.25, 0.13, 0.09, 0.12, 0.02, 0.06, 0.05, 0.05];

/// Technician arrival delay table: minutes until the technician is on site.
pub const ARRIVAL_DELAY_MINUTES: [f64; 3] = [20.0, 30.0, 45.0];
pub const ARRIVAL_DELAY_PROBS: [f64; 3] = [0.60, 0.30, 0.10];

/// A discrete distribution given as ordered (value, probability) pairs.
///
/// The probabilities are validated once at construction and never
/// renormalized. Sampling inverts the cumulative probabilities against a
/// single uniform draw, so every sample consumes exactly one `f64` from the
/// generator.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionTable {
    name: String,
    values: Vec<f64>,
    probabilities: Vec<f64>,
    cumulative: Vec<f64>,
}

impl DistributionTable {
    pub fn new(name: &str, entries: Vec<(f64, f64)>) -> Result<Self> {
        if entries.is_empty() {
            return Err(SimError::invalid_distribution(name, "table has no entries"));
        }

        let mut values = Vec::with_capacity(entries.len());
        let mut probabilities = Vec::with_capacity(entries.len());
        let mut cumulative = Vec::with_capacity(entries.len());
        let mut running = 0.0;

        for (value, probability) in entries {
            if !value.is_finite() {
                return Err(SimError::invalid_distribution(
                    name,
                    format!("value {value} is not finite"),
                ));
            }
            if !probability.is_finite() || probability < 0.0 {
                return Err(SimError::invalid_distribution(
                    name,
                    format!("probability {probability} for value {value} is not a valid weight"),
                ));
            }
            running += probability;
            values.push(value);
            probabilities.push(probability);
            cumulative.push(running);
        }

        if (running - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(SimError::invalid_distribution(
                name,
                format!("probabilities sum to {running}, expected 1.0"),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            values,
            probabilities,
            cumulative,
        })
    }

    /// Builds a table from parallel value/probability slices.
    pub fn from_columns(name: &str, values: &[f64], probabilities: &[f64]) -> Result<Self> {
        if values.len() != probabilities.len() {
            return Err(SimError::invalid_distribution(
                name,
                format!(
                    "{} values but {} probabilities",
                    values.len(),
                    probabilities.len()
                ),
            ));
        }
        let entries = values
            .iter()
            .copied()
            .zip(probabilities.iter().copied())
            .collect();
        Self::new(name, entries)
    }

    /// The stock fan lifetime table (hours).
    pub fn fan_lifetimes() -> Result<Self> {
        Self::from_columns("fan lifetime", &FAN_LIFETIME_HOURS, &FAN_LIFETIME_PROBS)
    }

    /// The stock technician delay table (minutes).
    pub fn arrival_delays() -> Result<Self> {
        Self::from_columns("arrival delay", &ARRIVAL_DELAY_MINUTES, &ARRIVAL_DELAY_PROBS)
    }

    /// A table that always yields `value`.
    pub fn constant(name: &str, value: f64) -> Result<Self> {
        Self::new(name, vec![(value, 1.0)])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Probability-weighted mean of the table's values.
    pub fn expected_value(&self) -> f64 {
        self.values
            .iter()
            .zip(&self.probabilities)
            .map(|(v, p)| v * p)
            .sum()
    }

    /// Draws one value, consuming one uniform `f64` from `rng`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
        let u: f64 = rng.gen();
        let index = inverse_cdf_index(&self.cumulative, u)?;
        Ok(self.values[index])
    }
}

/// Returns the first index whose cumulative probability exceeds `u`.
///
/// `u` is expected in `[0, 1)`. If rounding leaves the last cumulative entry
/// at or below `u`, the result is clamped to the last entry with positive
/// probability, so a trailing zero-weight value is never returned.
pub fn inverse_cdf_index(cumulative: &[f64], u: f64) -> Result<usize> {
    let last_weighted = last_weighted_index(cumulative).ok_or(SimError::Sampling)?;
    let index = cumulative.partition_point(|&c| c <= u);
    Ok(index.min(last_weighted))
}

// Last index where the cumulative sum strictly increases.
fn last_weighted_index(cumulative: &[f64]) -> Option<usize> {
    (0..cumulative.len()).rev().find(|&i| {
        let previous = if i == 0 { 0.0 } else { cumulative[i - 1] };
        cumulative[i] > previous
    })
}
