// src/analysis/statistics.rs

//! Descriptive statistics, histograms and t-tests over simulated costs.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::{Result, SimError};

/// Column summary of one policy's simulated costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Descriptive {
    pub count: usize,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub p05: f64,
    pub median: f64,
    pub p95: f64,
    pub max: f64,
}

impl Descriptive {
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(SimError::InsufficientData {
                context: "descriptive statistics",
                needed: 1,
                got: 0,
            });
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let variance = sample_variance(values);
        Ok(Self {
            count: values.len(),
            mean: mean(values),
            variance,
            std_dev: variance.sqrt(),
            min: sorted[0],
            p05: quantile_sorted(&sorted, 0.05),
            median: quantile_sorted(&sorted, 0.5),
            p95: quantile_sorted(&sorted, 0.95),
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample variance (n - 1 denominator); 0.0 below two values.
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Quantile of pre-sorted data with linear interpolation between ranks.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram over `[min, max]`; the last bin includes `max`.
///
/// When every value is identical the range widens to `value ± 0.5`.
pub fn histogram(values: &[f64], bins: usize) -> Result<Vec<HistogramBin>> {
    if bins == 0 {
        return Err(SimError::invalid_config("histogram needs at least one bin"));
    }
    if values.is_empty() {
        return Err(SimError::InsufficientData {
            context: "histogram",
            needed: 1,
            got: 0,
        });
    }

    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let index = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[index] += 1;
    }

    Ok(counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count,
        })
        .collect())
}

/// Outcome of a t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TTest {
    pub t: f64,
    pub degrees_of_freedom: f64,
    pub p_value: f64,
}

/// Welch's two-sample t-test (unequal variances), two-sided.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Result<TTest> {
    for sample in [a, b] {
        if sample.len() < 2 {
            return Err(SimError::InsufficientData {
                context: "Welch t-test",
                needed: 2,
                got: sample.len(),
            });
        }
    }
    let (na, nb) = (a.len() as f64, b.len() as f64);
    let (va, vb) = (sample_variance(a) / na, sample_variance(b) / nb);
    let diff = mean(a) - mean(b);
    let se = (va + vb).sqrt();

    if se == 0.0 {
        return Ok(degenerate(diff, na + nb - 2.0, false));
    }

    let t = diff / se;
    let df = (va + vb).powi(2) / (va.powi(2) / (na - 1.0) + vb.powi(2) / (nb - 1.0));
    let p_value = 2.0 * (1.0 - students_t(df)?.cdf(t.abs()));
    Ok(TTest {
        t,
        degrees_of_freedom: df,
        p_value: p_value.clamp(0.0, 1.0),
    })
}

/// Paired t-test on `a - b`, one-tailed with alternative `mean(a) > mean(b)`.
pub fn paired_t_test_greater(a: &[f64], b: &[f64]) -> Result<TTest> {
    if a.len() != b.len() {
        return Err(SimError::Statistics {
            context: "paired t-test",
            details: format!("samples differ in length: {} vs {}", a.len(), b.len()),
        });
    }
    if a.len() < 2 {
        return Err(SimError::InsufficientData {
            context: "paired t-test",
            needed: 2,
            got: a.len(),
        });
    }

    let diffs: Vec<f64> = a.iter().zip(b).map(|(x, y)| x - y).collect();
    let n = diffs.len() as f64;
    let df = n - 1.0;
    let d_mean = mean(&diffs);
    let se = (sample_variance(&diffs) / n).sqrt();

    if se == 0.0 {
        return Ok(degenerate(d_mean, df, true));
    }

    let t = d_mean / se;
    let p_value = 1.0 - students_t(df)?.cdf(t);
    Ok(TTest {
        t,
        degrees_of_freedom: df,
        p_value: p_value.clamp(0.0, 1.0),
    })
}

// No spread: the difference is either exactly zero or certain.
fn degenerate(diff: f64, df: f64, one_tailed_greater: bool) -> TTest {
    let (t, p_value) = if diff == 0.0 {
        (0.0, if one_tailed_greater { 0.5 } else { 1.0 })
    } else if diff > 0.0 {
        (f64::INFINITY, 0.0)
    } else {
        (f64::NEG_INFINITY, if one_tailed_greater { 1.0 } else { 0.0 })
    };
    TTest {
        t,
        degrees_of_freedom: df,
        p_value,
    }
}

fn students_t(df: f64) -> Result<StudentsT> {
    StudentsT::new(0.0, 1.0, df).map_err(|err| SimError::Statistics {
        context: "Student's t distribution",
        details: err.to_string(),
    })
}
