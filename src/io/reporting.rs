// src/io/reporting.rs

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::analysis::statistics::{histogram, Descriptive};
use crate::analysis::summary::{PolicyComparison, RateComparison};
use crate::error::{Result, SimError};
use crate::model::distribution::DistributionTable;
use crate::model::policy::PolicyKind;
use crate::simulation::engine::RunResult;

/// One histogram bin tagged with its policy.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramRow {
    pub policy: PolicyKind,
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Writes any serializable rows to a CSV file, header first.
///
/// # Arguments
/// * `file_path` - Destination file; parent directories are created.
/// * `rows` - Records to serialize, one per line.
pub fn write_csv<T: Serialize>(file_path: &Path, rows: &[T]) -> Result<()> {
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| SimError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let csv_error = |source| SimError::Csv {
        path: file_path.to_path_buf(),
        source,
    };

    let mut wtr = csv::Writer::from_path(file_path).map_err(csv_error)?;
    for row in rows {
        wtr.serialize(row).map_err(csv_error)?;
    }
    wtr.flush().map_err(|source| SimError::Io {
        path: file_path.to_path_buf(),
        source,
    })?;

    info!(rows = rows.len(), path = %file_path.display(), "exported CSV");
    Ok(())
}

/// Histogram rows for both policies' run totals, for external plotting.
pub fn cost_histogram(results: &[RunResult], bins: usize) -> Result<Vec<HistogramRow>> {
    let current: Vec<f64> = results.iter().map(|r| r.cost_current).collect();
    let proposed: Vec<f64> = results.iter().map(|r| r.cost_proposed).collect();

    let mut rows = Vec::with_capacity(bins * 2);
    for (policy, values) in [(PolicyKind::Current, current), (PolicyKind::Proposed, proposed)] {
        rows.extend(histogram(&values, bins)?.into_iter().map(|bin| HistogramRow {
            policy,
            lower: bin.lower,
            upper: bin.upper,
            count: bin.count,
        }));
    }
    Ok(rows)
}

/// Renders a distribution table as text rows.
pub fn format_table(table: &DistributionTable, unit: &str) -> String {
    let mut out = format!("{} ({unit})\n", table.name());
    for (value, probability) in table.values().iter().zip(table.probabilities()) {
        out.push_str(&format!("  {value:>8.0}  {probability:.2}\n"));
    }
    out
}

fn format_descriptive(label: &str, d: &Descriptive) -> String {
    format!(
        "{label:<10} mean ${:>10.2}  sd ${:>8.2}  min ${:>10.2}  p05 ${:>10.2}  median ${:>10.2}  p95 ${:>10.2}  max ${:>10.2}",
        d.mean, d.std_dev, d.min, d.p05, d.median, d.p95, d.max
    )
}

/// Text report of the total-cost comparison.
pub fn format_cost_summary(summary: &PolicyComparison, num_events: usize, significance: f64) -> String {
    let mut out = format!("=== Total Cost per {num_events} Failures ===\n");
    out.push_str(&format_descriptive("Current", &summary.current));
    out.push('\n');
    out.push_str(&format_descriptive("Proposed", &summary.proposed));
    out.push('\n');

    match summary.test {
        Some(test) => {
            out.push_str(&format!(
                "Two-sample t-test (unequal var): t = {:.3}, p = {:.3e}\n",
                test.t, test.p_value
            ));
            if summary.significant {
                out.push_str(&format!(
                    "{} policy has significantly lower total cost (alpha = {significance}).\n",
                    summary.recommendation
                ));
            } else {
                out.push_str(&format!(
                    "No significant difference in total cost (alpha = {significance}).\n"
                ));
            }
        }
        None => out.push_str("Single run: no significance test.\n"),
    }
    out.push_str(&format!(
        "Recommendation: {} policy (expected saving ${:.2} per {num_events} failures)\n",
        summary.recommendation,
        summary.mean_saving()
    ));
    out
}

/// Text report of the cost-per-hour comparison.
pub fn format_rate_summary(summary: &RateComparison, significance: f64) -> String {
    let mut out = String::from("=== Cost per Operating Hour (continuous aging) ===\n");
    out.push_str(&format!(
        "Current    mean ${:.4}/hr  sd {:.4}\n",
        summary.current.mean, summary.current.std_dev
    ));
    out.push_str(&format!(
        "Proposed   mean ${:.4}/hr  sd {:.4}\n",
        summary.proposed.mean, summary.proposed.std_dev
    ));
    out.push_str(&format!(
        "Paired t-test: t = {:.3}, one-tailed p = {:.3e}\n",
        summary.test.t, summary.test.p_value
    ));
    if summary.proposed_significantly_cheaper {
        out.push_str(&format!(
            "Proposed policy has significantly lower cost per hour (alpha = {significance}).\n"
        ));
    } else {
        out.push_str(&format!(
            "No significant advantage in cost per hour (alpha = {significance}).\n"
        ));
    }
    out
}
