// src/cli.rs

// Command-line entry point: resolve config, run both analyses, write reports.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};

use crate::analysis::summary::{summarize, summarize_rates};
use crate::error::Result;
use crate::io::reporting::{
    cost_histogram, format_cost_summary, format_rate_summary, format_table, write_csv,
};
use crate::io::tables::table_or_default;
use crate::model::distribution::DistributionTable;
use crate::model::policy::PolicyKind;
use crate::simulation::aging::{run_cost_rate_monte_carlo, run_trial, validate_aging_inputs};
use crate::simulation::config::SimulationConfig;
use crate::simulation::engine::CostSimulator;
use crate::strategy::implementations::policy_for;
use crate::strategy::traits::ReplacementPolicy;

/// Monte Carlo comparison of replace-one-fan vs replace-all-fans maintenance.
#[derive(Debug, Parser)]
#[command(name = "fan-replacement-sim", version, about)]
pub struct Cli {
    /// TOML file with simulation settings; flags below override it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seed for the random generator.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of Monte Carlo runs (and aging trials).
    #[arg(long)]
    pub runs: Option<usize>,

    /// Failure events per run.
    #[arg(long)]
    pub events: Option<usize>,

    /// CSV (value,probability) replacing the built-in fan lifetime table.
    #[arg(long)]
    pub lifetime_table: Option<PathBuf>,

    /// CSV (value,probability) replacing the built-in arrival delay table.
    #[arg(long)]
    pub delay_table: Option<PathBuf>,

    /// Directory for the CSV outputs.
    #[arg(long, default_value = "results")]
    pub output_dir: PathBuf,

    /// Only run the total-cost comparison.
    #[arg(long)]
    pub skip_rate_analysis: bool,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied, validated.
    pub fn resolve_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_toml_file(path)?,
            None => SimulationConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(runs) = self.runs {
            config.num_runs = runs;
        }
        if let Some(events) = self.events {
            config.num_events = events;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn build_simulator(&self, config: &SimulationConfig) -> Result<CostSimulator> {
        let lifetimes = table_or_default(
            "fan lifetime",
            self.lifetime_table.as_deref(),
            DistributionTable::fan_lifetimes,
        )?;
        let delays = table_or_default(
            "arrival delay",
            self.delay_table.as_deref(),
            DistributionTable::arrival_delays,
        )?;
        Ok(CostSimulator::new(lifetimes, delays, config.costs))
    }
}

/// Runs everything the command line asks for. Setup errors surface before
/// any simulation starts.
pub fn run(cli: &Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    let simulator = cli.build_simulator(&config)?;
    let aging_policies = if cli.skip_rate_analysis {
        None
    } else {
        let current = policy_for(PolicyKind::Current, &config.current)?;
        let proposed = policy_for(PolicyKind::Proposed, &config.proposed)?;
        validate_aging_inputs(&simulator, current.as_ref(), proposed.as_ref())?;
        Some((current, proposed))
    };
    info!(seed = config.seed, runs = config.num_runs, events = config.num_events, "configuration resolved");

    println!("=== Cooling Fan Replacement Policy Simulation ===");
    println!("{}", format_table(simulator.lifetimes(), "hrs"));
    println!("{}", format_table(simulator.delays(), "min"));

    run_total_cost(&simulator, &config, &cli.output_dir)?;
    if let Some((current, proposed)) = &aging_policies {
        run_cost_rate(
            &simulator,
            current.as_ref(),
            proposed.as_ref(),
            &config,
            &cli.output_dir,
        )?;
    }

    println!("{}", completion_message(&cli.output_dir));
    Ok(())
}

/// Maps the outcome of [`run`] to a process exit code. A failure is logged
/// once through `tracing`, which writes to stderr.
pub fn exit_code(outcome: Result<()>) -> ExitCode {
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(configuration = err.is_configuration(), "{err}");
            ExitCode::FAILURE
        }
    }
}

fn completion_message(out: &Path) -> String {
    format!("Simulation complete. CSV output in {}", out.display())
}

fn run_total_cost(simulator: &CostSimulator, config: &SimulationConfig, out: &Path) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let results = simulator.run_monte_carlo(
        &config.current,
        &config.proposed,
        config.num_runs,
        config.num_events,
        &mut rng,
    )?;
    let summary = summarize(&results, config.cost_significance)?;

    write_csv(&out.join("run_results.csv"), &results)?;
    write_csv(
        &out.join("cost_histogram.csv"),
        &cost_histogram(&results, config.histogram_bins)?,
    )?;

    println!(
        "{}",
        format_cost_summary(&summary, config.num_events, config.cost_significance)
    );
    Ok(())
}

fn run_cost_rate(
    simulator: &CostSimulator,
    current: &dyn ReplacementPolicy,
    proposed: &dyn ReplacementPolicy,
    config: &SimulationConfig,
    out: &Path,
) -> Result<()> {
    let results = run_cost_rate_monte_carlo(
        simulator,
        current,
        proposed,
        config.num_runs,
        config.num_events,
        config.seed,
    )?;
    write_csv(&out.join("cost_rates.csv"), &results)?;

    // Failure-by-failure log of the first trial under each policy.
    for (name, policy) in [("current", current), ("proposed", proposed)] {
        let trial = run_trial(simulator, policy, config.num_events, config.seed, 0)?;
        write_csv(&out.join(format!("failure_log_{name}.csv")), &trial.history)?;
    }

    if results.len() < 2 {
        println!("Cost-per-hour comparison needs at least two trials; skipping the paired test.");
        return Ok(());
    }
    let summary = summarize_rates(&results, config.rate_significance)?;
    println!("{}", format_rate_summary(&summary, config.rate_significance));
    Ok(())
}
