//! Scenario execution: a single run, or a seed sweep in parallel with rayon.

use bevy_ecs::prelude::World;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use toll_core::error::ConfigError;
use toll_core::report::{
    vehicle_reports, visualization_snapshot, VehicleReport, VisualizationSnapshot,
};
use toll_core::runner::run_simulation;
use toll_core::scenario::{build_scenario, ScenarioParams};
use tracing::{debug, info};

use crate::metrics::{extract_summary, FleetSummary};

#[derive(Debug, Error)]
pub enum SweepError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("invalid progress template: {0}")]
    Progress(#[from] indicatif::style::TemplateError),
}

/// A finished run. The world is kept for further inspection and export.
pub struct SimulationRun {
    pub seed: Option<u64>,
    pub events: usize,
    pub reports: Vec<VehicleReport>,
    pub summary: FleetSummary,
    pub snapshot: VisualizationSnapshot,
    pub world: World,
}

/// Builds `params` into a fresh world and runs it to the horizon.
pub fn run_scenario(params: ScenarioParams) -> Result<SimulationRun, ConfigError> {
    let seed = params.seed;
    let mut world = World::new();
    build_scenario(&mut world, params)?;
    let events = run_simulation(&mut world);

    let reports = vehicle_reports(&mut world);
    let summary = extract_summary(&mut world);
    let snapshot = visualization_snapshot(&mut world);
    info!(
        ?seed,
        events,
        payments = summary.payment_count,
        collected = format_args!("{:.2}", summary.total_collected),
        balance = format_args!("{:.2}", summary.final_balance),
        "simulation finished"
    );

    Ok(SimulationRun {
        seed,
        events,
        reports,
        summary,
        snapshot,
        world,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepResult {
    pub seed: u64,
    pub summary: FleetSummary,
}

/// Runs `params` once per seed, in parallel. Each run owns its world and
/// ledger. Results follow the order of `seeds`.
pub fn run_seed_sweep(
    params: &ScenarioParams,
    seeds: &[u64],
    num_threads: Option<usize>,
) -> Result<Vec<SweepResult>, SweepError> {
    run_seed_sweep_with_progress(params, seeds, num_threads, false)
}

pub fn run_seed_sweep_with_progress(
    params: &ScenarioParams,
    seeds: &[u64],
    num_threads: Option<usize>,
    show_progress: bool,
) -> Result<Vec<SweepResult>, SweepError> {
    // Reject bad parameters once rather than per seed.
    params.validate()?;

    let pb = if show_progress && !seeds.is_empty() {
        let bar = ProgressBar::new(seeds.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )?
                .progress_chars("#>-"),
        );
        Some(bar)
    } else {
        None
    };

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = num_threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;
    debug!(seeds = seeds.len(), threads = pool.current_num_threads(), "starting sweep");

    let results: Result<Vec<SweepResult>, ConfigError> = pool.install(|| {
        seeds
            .par_iter()
            .map(|&seed| {
                let run = run_scenario(params.clone().with_seed(seed))?;
                if let Some(ref progress_bar) = pb {
                    progress_bar.inc(1);
                }
                Ok(SweepResult {
                    seed,
                    summary: run.summary,
                })
            })
            .collect()
    });

    if let Some(ref progress_bar) = pb {
        progress_bar.finish_with_message("Completed");
    }

    Ok(results?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_run_reports_every_vehicle() {
        let run = run_scenario(ScenarioParams::default().with_seed(3)).expect("run");
        assert_eq!(run.reports.len(), 7);
        assert_eq!(run.snapshot.vehicles.len(), 7);
        assert_eq!(run.summary.completed, 7);
        let reported: f64 = run.reports.iter().map(|r| r.total_toll_paid).sum();
        assert!((reported - run.summary.total_collected).abs() < 1e-6);
    }

    #[test]
    fn sweep_matches_sequential_runs() {
        let params = ScenarioParams::default();
        let seeds = [1, 2, 3, 4];
        let results = run_seed_sweep(&params, &seeds, Some(2)).expect("sweep");

        assert_eq!(results.iter().map(|r| r.seed).collect::<Vec<_>>(), seeds);
        for result in &results {
            let run = run_scenario(params.clone().with_seed(result.seed)).expect("run");
            assert_eq!(run.summary, result.summary);
        }
    }

    #[test]
    fn sweep_rejects_invalid_params() {
        let params = ScenarioParams::default().with_horizon(0);
        assert!(matches!(
            run_seed_sweep(&params, &[1], None),
            Err(SweepError::Config(ConfigError::NonPositiveHorizon))
        ));
    }
}
