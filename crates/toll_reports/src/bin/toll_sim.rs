//! Toll simulation CLI.
//!
//! ```bash
//! # Reference Chennai scenario with a fixed seed, report written as CSV
//! toll_sim run --seed 42 --report-csv toll_report.csv
//!
//! # Custom scenario from JSON, map for a GeoJSON viewer
//! toll_sim run --config scenario.json --map-json map.geojson
//!
//! # Fleet summaries for 64 seeds
//! toll_sim sweep --seeds 64 --output sweep.csv
//! ```

use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use toll_core::ledger::Account;
use toll_core::scenario::ScenarioParams;
use toll_core::telemetry::SimTelemetry;
use toll_core::telemetry_export::{write_notices_parquet, write_payments_parquet};
use toll_reports::export::{
    export_map_geojson, export_reports_csv, export_reports_json, export_sweep_csv,
};
use toll_reports::runner::{run_scenario, run_seed_sweep_with_progress};
use toll_reports::table::render_reports;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "toll_sim")]
#[command(version, about = "Discrete-event toll collection simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one scenario and print the per-vehicle report
    Run(RunArgs),
    /// Run the scenario under many seeds in parallel
    Sweep(SweepArgs),
}

#[derive(Args, Debug)]
struct ScenarioArgs {
    /// Scenario JSON file; missing fields take the reference scenario's values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulation horizon in ticks
    #[arg(long)]
    horizon: Option<u64>,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    scenario: ScenarioArgs,

    /// Random seed for reproducible runs. When omitted, entropy is used.
    #[arg(long, env = "TOLL_SIM_SEED")]
    seed: Option<u64>,

    #[arg(long)]
    report_csv: Option<PathBuf>,

    #[arg(long)]
    report_json: Option<PathBuf>,

    /// GeoJSON FeatureCollection of final positions and toll zones
    #[arg(long)]
    map_json: Option<PathBuf>,

    #[arg(long)]
    payments_parquet: Option<PathBuf>,

    #[arg(long)]
    notices_parquet: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SweepArgs {
    #[command(flatten)]
    scenario: ScenarioArgs,

    /// Number of seeds to run
    #[arg(long, default_value = "16")]
    seeds: u64,

    /// First seed; runs use `first_seed..first_seed + seeds`
    #[arg(long, default_value = "0")]
    first_seed: u64,

    /// Worker threads (default: one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Per-seed summary CSV
    #[arg(long)]
    output: Option<PathBuf>,
}

fn load_params(args: &ScenarioArgs) -> Result<ScenarioParams, Box<dyn Error>> {
    let mut params = match &args.config {
        Some(path) => serde_json::from_reader(File::open(path)?)?,
        None => ScenarioParams::default(),
    };
    if let Some(horizon) = args.horizon {
        params = params.with_horizon(horizon);
    }
    Ok(params)
}

fn run(args: RunArgs) -> Result<(), Box<dyn Error>> {
    let mut params = load_params(&args.scenario)?;
    if let Some(seed) = args.seed {
        params = params.with_seed(seed);
    }

    let run = run_scenario(params)?;
    print!("{}", render_reports(&run.reports, &run.summary));

    if let Some(path) = &args.report_csv {
        export_reports_csv(&run.reports, path)?;
        info!(path = %path.display(), "report written");
    }
    if let Some(path) = &args.report_json {
        export_reports_json(&run, path)?;
        info!(path = %path.display(), "report written");
    }
    if let Some(path) = &args.map_json {
        export_map_geojson(&run.snapshot, path)?;
        info!(path = %path.display(), "map written");
    }
    if let Some(path) = &args.payments_parquet {
        write_payments_parquet(path, run.world.resource::<Account>())?;
        info!(path = %path.display(), "payments written");
    }
    if let Some(path) = &args.notices_parquet {
        write_notices_parquet(path, run.world.resource::<SimTelemetry>())?;
        info!(path = %path.display(), "notices written");
    }
    Ok(())
}

fn sweep(args: SweepArgs) -> Result<(), Box<dyn Error>> {
    let params = load_params(&args.scenario)?;
    let seeds: Vec<u64> = (args.first_seed..args.first_seed.saturating_add(args.seeds)).collect();
    let results = run_seed_sweep_with_progress(&params, &seeds, args.threads, true)?;

    println!(
        "{:>8} {:>10} {:>14} {:>14}",
        "seed", "payments", "collected", "balance"
    );
    for result in &results {
        println!(
            "{:>8} {:>10} {:>14.2} {:>14.2}",
            result.seed,
            result.summary.payment_count,
            result.summary.total_collected,
            result.summary.final_balance
        );
    }

    if let Some(path) = &args.output {
        export_sweep_csv(&results, path)?;
        info!(path = %path.display(), runs = results.len(), "sweep written");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("toll_core=info,toll_reports=info,toll_sim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args),
        Command::Sweep(args) => sweep(args),
    }
}
