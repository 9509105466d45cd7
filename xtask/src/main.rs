use std::path::Path;
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the toll simulation workspace",
    long_about = "A unified CLI for running scenarios, seed sweeps, benchmarks,\n\
                  and CI checks in the toll simulation workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reference Chennai scenario example
    Run,
    /// Run the reference scenario through the toll_sim CLI and write every export
    Report {
        /// Seed for the run
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Directory for the exported files
        #[arg(long, default_value = "target/toll_report")]
        out_dir: String,
    },
    /// Run a parallel seed sweep of the reference scenario
    Sweep {
        /// Number of seeds
        #[arg(long, default_value_t = 64)]
        seeds: u64,
    },
    /// Run Criterion benchmarks
    Bench,
    /// Compare benchmarks: stash changes, create baseline, restore, compare
    BenchCompare,
    /// Run CI checks (fmt, clippy, tests, examples, benchmarks)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Run load tests (ignored tests in toll_core)
    LoadTest,
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build and run the example scenario and the CLI
    Examples,
    /// Run benchmarks
    Bench,
    /// Run check + examples + bench
    All,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn spawn(program: &str, args: &[&str]) -> ExitStatus {
    eprintln!("+ {program} {}", args.join(" "));
    Command::new(program)
        .args(args)
        .status()
        .unwrap_or_else(|error| {
            eprintln!("failed to execute {program}: {error}");
            exit(1);
        })
}

fn run_or_exit(program: &str, args: &[&str]) {
    let status = spawn(program, args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn run_cargo(args: &[&str]) {
    run_or_exit("cargo", args);
}

fn run_git(args: &[&str]) {
    run_or_exit("git", args);
}

fn toll_sim(args: &[&str]) {
    let mut cargo_args = vec!["run", "-p", "toll_reports", "--bin", "toll_sim", "--release", "--"];
    cargo_args.extend_from_slice(args);
    run_cargo(&cargo_args);
}

fn report(seed: u64, out_dir: &str) {
    let dir = Path::new(out_dir);
    if let Err(error) = std::fs::create_dir_all(dir) {
        eprintln!("failed to create {}: {error}", dir.display());
        exit(1);
    }
    let seed = seed.to_string();
    let path = |name: &str| dir.join(name).display().to_string();
    let (csv, json, map, payments, notices) = (
        path("toll_report.csv"),
        path("toll_report.json"),
        path("map.geojson"),
        path("payments.parquet"),
        path("notices.parquet"),
    );
    toll_sim(&[
        "run",
        "--seed",
        &seed,
        "--report-csv",
        &csv,
        "--report-json",
        &json,
        "--map-json",
        &map,
        "--payments-parquet",
        &payments,
        "--notices-parquet",
        &notices,
    ]);
    eprintln!("\nExports written to {}", dir.display());
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test toll_core");
    run_cargo(&["test", "-p", "toll_core"]);

    step("Test toll_reports");
    run_cargo(&["test", "-p", "toll_reports"]);
}

fn ci_examples() {
    step("Run scenario_run (reference scenario)");
    run_cargo(&[
        "run",
        "-p",
        "toll_core",
        "--example",
        "scenario_run",
        "--release",
    ]);

    step("Run toll_sim sweep (8 seeds)");
    toll_sim(&["sweep", "--seeds", "8"]);
}

fn ci_bench() {
    step("Run benchmarks");
    run_cargo(&["bench", "--package", "toll_core", "--bench", "performance"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_cargo(&[
                "run",
                "-p",
                "toll_core",
                "--example",
                "scenario_run",
                "--release",
            ]);
        }
        Commands::Report { seed, out_dir } => report(seed, &out_dir),
        Commands::Sweep { seeds } => {
            let seeds = seeds.to_string();
            toll_sim(&["sweep", "--seeds", &seeds]);
        }
        Commands::Bench => ci_bench(),
        Commands::BenchCompare => {
            let baseline_dir = Path::new("target/criterion");
            if baseline_dir.exists() {
                step("Removing existing benchmark data");
                if let Err(error) = std::fs::remove_dir_all(baseline_dir) {
                    eprintln!("failed to remove target/criterion: {error}");
                    exit(1);
                }
            }

            step("Stashing current changes");
            run_git(&[
                "stash",
                "push",
                "-m",
                "Temporary stash for benchmark comparison",
            ]);

            step("Running benchmark to create baseline");
            run_cargo(&[
                "bench",
                "--package",
                "toll_core",
                "--bench",
                "performance",
                "--",
                "--save-baseline",
                "main",
            ]);

            step("Reapplying changes");
            run_git(&["stash", "pop"]);

            step("Running benchmark comparing against baseline");
            run_cargo(&[
                "bench",
                "--package",
                "toll_core",
                "--bench",
                "performance",
                "--",
                "--baseline",
                "main",
            ]);

            eprintln!("\nDone! Check the output above to see performance comparison.");
        }
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Examples => ci_examples(),
                CiJob::Bench => ci_bench(),
                CiJob::All => {
                    ci_check();
                    ci_examples();
                    ci_bench();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::LoadTest => {
            run_cargo(&[
                "test",
                "-p",
                "toll_core",
                "--test",
                "load_tests",
                "--",
                "--ignored",
            ]);
        }
    }
}
