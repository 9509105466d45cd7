//! Reporting on top of `toll_core`: per-vehicle and fleet summaries, file
//! exports and parallel seed sweeps.
//!
//! ```no_run
//! use toll_core::scenario::ScenarioParams;
//! use toll_reports::{run_scenario, export_reports_csv};
//!
//! let run = run_scenario(ScenarioParams::default().with_seed(7)).unwrap();
//! export_reports_csv(&run.reports, "toll_report.csv").unwrap();
//! println!("collected {:.2}", run.summary.total_collected);
//! ```
//!
//! - [`runner`]: one run to completion, or many seeds in parallel with rayon
//! - [`metrics`]: fleet-level summary of a finished world
//! - [`export`]: CSV, JSON and GeoJSON writers
//! - [`table`]: plain-text report for the terminal

pub mod export;
pub mod metrics;
pub mod runner;
pub mod table;

pub use export::{export_map_geojson, export_reports_csv, export_reports_json, export_sweep_csv};
pub use metrics::{extract_summary, FleetSummary};
pub use runner::{run_scenario, run_seed_sweep, SimulationRun, SweepError, SweepResult};
