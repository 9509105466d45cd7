//! File exports for reports, maps and sweeps.

use std::path::Path;

use toll_core::report::{VehicleReport, VisualizationSnapshot};

use crate::runner::{SimulationRun, SweepResult};

#[path = "export/csv.rs"]
mod csv;
#[path = "export/geojson.rs"]
mod geojson;
#[path = "export/json.rs"]
mod json;
#[path = "export/writer_utils.rs"]
mod writer_utils;

pub use geojson::map_feature_collection;

/// Write one row per vehicle report.
///
/// # Errors
///
/// Returns an error if `reports` is empty, or if file creation or CSV
/// writing fails.
pub fn export_reports_csv(
    reports: &[VehicleReport],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(reports)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_reports_csv_impl(reports, file)
}

/// Write the run's reports and fleet summary as pretty-printed JSON.
pub fn export_reports_json(
    run: &SimulationRun,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::export_run_json_impl(run, file)
}

/// Write final vehicle positions and toll zones as a GeoJSON
/// `FeatureCollection`.
pub fn export_map_geojson(
    snapshot: &VisualizationSnapshot,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::export_value_impl(&map_feature_collection(snapshot), file)
}

/// Write one row per sweep seed.
pub fn export_sweep_csv(
    results: &[SweepResult],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(results)?;
    let file = writer_utils::create_output_file(path)?;
    csv::export_sweep_csv_impl(results, file)
}
