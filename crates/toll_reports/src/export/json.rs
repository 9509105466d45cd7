use serde::Serialize;

use crate::runner::SimulationRun;

#[derive(Serialize)]
struct RunDocument<'a> {
    seed: Option<u64>,
    summary: &'a crate::metrics::FleetSummary,
    vehicles: &'a [toll_core::report::VehicleReport],
}

pub(crate) fn export_run_json_impl(
    run: &SimulationRun,
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = RunDocument {
        seed: run.seed,
        summary: &run.summary,
        vehicles: &run.reports,
    };
    serde_json::to_writer_pretty(file, &document)?;
    Ok(())
}

pub(crate) fn export_value_impl(
    value: &serde_json::Value,
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}
