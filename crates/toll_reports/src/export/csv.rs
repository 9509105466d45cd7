use toll_core::ecs::VehicleState;
use toll_core::report::VehicleReport;

use crate::runner::SweepResult;

pub(crate) fn outcome_label(state: VehicleState) -> &'static str {
    match state {
        VehicleState::Running => "running",
        VehicleState::Completed => "completed",
        VehicleState::StationaryAborted => "stationary_aborted",
    }
}

pub(crate) fn export_reports_csv_impl(
    reports: &[VehicleReport],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "vehicle_id",
        "total_distance_km",
        "total_toll_paid_inr",
        "payment_vendors",
        "outcome",
        "finished_at",
        "points_visited",
    ])?;

    for report in reports {
        wtr.write_record([
            report.id.clone(),
            format!("{:.4}", report.total_distance_km),
            format!("{:.2}", report.total_toll_paid),
            report.vendors_used.join(";"),
            outcome_label(report.outcome).to_string(),
            report
                .finished_at
                .map(|t| t.to_string())
                .unwrap_or_default(),
            report.points_visited.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub(crate) fn export_sweep_csv_impl(
    results: &[SweepResult],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "seed",
        "vehicles",
        "completed",
        "stationary_aborted",
        "running",
        "payment_count",
        "total_collected",
        "final_balance",
        "speeding_notices",
        "steps",
    ])?;

    for result in results {
        let s = &result.summary;
        wtr.write_record([
            result.seed.to_string(),
            s.vehicles.to_string(),
            s.completed.to_string(),
            s.stationary_aborted.to_string(),
            s.running.to_string(),
            s.payment_count.to_string(),
            format!("{:.2}", s.total_collected),
            format!("{:.2}", s.final_balance),
            s.speeding_notices.to_string(),
            s.steps.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
