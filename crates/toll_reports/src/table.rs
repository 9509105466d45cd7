//! Plain-text rendering of a run for the terminal.

use toll_core::report::VehicleReport;

use crate::metrics::FleetSummary;

pub fn render_reports(reports: &[VehicleReport], summary: &FleetSummary) -> String {
    let mut out = format!(
        "{:<12} {:>12} {:>14}  {:<20} {}\n",
        "vehicle", "distance_km", "toll_paid_inr", "outcome", "vendors"
    );
    for report in reports {
        out.push_str(&format!(
            "{:<12} {:>12.3} {:>14.2}  {:<20} {}\n",
            report.id,
            report.total_distance_km,
            report.total_toll_paid,
            format!("{:?}", report.outcome),
            report.vendors_used.join(", ")
        ));
    }
    out.push('\n');
    out.push_str(&format!(
        "payments: {}  collected: {:.2}  balance: {:.2} (from {:.2})\n",
        summary.payment_count, summary.total_collected, summary.final_balance, summary.initial_balance
    ));
    out.push_str(&format!(
        "completed: {}  stationary aborts: {}  still running: {}  speeding notices: {}\n",
        summary.completed, summary.stationary_aborted, summary.running, summary.speeding_notices
    ));
    out
}
