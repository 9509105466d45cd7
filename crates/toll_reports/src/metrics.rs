//! Fleet-level metrics extracted from a finished world.

use bevy_ecs::prelude::World;
use serde::Serialize;
use toll_core::ecs::{Vehicle, VehicleState};
use toll_core::ledger::Account;
use toll_core::telemetry::SimTelemetry;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FleetSummary {
    pub vehicles: usize,
    pub completed: usize,
    pub stationary_aborted: usize,
    /// Still running when the horizon was reached.
    pub running: usize,
    pub payment_count: usize,
    pub total_collected: f64,
    pub initial_balance: f64,
    pub final_balance: f64,
    pub speeding_notices: usize,
    pub contingency_notices: usize,
    /// Vehicle steps executed.
    pub steps: u64,
}

impl FleetSummary {
    /// Mean toll per payment, or 0 when nothing was charged.
    pub fn average_toll(&self) -> f64 {
        if self.payment_count == 0 {
            0.0
        } else {
            self.total_collected / self.payment_count as f64
        }
    }
}

pub fn extract_summary(world: &mut World) -> FleetSummary {
    let mut summary = FleetSummary::default();

    for vehicle in world.query::<&Vehicle>().iter(world) {
        summary.vehicles += 1;
        match vehicle.state {
            VehicleState::Running => summary.running += 1,
            VehicleState::Completed => summary.completed += 1,
            VehicleState::StationaryAborted => summary.stationary_aborted += 1,
        }
    }

    if let Some(account) = world.get_resource::<Account>() {
        summary.payment_count = account.payment_count();
        summary.total_collected = account.total_paid();
        summary.initial_balance = account.initial_balance();
        summary.final_balance = account.balance();
    }

    if let Some(telemetry) = world.get_resource::<SimTelemetry>() {
        summary.speeding_notices = telemetry.speeding_notices().count();
        summary.contingency_notices = telemetry.contingency_notices().count();
        summary.steps = telemetry.steps;
    }

    summary
}
