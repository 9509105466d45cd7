//! Telemetry: notices emitted by vehicle steps and terminal outcomes.
//!
//! Every notice is also logged through `tracing` at the point it is raised;
//! the records here are what reports, exports and tests read back.

use bevy_ecs::prelude::Resource;
use serde::Serialize;

use crate::ecs::VehicleState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NoticeKind {
    /// A toll was deducted while the vehicle was inside `zone`.
    TollCharged {
        zone: usize,
        distance_km: f64,
        amount: f64,
        vendor: String,
        balance_after: f64,
    },
    /// Distance from the route start exceeded a section's limit value.
    SpeedLimitExceeded {
        section: String,
        limit_kmh: f64,
        distance_km: f64,
    },
    /// The vehicle was stopped after sitting on its destination.
    StationaryContingency { stationary_ticks: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub tick: u64,
    pub vehicle: String,
    pub kind: NoticeKind,
}

/// Recorded when a vehicle process reaches a terminal state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleOutcomeRecord {
    pub vehicle: String,
    pub state: VehicleState,
    pub finished_at: u64,
}

#[derive(Debug, Default, Resource)]
pub struct SimTelemetry {
    pub notices: Vec<Notice>,
    pub outcomes: Vec<VehicleOutcomeRecord>,
    /// Vehicle steps executed.
    pub steps: u64,
}

impl SimTelemetry {
    pub fn toll_notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices
            .iter()
            .filter(|n| matches!(n.kind, NoticeKind::TollCharged { .. }))
    }

    pub fn speeding_notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices
            .iter()
            .filter(|n| matches!(n.kind, NoticeKind::SpeedLimitExceeded { .. }))
    }

    pub fn contingency_notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices
            .iter()
            .filter(|n| matches!(n.kind, NoticeKind::StationaryContingency { .. }))
    }

    pub fn outcome_of(&self, vehicle: &str) -> Option<&VehicleOutcomeRecord> {
        self.outcomes.iter().find(|o| o.vehicle == vehicle)
    }
}
