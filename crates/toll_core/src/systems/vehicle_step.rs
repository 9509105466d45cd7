//! Vehicle step system: runs one [`Vehicle::step`] for the event's subject.

use bevy_ecs::prelude::{Query, Res, ResMut};
use tracing::debug;

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::congestion::CongestionDelayModel;
use crate::ecs::Vehicle;
use crate::ledger::Account;
use crate::pricing::TollPricingConfig;
use crate::process::{StepContext, StepOutcome};
use crate::scenario::{SpeedLimitSections, StationaryLimit, TollZones};
use crate::spatial::DistanceOracleResource;
use crate::telemetry::{SimTelemetry, VehicleOutcomeRecord};
use crate::vendors::VendorSelectionResource;

#[allow(clippy::too_many_arguments)]
pub fn vehicle_step_system(
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    mut telemetry: ResMut<SimTelemetry>,
    mut vendors: ResMut<VendorSelectionResource>,
    mut delay: ResMut<CongestionDelayModel>,
    account: Res<Account>,
    pricing: Res<TollPricingConfig>,
    zones: Res<TollZones>,
    sections: Res<SpeedLimitSections>,
    oracle: Res<DistanceOracleResource>,
    stationary_limit: Res<StationaryLimit>,
    mut vehicles: Query<&mut Vehicle>,
) {
    if event.0.kind != EventKind::VehicleStep {
        return;
    }
    let Some(EventSubject::Vehicle(entity)) = event.0.subject else {
        return;
    };
    let Ok(mut vehicle) = vehicles.get_mut(entity) else {
        return;
    };

    let now = clock.now();
    let mut notices = Vec::new();
    let outcome = {
        let mut ctx = StepContext {
            now,
            toll_zones: &zones.0,
            speed_sections: &sections.0,
            pricing: &*pricing,
            oracle: oracle.0.as_ref(),
            account: &*account,
            vendors: vendors.0.as_mut(),
            delay: &mut *delay,
            stationary_limit: stationary_limit.0,
            notices: &mut notices,
        };
        vehicle.step(&mut ctx)
    };

    telemetry.steps += 1;
    telemetry.notices.append(&mut notices);

    match outcome {
        StepOutcome::Sleep { wake_at } => {
            clock.schedule_at(wake_at, EventKind::VehicleStep, Some(EventSubject::Vehicle(entity)));
        }
        StepOutcome::Done(state) => {
            debug!(vehicle = %vehicle.id, tick = now, ?state, "vehicle finished");
            telemetry.outcomes.push(VehicleOutcomeRecord {
                vehicle: vehicle.id.clone(),
                state,
                finished_at: now,
            });
        }
    }
}
