use bevy_ecs::prelude::World;
use tracing::debug;

use crate::clock::SimulationClock;
use crate::congestion::CongestionDelayModel;
use crate::ecs::Vehicle;
use crate::error::ConfigError;
use crate::ledger::Account;
use crate::route::Route;
use crate::scenario::params::{
    ScenarioParams, SimulationHorizon, SpeedLimitSections, StationaryLimit, TollZones,
};
use crate::spatial::DistanceOracleResource;
use crate::telemetry::SimTelemetry;
use crate::vendors::VendorSelectionResource;

/// Builds the scenario with the default cached haversine oracle.
pub fn build_scenario(world: &mut World, params: ScenarioParams) -> Result<(), ConfigError> {
    build_scenario_with_oracle(world, params, DistanceOracleResource::default())
}

/// Validates `params`, then inserts every simulation resource and spawns the
/// vehicles. Nothing is inserted when validation fails.
pub fn build_scenario_with_oracle(
    world: &mut World,
    params: ScenarioParams,
    oracle: DistanceOracleResource,
) -> Result<(), ConfigError> {
    params.validate()?;

    world.insert_resource(SimulationClock::default());
    world.insert_resource(SimTelemetry::default());
    world.insert_resource(SimulationHorizon(params.horizon_ticks));
    world.insert_resource(StationaryLimit(params.stationary_limit));
    world.insert_resource(Account::new(params.initial_balance));
    world.insert_resource(params.pricing.clone());
    world.insert_resource(TollZones(params.toll_zones.clone()));
    world.insert_resource(SpeedLimitSections(params.speed_limit_sections.clone()));
    world.insert_resource(oracle);

    world.insert_resource(VendorSelectionResource::from_kind(
        params.vendor_policy,
        params.seed.map(|seed| seed.wrapping_add(0x0071_1073_beef)),
    ));
    world.insert_resource(CongestionDelayModel::new(
        params.seed.map(|seed| seed ^ 0x5eed_cafe),
        params.congestion_delay_probability,
    ));

    for (fleet_index, spec) in params.vehicles.iter().enumerate() {
        let route = Route::interpolate(spec.start, spec.end, params.route_segments).ok_or_else(
            || ConfigError::EmptyRoute {
                vehicle: spec.id.clone(),
            },
        )?;
        let vendors = params.vendors_for(spec).to_vec();
        world.spawn(Vehicle::new(spec.id.clone(), fleet_index, route, vendors));
    }

    debug!(
        vehicles = params.vehicles.len(),
        zones = params.toll_zones.len(),
        horizon = params.horizon_ticks,
        "scenario built"
    );
    Ok(())
}
