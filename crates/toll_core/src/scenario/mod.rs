//! Scenario setup: validate parameters, insert resources and spawn one
//! vehicle entity per configured route.

mod build;
mod params;

pub use build::{build_scenario, build_scenario_with_oracle};
pub use params::{
    ScenarioParams, SimulationHorizon, SpeedLimitSection, SpeedLimitSections, StationaryLimit,
    TollZones, VehicleSpec, DEFAULT_HORIZON_TICKS, DEFAULT_INITIAL_BALANCE, DEFAULT_ORIGIN,
    DEFAULT_STATIONARY_LIMIT,
};
