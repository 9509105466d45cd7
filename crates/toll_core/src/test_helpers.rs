//! Shared fixtures for unit, integration and benchmark code.

use bevy_ecs::prelude::World;

use crate::scenario::{build_scenario, build_scenario_with_oracle, ScenarioParams, VehicleSpec};
use crate::spatial::{Coordinate, DistanceOracle, DistanceOracleResource};
use crate::zone::TollZone;

/// Origin used by test geographies.
pub const TEST_ORIGIN: Coordinate = Coordinate::new(13.0, 80.0);

/// Euclidean distance in degrees scaled by `km_per_degree`. Makes expected
/// tolls easy to compute by hand.
#[derive(Debug, Clone, Copy)]
pub struct PlanarDistance {
    pub km_per_degree: f64,
}

impl Default for PlanarDistance {
    fn default() -> Self {
        Self {
            km_per_degree: 100.0,
        }
    }
}

impl DistanceOracle for PlanarDistance {
    fn distance_km(&self, a: Coordinate, b: Coordinate) -> f64 {
        let dlat = b.lat - a.lat;
        let dlng = b.lng - a.lng;
        (dlat * dlat + dlng * dlng).sqrt() * self.km_per_degree
    }
}

/// Axis-aligned square of side `2 * half_side` degrees centred on `center`.
pub fn square_zone(center: Coordinate, half_side: f64) -> TollZone {
    TollZone::rectangle(
        Coordinate::new(center.lat - half_side, center.lng - half_side),
        Coordinate::new(center.lat + half_side, center.lng + half_side),
    )
}

/// A vehicle heading `dlat` degrees north of [TEST_ORIGIN].
pub fn test_vehicle(id: &str, dlat: f64) -> VehicleSpec {
    VehicleSpec::new(
        id,
        TEST_ORIGIN,
        Coordinate::new(TEST_ORIGIN.lat + dlat, TEST_ORIGIN.lng),
    )
}

/// A vehicle whose start and end coincide.
pub fn parked_vehicle(id: &str) -> VehicleSpec {
    VehicleSpec::new(id, TEST_ORIGIN, TEST_ORIGIN)
}

/// Seeded scenario with no congestion, no zones and no speed sections.
pub fn quiet_params(vehicles: Vec<VehicleSpec>) -> ScenarioParams {
    ScenarioParams::default()
        .with_seed(42)
        .with_vehicles(vehicles)
        .with_toll_zones(Vec::new())
        .with_speed_limit_sections(Vec::new())
        .with_congestion_delay_probability(0.0)
}

/// Create a world built from `params` using the [PlanarDistance] oracle.
///
/// # Panics
///
/// Panics if `params` fails validation.
pub fn create_test_world(params: ScenarioParams) -> World {
    let mut world = World::new();
    build_scenario_with_oracle(
        &mut world,
        params,
        DistanceOracleResource::new(PlanarDistance::default()),
    )
    .expect("test scenario should be valid");
    world
}

/// Create a world built from the reference scenario with a fixed seed.
///
/// # Panics
///
/// Panics if the reference scenario fails validation.
pub fn create_reference_world(seed: u64) -> World {
    let mut world = World::new();
    build_scenario(&mut world, ScenarioParams::default().with_seed(seed))
        .expect("reference scenario should be valid");
    world
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar_distance_scales_degrees() {
        let d = PlanarDistance::default()
            .distance_km(TEST_ORIGIN, Coordinate::new(TEST_ORIGIN.lat + 0.03, TEST_ORIGIN.lng + 0.04));
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn square_zone_contains_center() {
        let zone = square_zone(TEST_ORIGIN, 0.5);
        assert!(zone.contains(TEST_ORIGIN));
        assert!(!zone.contains(Coordinate::new(TEST_ORIGIN.lat + 0.6, TEST_ORIGIN.lng)));
    }
}
