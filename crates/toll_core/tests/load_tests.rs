//! Load tests for toll_core: throughput with a large fleet.

use std::time::Instant;

use bevy_ecs::prelude::World;
use toll_core::ecs::{Vehicle, VehicleState};
use toll_core::runner::run_simulation;
use toll_core::scenario::{build_scenario, ScenarioParams, VehicleSpec, DEFAULT_ORIGIN};
use toll_core::spatial::Coordinate;

fn large_fleet(count: usize) -> Vec<VehicleSpec> {
    (0..count)
        .map(|i| {
            let offset = (i % 100) as f64 * 0.001;
            VehicleSpec::new(
                format!("Vehicle_{i}"),
                DEFAULT_ORIGIN,
                Coordinate::new(13.10 + offset, 80.27 + offset * 0.5),
            )
        })
        .collect()
}

#[test]
#[ignore] // Only run explicitly: cargo test --package toll_core --test load_tests -- --ignored
fn test_large_fleet_throughput() {
    let mut world = World::new();
    let params = ScenarioParams::default()
        .with_seed(42)
        .with_vehicles(large_fleet(5_000));
    build_scenario(&mut world, params).expect("valid scenario");

    let start = Instant::now();
    let events = run_simulation(&mut world);
    let duration = start.elapsed();

    let events_per_sec = events as f64 / duration.as_secs_f64();
    println!(
        "Large fleet: {} events in {:.2}s ({:.0} events/sec)",
        events,
        duration.as_secs_f64(),
        events_per_sec
    );
    assert!(
        events_per_sec > 1000.0,
        "Should process >1000 events/sec, got {:.0}",
        events_per_sec
    );
}

#[test]
#[ignore] // Only run explicitly: cargo test --package toll_core --test load_tests -- --ignored
fn test_million_point_route_completes() {
    let mut world = World::new();
    let params = ScenarioParams::default()
        .with_seed(42)
        .with_vehicles(vec![VehicleSpec::new(
            "Vehicle_0",
            DEFAULT_ORIGIN,
            Coordinate::new(13.20, 80.30),
        )])
        .with_route_segments(1_000_000)
        .with_horizon(10_000_000)
        .with_congestion_delay_probability(0.0);
    build_scenario(&mut world, params).expect("valid scenario");

    let events = run_simulation(&mut world);
    assert_eq!(events, 1_000_003);
    let vehicle = world
        .query::<&Vehicle>()
        .iter(&world)
        .next()
        .cloned()
        .expect("vehicle");
    assert_eq!(vehicle.state, VehicleState::Completed);
    assert_eq!(vehicle.points_visited(), 1_000_001);
}
