//! Starts one vehicle process per running vehicle.

use bevy_ecs::prelude::{Entity, Query, Res, ResMut};

use crate::clock::{CurrentEvent, EventKind, EventSubject, SimulationClock};
use crate::ecs::Vehicle;

/// Schedules the first step of every running vehicle at the current tick,
/// in fleet order so same-tick steps run in configuration order.
pub fn simulation_started_system(
    mut clock: ResMut<SimulationClock>,
    event: Res<CurrentEvent>,
    vehicles: Query<(Entity, &Vehicle)>,
) {
    if event.0.kind != EventKind::SimulationStarted {
        return;
    }

    let mut running: Vec<(usize, Entity)> = vehicles
        .iter()
        .filter(|(_, vehicle)| vehicle.is_running())
        .map(|(entity, vehicle)| (vehicle.fleet_index, entity))
        .collect();
    running.sort_unstable_by_key(|(fleet_index, _)| *fleet_index);

    let now = clock.now();
    for (_, entity) in running {
        clock.schedule_at(now, EventKind::VehicleStep, Some(EventSubject::Vehicle(entity)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::{Schedule, World};

    use crate::route::Route;
    use crate::spatial::Coordinate;

    #[test]
    fn schedules_running_vehicles_in_fleet_order() {
        let mut world = World::new();
        world.insert_resource(SimulationClock::default());

        let p = Coordinate::new(13.0, 80.0);
        let route = Route::interpolate(p, p, 2).expect("route");
        let second = world
            .spawn(Vehicle::new("b", 1, route.clone(), vec!["V".into()]))
            .id();
        let first = world
            .spawn(Vehicle::new("a", 0, route.clone(), vec!["V".into()]))
            .id();
        let mut done = Vehicle::new("c", 2, route, vec!["V".into()]);
        done.state = crate::ecs::VehicleState::Completed;
        world.spawn(done);

        world
            .resource_mut::<SimulationClock>()
            .schedule_at(0, EventKind::SimulationStarted, None);
        let event = world
            .resource_mut::<SimulationClock>()
            .pop_next()
            .expect("started event");
        world.insert_resource(CurrentEvent(event));

        let mut schedule = Schedule::default();
        schedule.add_systems(simulation_started_system);
        schedule.run(&mut world);

        let mut clock = world.resource_mut::<SimulationClock>();
        assert_eq!(clock.pending(), 2);
        let order: Vec<_> = std::iter::from_fn(|| clock.pop_next())
            .filter_map(|e| e.subject)
            .collect();
        assert_eq!(
            order,
            vec![EventSubject::Vehicle(first), EventSubject::Vehicle(second)]
        );
    }
}
