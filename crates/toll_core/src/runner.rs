//! Simulation runner: advances the clock and routes events into the ECS.
//!
//! Each step pops the next event from [SimulationClock], inserts it as
//! [CurrentEvent], then runs the schedule. Clock progression never happens
//! inside systems.

use bevy_ecs::prelude::{Res, Schedule, World};
use bevy_ecs::schedule::IntoSystemConfigs;

use crate::clock::{CurrentEvent, Event, EventKind, SimulationClock};
use crate::scenario::SimulationHorizon;
use crate::systems::{
    simulation_started::simulation_started_system, vehicle_step::vehicle_step_system,
};

fn is_simulation_started(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::SimulationStarted)
        .unwrap_or(false)
}

fn is_vehicle_step(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::VehicleStep)
        .unwrap_or(false)
}

/// Pops the next event unless the queue is empty or the event falls at or
/// past [SimulationHorizon] (when that resource is present).
fn pop_due_event(world: &mut World) -> Option<Event> {
    let horizon = world.get_resource::<SimulationHorizon>().map(|h| h.0);
    let next_ts = world
        .get_resource::<SimulationClock>()
        .and_then(|c| c.next_event_time());
    if let (Some(horizon), Some(ts)) = (horizon, next_ts) {
        if ts >= horizon {
            return None;
        }
    }
    world.get_resource_mut::<SimulationClock>()?.pop_next()
}

/// Runs one simulation step. Returns `false` when nothing was processed.
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> bool {
    let Some(event) = pop_due_event(world) else {
        return false;
    };
    world.insert_resource(CurrentEvent(event));
    schedule.run(world);
    true
}

/// Runs steps until the queue is empty, the horizon is reached, or
/// `max_steps` events have been processed. Returns the number processed.
pub fn run_until_empty(world: &mut World, schedule: &mut Schedule, max_steps: usize) -> usize {
    let mut steps = 0;
    while steps < max_steps && run_next_event(world, schedule) {
        steps += 1;
    }
    steps
}

/// The event-reacting systems, each gated on its event kind.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems((
        simulation_started_system.run_if(is_simulation_started),
        vehicle_step_system.run_if(is_vehicle_step),
    ));
    schedule
}

/// Schedules `SimulationStarted` at tick 0. Call after building the scenario.
pub fn initialize_simulation(world: &mut World) {
    let mut clock = world.resource_mut::<SimulationClock>();
    clock.schedule_at(0, EventKind::SimulationStarted, None);
}

/// Initializes and runs a built scenario until the horizon is reached or
/// every vehicle is terminal. Returns the number of events processed.
///
/// Finite routes and the horizon bound the run, so there is no step cap.
pub fn run_simulation(world: &mut World) -> usize {
    initialize_simulation(world);
    let mut schedule = simulation_schedule();
    let mut steps = 0;
    while run_next_event(world, &mut schedule) {
        steps += 1;
    }
    steps
}
