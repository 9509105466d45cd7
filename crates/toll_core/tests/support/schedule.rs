#![allow(dead_code)]

use bevy_ecs::prelude::World;
use bevy_ecs::schedule::Schedule;
use toll_core::runner::{
    initialize_simulation, run_next_event, run_until_empty, simulation_schedule,
};

/// Owns a reusable `Schedule` so tests can step or drain the event queue.
pub struct ScheduleRunner {
    schedule: Schedule,
}

impl Default for ScheduleRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleRunner {
    pub fn new() -> Self {
        Self {
            schedule: simulation_schedule(),
        }
    }

    /// Run a single event (returns `true` if an event was processed).
    pub fn run_one(&mut self, world: &mut World) -> bool {
        run_next_event(world, &mut self.schedule)
    }

    pub fn run_until_empty(&mut self, world: &mut World, max_steps: usize) -> usize {
        run_until_empty(world, &mut self.schedule, max_steps)
    }

    /// Schedule `SimulationStarted` and drain the queue up to the horizon.
    pub fn run_full(&mut self, world: &mut World) -> usize {
        initialize_simulation(world);
        self.run_until_empty(world, usize::MAX)
    }
}
