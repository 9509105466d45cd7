use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::route::Route;
use crate::spatial::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleState {
    Running,
    Completed,
    /// Sat on its final route point for too many consecutive ticks.
    StationaryAborted,
}

impl VehicleState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, VehicleState::Running)
    }
}

/// A vehicle process. Mutated only by its own step.
#[derive(Debug, Clone, Component)]
pub struct Vehicle {
    pub id: String,
    /// Position in the configured fleet; fixes report and start order.
    pub fleet_index: usize,
    pub route: Route,
    /// Vendors this vehicle may pay through.
    pub vendors: Vec<String>,
    pub position: Coordinate,
    /// Index of the route point the next step moves to.
    pub next_point: usize,
    /// Consecutive steps that ended on the route's final point.
    pub stationary_ticks: u32,
    pub state: VehicleState,
    /// Tick at which the vehicle became terminal.
    pub finished_at: Option<u64>,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, fleet_index: usize, route: Route, vendors: Vec<String>) -> Self {
        let position = route.start();
        Self {
            id: id.into(),
            fleet_index,
            route,
            vendors,
            position,
            next_point: 0,
            stationary_ticks: 0,
            state: VehicleState::Running,
            finished_at: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == VehicleState::Running
    }

    /// Route points visited so far.
    pub fn points_visited(&self) -> usize {
        self.next_point
    }
}
