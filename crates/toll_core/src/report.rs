//! Read-only views over a finished (or cut-off) run.

use bevy_ecs::prelude::World;
use serde::Serialize;

use crate::ecs::{Vehicle, VehicleState};
use crate::ledger::Account;
use crate::scenario::TollZones;
use crate::spatial::{haversine_km, Coordinate, DistanceOracleResource};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleReport {
    pub id: String,
    /// Distance from the route start to the last position reached. Equals
    /// the start-to-destination distance once the vehicle has completed, but
    /// is shorter for vehicles cut off by the horizon or aborted early.
    pub total_distance_km: f64,
    /// Sum of this vehicle's payments.
    pub total_toll_paid: f64,
    /// Vendor of every payment, in payment order; repeats are kept.
    pub vendors_used: Vec<String>,
    /// `Running` when the horizon cut the vehicle off.
    pub outcome: VehicleState,
    pub finished_at: Option<u64>,
    pub points_visited: usize,
}

/// One report per vehicle, in fleet order.
pub fn vehicle_reports(world: &mut World) -> Vec<VehicleReport> {
    let account = world.get_resource::<Account>().cloned();
    let mut vehicles: Vec<Vehicle> = world.query::<&Vehicle>().iter(world).cloned().collect();
    vehicles.sort_by_key(|v| v.fleet_index);

    let oracle = world.get_resource::<DistanceOracleResource>();
    vehicles
        .into_iter()
        .map(|vehicle| {
            let start = vehicle.route.start();
            let total_distance_km = match oracle {
                Some(oracle) => oracle.0.distance_km(start, vehicle.position),
                None => haversine_km(start, vehicle.position),
            };
            let payments = account
                .as_ref()
                .map(|a| a.payments_for(&vehicle.id))
                .unwrap_or_default();
            let total_toll_paid = payments.iter().map(|p| p.amount).sum();
            let vendors_used = payments.into_iter().map(|p| p.vendor).collect();
            VehicleReport {
                points_visited: vehicle.points_visited(),
                id: vehicle.id,
                total_distance_km,
                total_toll_paid,
                vendors_used,
                outcome: vehicle.state,
                finished_at: vehicle.finished_at,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleMarker {
    pub id: String,
    pub position: Coordinate,
    pub state: VehicleState,
}

/// Final vehicle positions and toll-zone outlines, for map rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VisualizationSnapshot {
    pub vehicles: Vec<VehicleMarker>,
    pub toll_zones: Vec<Vec<Coordinate>>,
}

pub fn visualization_snapshot(world: &mut World) -> VisualizationSnapshot {
    let mut vehicles: Vec<(usize, VehicleMarker)> = world
        .query::<&Vehicle>()
        .iter(world)
        .map(|v| {
            (
                v.fleet_index,
                VehicleMarker {
                    id: v.id.clone(),
                    position: v.position,
                    state: v.state,
                },
            )
        })
        .collect();
    vehicles.sort_by_key(|(fleet_index, _)| *fleet_index);

    let toll_zones = world
        .get_resource::<TollZones>()
        .map(|zones| zones.0.iter().map(|z| z.vertices().to_vec()).collect())
        .unwrap_or_default();

    VisualizationSnapshot {
        vehicles: vehicles.into_iter().map(|(_, marker)| marker).collect(),
        toll_zones,
    }
}
