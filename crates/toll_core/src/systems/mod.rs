pub mod simulation_started;
pub mod vehicle_step;
