//! Run the reference Chennai scenario and print each vehicle's tolls.
//!
//! Run with: cargo run -p toll_core --example scenario_run

use bevy_ecs::prelude::World;
use toll_core::ledger::Account;
use toll_core::report::vehicle_reports;
use toll_core::runner::run_simulation;
use toll_core::scenario::{build_scenario, ScenarioParams};
use toll_core::telemetry::SimTelemetry;

fn main() {
    const SEED: u64 = 123;

    let mut world = World::new();
    if let Err(err) = build_scenario(&mut world, ScenarioParams::default().with_seed(SEED)) {
        eprintln!("invalid scenario: {err}");
        std::process::exit(1);
    }
    let steps = run_simulation(&mut world);

    let telemetry = world.resource::<SimTelemetry>();
    println!("--- Reference scenario (seed {SEED}) ---");
    println!("Events processed: {steps}");
    println!("Vehicle steps: {}", telemetry.steps);
    println!("Speeding notices: {}", telemetry.speeding_notices().count());

    let account = world.resource::<Account>().clone();
    println!(
        "Payments: {}  collected: {:.2}  final balance: {:.2}",
        account.payment_count(),
        account.total_paid(),
        account.balance()
    );

    println!("\n{:<10} {:>10} {:>12}  {:<18} vendors", "vehicle", "km", "toll", "outcome");
    for report in vehicle_reports(&mut world) {
        println!(
            "{:<10} {:>10.2} {:>12.2}  {:<18} {}",
            report.id,
            report.total_distance_km,
            report.total_toll_paid,
            format!("{:?}", report.outcome),
            report.vendors_used.join(", ")
        );
    }
}
