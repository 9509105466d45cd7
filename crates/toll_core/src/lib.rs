//! Discrete-event toll simulation core.
//!
//! Vehicles are ECS entities advanced one route point per wake-up by the
//! [`runner`]. Inside a toll zone each step prices a toll with
//! [`pricing::TollPricingConfig`] and deducts it from the shared
//! [`ledger::Account`].

pub mod clock;
pub mod congestion;
pub mod ecs;
pub mod error;
pub mod ledger;
pub mod pricing;
pub mod process;
pub mod report;
pub mod route;
pub mod runner;
pub mod scenario;
pub mod spatial;
pub mod systems;
pub mod telemetry;
pub mod telemetry_export;
pub mod vendors;
pub mod zone;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
