#![allow(dead_code)]

use bevy_ecs::prelude::World;
use toll_core::pricing::TollPricingConfig;
use toll_core::scenario::{SpeedLimitSection, VehicleSpec};
use toll_core::test_helpers::{create_test_world, quiet_params, square_zone, TEST_ORIGIN};
use toll_core::vendors::VendorPolicyKind;
use toll_core::zone::TollZone;

/// Reproducible test worlds on the planar distance oracle (100 km per degree).
#[derive(Debug, Clone)]
pub struct TestWorldBuilder {
    seed: u64,
    vehicles: Vec<VehicleSpec>,
    zones: Vec<TollZone>,
    sections: Vec<SpeedLimitSection>,
    pricing: TollPricingConfig,
    horizon: u64,
    congestion: f64,
    vendor_policy: VendorPolicyKind,
}

impl Default for TestWorldBuilder {
    fn default() -> Self {
        Self {
            seed: 42,
            vehicles: Vec::new(),
            zones: Vec::new(),
            sections: Vec::new(),
            pricing: TollPricingConfig::default(),
            horizon: 100,
            congestion: 0.0,
            vendor_policy: VendorPolicyKind::RoundRobin,
        }
    }
}

impl TestWorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_vehicle(mut self, vehicle: VehicleSpec) -> Self {
        self.vehicles.push(vehicle);
        self
    }

    pub fn with_zone(mut self, zone: TollZone) -> Self {
        self.zones.push(zone);
        self
    }

    /// One zone wide enough to contain every test route.
    pub fn with_covering_zone(self) -> Self {
        self.with_zone(square_zone(TEST_ORIGIN, 1.0))
    }

    pub fn with_section(mut self, name: &str, limit_kmh: f64) -> Self {
        self.sections.push(SpeedLimitSection::new(name, limit_kmh));
        self
    }

    pub fn with_pricing(mut self, pricing: TollPricingConfig) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_horizon(mut self, horizon: u64) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_congestion(mut self, probability: f64) -> Self {
        self.congestion = probability;
        self
    }

    pub fn with_vendor_policy(mut self, policy: VendorPolicyKind) -> Self {
        self.vendor_policy = policy;
        self
    }

    pub fn build(self) -> World {
        let params = quiet_params(self.vehicles)
            .with_seed(self.seed)
            .with_toll_zones(self.zones)
            .with_speed_limit_sections(self.sections)
            .with_pricing(self.pricing)
            .with_horizon(self.horizon)
            .with_congestion_delay_probability(self.congestion)
            .with_vendor_policy(self.vendor_policy);
        create_test_world(params)
    }
}
