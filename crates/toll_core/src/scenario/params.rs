use std::collections::HashSet;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::congestion::DEFAULT_CONGESTION_DELAY_PROBABILITY;
use crate::error::ConfigError;
use crate::pricing::TollPricingConfig;
use crate::route::DEFAULT_ROUTE_SEGMENTS;
use crate::spatial::Coordinate;
use crate::vendors::VendorPolicyKind;
use crate::zone::TollZone;

/// Default origin: central Chennai.
pub const DEFAULT_ORIGIN: Coordinate = Coordinate::new(13.0827, 80.2707);

/// Default time horizon in ticks.
pub const DEFAULT_HORIZON_TICKS: u64 = 100;

/// Default consecutive ticks at the destination before a vehicle is aborted.
pub const DEFAULT_STATIONARY_LIMIT: u32 = 5;

pub const DEFAULT_INITIAL_BALANCE: f64 = 1000.0;

const DEFAULT_DESTINATIONS: [(f64, f64); 7] = [
    (13.1420, 80.2800),
    (13.1020, 80.2600),
    (13.1300, 80.2700),
    (13.1200, 80.2750),
    (13.1350, 80.2650),
    (13.1400, 80.2850),
    (13.1250, 80.2950),
];

/// Processing stops before any event at or after this tick.
#[derive(Debug, Clone, Copy, Resource)]
pub struct SimulationHorizon(pub u64);

/// Steps ending on the destination before a vehicle is aborted.
#[derive(Debug, Clone, Copy, Resource)]
pub struct StationaryLimit(pub u32);

#[derive(Debug, Clone, Default, Resource)]
pub struct TollZones(pub Vec<TollZone>);

#[derive(Debug, Clone, Default, Resource)]
pub struct SpeedLimitSections(pub Vec<SpeedLimitSection>);

/// A named section with a speed limit.
///
/// Checked by comparing the vehicle's distance from its route start (km)
/// directly against `limit_kmh`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedLimitSection {
    pub name: String,
    pub limit_kmh: f64,
}

impl SpeedLimitSection {
    pub fn new(name: impl Into<String>, limit_kmh: f64) -> Self {
        Self {
            name: name.into(),
            limit_kmh,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub id: String,
    pub start: Coordinate,
    pub end: Coordinate,
    /// Overrides the scenario vendor list for this vehicle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendors: Option<Vec<String>>,
}

impl VehicleSpec {
    pub fn new(id: impl Into<String>, start: Coordinate, end: Coordinate) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            vendors: None,
        }
    }

    pub fn with_vendors(mut self, vendors: Vec<String>) -> Self {
        self.vendors = Some(vendors);
        self
    }
}

/// Parameters for building a simulation scenario.
///
/// `Default` is the reference scenario: seven vehicles leaving central
/// Chennai, one toll zone, three vendors. The zone's ring zigzags across
/// itself, so under the even-odd rule parts of its bounding box are not
/// tolled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioParams {
    pub vehicles: Vec<VehicleSpec>,
    pub toll_zones: Vec<TollZone>,
    pub speed_limit_sections: Vec<SpeedLimitSection>,
    pub vendors: Vec<String>,
    pub vendor_policy: VendorPolicyKind,
    pub pricing: TollPricingConfig,
    pub initial_balance: f64,
    pub horizon_ticks: u64,
    /// Probability (0.0–1.0) that a step consumes one extra tick.
    pub congestion_delay_probability: f64,
    pub stationary_limit: u32,
    /// Equal segments each route is split into (points = segments + 1).
    pub route_segments: usize,
    /// Seed for every random source. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        let vehicles = DEFAULT_DESTINATIONS
            .iter()
            .enumerate()
            .map(|(i, &end)| VehicleSpec::new(format!("Vehicle_{i}"), DEFAULT_ORIGIN, end.into()))
            .collect();
        let toll_zone = TollZone::new(
            [
                (13.05, 80.25),
                (13.05, 80.35),
                (13.10, 80.25),
                (13.10, 80.35),
                (13.20, 80.25),
                (13.20, 80.35),
                (13.15, 80.35),
                (13.15, 80.25),
            ]
            .into_iter()
            .map(Coordinate::from)
            .collect(),
        );
        Self {
            vehicles,
            toll_zones: vec![toll_zone],
            speed_limit_sections: vec![
                SpeedLimitSection::new("section_1", 60.0),
                SpeedLimitSection::new("section_2", 80.0),
                SpeedLimitSection::new("section_3", 100.0),
            ],
            vendors: vec![
                "Vendor_A".to_string(),
                "Vendor_B".to_string(),
                "Vendor_C".to_string(),
            ],
            vendor_policy: VendorPolicyKind::default(),
            pricing: TollPricingConfig::default(),
            initial_balance: DEFAULT_INITIAL_BALANCE,
            horizon_ticks: DEFAULT_HORIZON_TICKS,
            congestion_delay_probability: DEFAULT_CONGESTION_DELAY_PROBABILITY,
            stationary_limit: DEFAULT_STATIONARY_LIMIT,
            route_segments: DEFAULT_ROUTE_SEGMENTS,
            seed: None,
        }
    }
}

impl ScenarioParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_horizon(mut self, ticks: u64) -> Self {
        self.horizon_ticks = ticks;
        self
    }

    pub fn with_vehicles(mut self, vehicles: Vec<VehicleSpec>) -> Self {
        self.vehicles = vehicles;
        self
    }

    pub fn with_toll_zones(mut self, zones: Vec<TollZone>) -> Self {
        self.toll_zones = zones;
        self
    }

    pub fn with_speed_limit_sections(mut self, sections: Vec<SpeedLimitSection>) -> Self {
        self.speed_limit_sections = sections;
        self
    }

    pub fn with_vendors(mut self, vendors: Vec<String>) -> Self {
        self.vendors = vendors;
        self
    }

    pub fn with_vendor_policy(mut self, policy: VendorPolicyKind) -> Self {
        self.vendor_policy = policy;
        self
    }

    pub fn with_pricing(mut self, pricing: TollPricingConfig) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_initial_balance(mut self, balance: f64) -> Self {
        self.initial_balance = balance;
        self
    }

    pub fn with_congestion_delay_probability(mut self, probability: f64) -> Self {
        self.congestion_delay_probability = probability;
        self
    }

    pub fn with_stationary_limit(mut self, ticks: u32) -> Self {
        self.stationary_limit = ticks;
        self
    }

    pub fn with_route_segments(mut self, segments: usize) -> Self {
        self.route_segments = segments;
        self
    }

    /// Effective vendor list for one vehicle.
    pub fn vendors_for<'a>(&'a self, vehicle: &'a VehicleSpec) -> &'a [String] {
        vehicle.vendors.as_deref().unwrap_or(&self.vendors)
    }

    /// Checks every parameter; the first problem found is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon_ticks == 0 {
            return Err(ConfigError::NonPositiveHorizon);
        }
        if self.vendors.is_empty() {
            return Err(ConfigError::EmptyVendorList);
        }
        if !(0.0..=1.0).contains(&self.congestion_delay_probability) {
            return Err(ConfigError::InvalidProbability {
                name: "congestion_delay_probability",
                value: self.congestion_delay_probability,
            });
        }
        if !self.initial_balance.is_finite() {
            return Err(ConfigError::InvalidBalance);
        }
        if self.stationary_limit == 0 {
            return Err(ConfigError::InvalidStationaryLimit);
        }
        self.pricing.validate()?;

        for (zone, toll_zone) in self.toll_zones.iter().enumerate() {
            toll_zone
                .validate()
                .map_err(|reason| ConfigError::MalformedTollZone { zone, reason })?;
        }

        let mut seen = HashSet::new();
        for vehicle in &self.vehicles {
            if !seen.insert(vehicle.id.as_str()) {
                return Err(ConfigError::DuplicateVehicleId {
                    id: vehicle.id.clone(),
                });
            }
            if self.route_segments == 0 {
                return Err(ConfigError::EmptyRoute {
                    vehicle: vehicle.id.clone(),
                });
            }
            if !vehicle.start.is_finite() || !vehicle.end.is_finite() {
                return Err(ConfigError::InvalidCoordinate {
                    vehicle: vehicle.id.clone(),
                });
            }
            if self.vendors_for(vehicle).is_empty() {
                return Err(ConfigError::EmptyVendorList);
            }
        }
        Ok(())
    }
}
