use thiserror::Error;

/// Rejected scenario configuration. Raised by [`crate::scenario::build_scenario`]
/// before any tick runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("toll zone {zone} is malformed: {reason}")]
    MalformedTollZone { zone: usize, reason: &'static str },
    #[error("vehicle `{vehicle}` has an empty route")]
    EmptyRoute { vehicle: String },
    #[error("vehicle `{vehicle}` has a non-finite route endpoint")]
    InvalidCoordinate { vehicle: String },
    #[error("duplicate vehicle id `{id}`")]
    DuplicateVehicleId { id: String },
    #[error("simulation horizon must be at least one tick")]
    NonPositiveHorizon,
    #[error("payment vendor list is empty")]
    EmptyVendorList,
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("peak window [{start}, {end}) is not a valid hour range")]
    InvalidPeakWindow { start: u64, end: u64 },
    #[error("pricing option {field} must be finite")]
    InvalidPricing { field: &'static str },
    #[error("initial balance must be finite")]
    InvalidBalance,
    #[error("stationary limit must be at least one tick")]
    InvalidStationaryLimit,
}
