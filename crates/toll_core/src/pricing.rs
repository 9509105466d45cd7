//! Toll pricing: distance-based base fare, congestion surcharge, and a
//! time-of-day adjustment.
//!
//! Formula, for `d` km travelled since the route start at tick `t`:
//!
//! 1. `toll = d * rate_per_km + fixed_fee`
//! 2. if `d > congestion_threshold_km`: `toll += d * dynamic_rate`
//! 3. `hour = t % 24`; `toll *= 1 + peak_adjust` when `hour` falls in a peak
//!    window, otherwise `toll *= 1 + off_peak_adjust`
//!
//! No rounding is applied.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::clock::HOURS_PER_DAY;
use crate::error::ConfigError;

/// Half-open hour range `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakWindow {
    pub start_hour: u64,
    pub end_hour: u64,
}

impl PeakWindow {
    pub const fn new(start_hour: u64, end_hour: u64) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn contains(&self, hour: u64) -> bool {
        self.start_hour <= hour && hour < self.end_hour
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeSlot {
    Peak,
    OffPeak,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct TollPricingConfig {
    /// Charge per kilometre from the route start.
    pub rate_per_km: f64,
    /// Flat fee added to every toll.
    pub fixed_fee: f64,
    /// Extra charge per kilometre once the congestion threshold is passed.
    pub dynamic_rate: f64,
    /// Distance beyond which the congestion surcharge applies (strictly greater).
    pub congestion_threshold_km: f64,
    pub peak_windows: Vec<PeakWindow>,
    /// Fractional adjustment during peak hours (0.1 = +10%).
    pub peak_adjust: f64,
    /// Fractional adjustment outside peak hours; negative values are discounts.
    pub off_peak_adjust: f64,
}

impl Default for TollPricingConfig {
    fn default() -> Self {
        Self {
            rate_per_km: 4.0,
            fixed_fee: 15.0,
            dynamic_rate: 1.5,
            congestion_threshold_km: 1.0,
            peak_windows: vec![PeakWindow::new(7, 9), PeakWindow::new(17, 19)],
            peak_adjust: 0.1,
            off_peak_adjust: -0.05,
        }
    }
}

/// Every intermediate term of one toll computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TollBreakdown {
    pub distance_km: f64,
    pub hour: u64,
    /// `distance_km * rate_per_km + fixed_fee`.
    pub base: f64,
    /// Zero unless the distance exceeds the congestion threshold.
    pub congestion_surcharge: f64,
    pub slot: TimeSlot,
    /// The multiplier applied for `slot`, i.e. `1 + adjust`.
    pub multiplier: f64,
    pub total: f64,
}

impl TollBreakdown {
    pub fn congestion_applied(&self) -> bool {
        self.congestion_surcharge != 0.0
    }
}

impl TollPricingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("rate_per_km", self.rate_per_km),
            ("fixed_fee", self.fixed_fee),
            ("dynamic_rate", self.dynamic_rate),
            ("congestion_threshold_km", self.congestion_threshold_km),
            ("peak_adjust", self.peak_adjust),
            ("off_peak_adjust", self.off_peak_adjust),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::InvalidPricing { field: *field });
        }
        for window in &self.peak_windows {
            if window.start_hour >= window.end_hour || window.end_hour > HOURS_PER_DAY {
                return Err(ConfigError::InvalidPeakWindow {
                    start: window.start_hour,
                    end: window.end_hour,
                });
            }
        }
        Ok(())
    }

    pub fn time_slot(&self, tick: u64) -> TimeSlot {
        let hour = tick % HOURS_PER_DAY;
        if self.peak_windows.iter().any(|w| w.contains(hour)) {
            TimeSlot::Peak
        } else {
            TimeSlot::OffPeak
        }
    }

    pub fn breakdown(&self, distance_km: f64, tick: u64) -> TollBreakdown {
        let base = distance_km * self.rate_per_km + self.fixed_fee;
        let congestion_surcharge = if distance_km > self.congestion_threshold_km {
            distance_km * self.dynamic_rate
        } else {
            0.0
        };
        let slot = self.time_slot(tick);
        let multiplier = match slot {
            TimeSlot::Peak => 1.0 + self.peak_adjust,
            TimeSlot::OffPeak => 1.0 + self.off_peak_adjust,
        };
        TollBreakdown {
            distance_km,
            hour: tick % HOURS_PER_DAY,
            base,
            congestion_surcharge,
            slot,
            multiplier,
            total: (base + congestion_surcharge) * multiplier,
        }
    }

    pub fn compute_toll(&self, distance_km: f64, tick: u64) -> f64 {
        self.breakdown(distance_km, tick).total
    }
}
