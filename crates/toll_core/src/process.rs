//! The vehicle process: one call to [`Vehicle::step`] per wake-up.
//!
//! A running step, in order:
//!
//! 1. Route exhausted → `Completed`.
//! 2. Stationary counter at the limit → `StationaryAborted` plus a
//!    contingency notice.
//! 3. Move to the next route point.
//! 4. Charge a toll for every zone containing the new position. Nothing
//!    remembers previous zones, so a vehicle pays again on every step it
//!    spends inside a zone.
//! 5. Raise a speeding notice for every section whose limit value is below
//!    the distance from the route start.
//! 6. Sleep one tick, or two under congestion.
//! 7. Count the step as stationary if it ended on the final route point.

use tracing::{error, info, warn};

use crate::congestion::CongestionDelayModel;
use crate::ecs::{Vehicle, VehicleState};
use crate::ledger::Account;
use crate::pricing::TollPricingConfig;
use crate::scenario::SpeedLimitSection;
use crate::spatial::DistanceOracle;
use crate::telemetry::{Notice, NoticeKind};
use crate::vendors::VendorSelection;
use crate::zone::TollZone;

/// Everything a step reads or mutates outside the vehicle itself.
pub struct StepContext<'a> {
    pub now: u64,
    pub toll_zones: &'a [TollZone],
    pub speed_sections: &'a [SpeedLimitSection],
    pub pricing: &'a TollPricingConfig,
    pub oracle: &'a dyn DistanceOracle,
    pub account: &'a Account,
    pub vendors: &'a mut dyn VendorSelection,
    pub delay: &'a mut CongestionDelayModel,
    pub stationary_limit: u32,
    pub notices: &'a mut Vec<Notice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Still running; step again at `wake_at`.
    Sleep { wake_at: u64 },
    /// Reached a terminal state; no further steps.
    Done(VehicleState),
}

impl Vehicle {
    pub fn step(&mut self, ctx: &mut StepContext<'_>) -> StepOutcome {
        if self.state.is_terminal() {
            return StepOutcome::Done(self.state);
        }

        let Some(next) = self.route.get(self.next_point) else {
            return self.finish(VehicleState::Completed, ctx.now);
        };

        if self.stationary_ticks >= ctx.stationary_limit {
            warn!(
                vehicle = %self.id,
                tick = ctx.now,
                stationary_ticks = self.stationary_ticks,
                "emergency contingency: vehicle stationary at destination"
            );
            ctx.notices.push(Notice {
                tick: ctx.now,
                vehicle: self.id.clone(),
                kind: NoticeKind::StationaryContingency {
                    stationary_ticks: self.stationary_ticks,
                },
            });
            return self.finish(VehicleState::StationaryAborted, ctx.now);
        }

        self.position = next;
        self.next_point += 1;

        let distance_km = ctx.oracle.distance_km(self.route.start(), self.position);
        self.charge_tolls(distance_km, ctx);
        self.check_speed_limits(distance_km, ctx);

        let ticks = ctx.delay.sample_step_ticks();

        if self.position == self.route.end() {
            self.stationary_ticks += 1;
        } else {
            self.stationary_ticks = 0;
        }

        StepOutcome::Sleep {
            wake_at: ctx.now + ticks,
        }
    }

    fn finish(&mut self, state: VehicleState, now: u64) -> StepOutcome {
        self.state = state;
        self.finished_at = Some(now);
        StepOutcome::Done(state)
    }

    fn charge_tolls(&self, distance_km: f64, ctx: &mut StepContext<'_>) {
        for (zone, toll_zone) in ctx.toll_zones.iter().enumerate() {
            if !toll_zone.contains(self.position) {
                continue;
            }
            let Some(vendor) = ctx.vendors.select(&self.vendors) else {
                error!(vehicle = %self.id, zone, "no payment vendor available; toll skipped");
                continue;
            };
            let amount = ctx.pricing.compute_toll(distance_km, ctx.now);
            let balance_after = ctx.account.charge(&self.id, ctx.now, amount, vendor);
            info!(
                vehicle = %self.id,
                tick = ctx.now,
                zone,
                toll = format_args!("{amount:.2}"),
                vendor,
                balance = format_args!("{balance_after:.2}"),
                "crossed toll zone"
            );
            ctx.notices.push(Notice {
                tick: ctx.now,
                vehicle: self.id.clone(),
                kind: NoticeKind::TollCharged {
                    zone,
                    distance_km,
                    amount,
                    vendor: vendor.to_string(),
                    balance_after,
                },
            });
        }
    }

    fn check_speed_limits(&self, distance_km: f64, ctx: &mut StepContext<'_>) {
        for section in ctx.speed_sections {
            if distance_km > section.limit_kmh {
                warn!(
                    vehicle = %self.id,
                    tick = ctx.now,
                    section = %section.name,
                    limit_kmh = section.limit_kmh,
                    "exceeded speed limit"
                );
                ctx.notices.push(Notice {
                    tick: ctx.now,
                    vehicle: self.id.clone(),
                    kind: NoticeKind::SpeedLimitExceeded {
                        section: section.name.clone(),
                        limit_kmh: section.limit_kmh,
                        distance_km,
                    },
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;
    use crate::spatial::{Coordinate, Haversine};
    use crate::vendors::RoundRobinVendorSelection;

    struct Harness {
        zones: Vec<TollZone>,
        sections: Vec<SpeedLimitSection>,
        pricing: TollPricingConfig,
        account: Account,
        vendors: RoundRobinVendorSelection,
        delay: CongestionDelayModel,
        notices: Vec<Notice>,
    }

    impl Harness {
        fn new(zones: Vec<TollZone>) -> Self {
            Self {
                zones,
                sections: Vec::new(),
                pricing: TollPricingConfig::default(),
                account: Account::new(1000.0),
                vendors: RoundRobinVendorSelection::default(),
                delay: CongestionDelayModel::disabled(),
                notices: Vec::new(),
            }
        }

        fn step(&mut self, vehicle: &mut Vehicle, now: u64) -> StepOutcome {
            let mut ctx = StepContext {
                now,
                toll_zones: &self.zones,
                speed_sections: &self.sections,
                pricing: &self.pricing,
                oracle: &Haversine,
                account: &self.account,
                vendors: &mut self.vendors,
                delay: &mut self.delay,
                stationary_limit: 5,
                notices: &mut self.notices,
            };
            vehicle.step(&mut ctx)
        }

        /// Steps until done, returning the tick of the terminal step.
        fn run(&mut self, vehicle: &mut Vehicle) -> u64 {
            let mut now = 0;
            loop {
                match self.step(vehicle, now) {
                    StepOutcome::Sleep { wake_at } => now = wake_at,
                    StepOutcome::Done(_) => return now,
                }
            }
        }
    }

    fn vehicle(start: Coordinate, end: Coordinate) -> Vehicle {
        let route = Route::interpolate(start, end, 10).expect("route");
        Vehicle::new("Vehicle_0", 0, route, vec!["Vendor_A".to_string()])
    }

    fn big_zone() -> TollZone {
        TollZone::rectangle(Coordinate::new(12.0, 79.0), Coordinate::new(14.0, 81.0))
    }

    #[test]
    fn moving_vehicle_completes_after_last_point() {
        let mut h = Harness::new(Vec::new());
        let mut v = vehicle(Coordinate::new(13.0, 80.0), Coordinate::new(13.1, 80.1));

        let finished = h.run(&mut v);
        assert_eq!(v.state, VehicleState::Completed);
        assert_eq!(v.points_visited(), 11);
        assert_eq!(v.position, v.route.end());
        // Eleven one-tick steps, then the completing step.
        assert_eq!(finished, 11);
        assert_eq!(v.finished_at, Some(11));
        assert!(h.notices.is_empty());
    }

    #[test]
    fn charges_on_every_step_inside_zone() {
        let mut h = Harness::new(vec![big_zone()]);
        let mut v = vehicle(Coordinate::new(13.0, 80.0), Coordinate::new(13.1, 80.1));
        h.run(&mut v);

        assert_eq!(h.account.payment_count(), 11);
        assert_eq!(h.notices.len(), 11);
        let first = &h.account.payments()[0];
        // First point is the route start: zero distance, off-peak tick 0.
        assert!((first.amount - 15.0 * 0.95).abs() < 1e-9);
        assert_eq!(first.tick, Some(0));
        assert_eq!(first.vehicle.as_deref(), Some("Vehicle_0"));
    }

    #[test]
    fn overlapping_zones_charge_twice_per_step() {
        let mut h = Harness::new(vec![big_zone(), big_zone()]);
        let mut v = vehicle(Coordinate::new(13.0, 80.0), Coordinate::new(13.1, 80.1));
        h.step(&mut v, 0);
        assert_eq!(h.account.payment_count(), 2);
    }

    #[test]
    fn parked_vehicle_aborts_after_five_stationary_steps() {
        let mut h = Harness::new(vec![big_zone()]);
        let spot = Coordinate::new(13.0, 80.0);
        let mut v = vehicle(spot, spot);

        let finished = h.run(&mut v);
        assert_eq!(v.state, VehicleState::StationaryAborted);
        assert_eq!(finished, 5);
        assert_eq!(v.points_visited(), 5);
        // Five charging steps; the aborting step charges nothing.
        assert_eq!(h.account.payment_count(), 5);
        assert!(matches!(
            h.notices.last().map(|n| &n.kind),
            Some(NoticeKind::StationaryContingency { stationary_ticks: 5 })
        ));

        // Terminal vehicles ignore further steps.
        assert_eq!(h.step(&mut v, 9), StepOutcome::Done(VehicleState::StationaryAborted));
        assert_eq!(h.account.payment_count(), 5);
    }

    #[test]
    fn speeding_compares_distance_with_limit_value() {
        let mut h = Harness::new(Vec::new());
        h.sections = vec![
            SpeedLimitSection::new("short", 5.0),
            SpeedLimitSection::new("long", 500.0),
        ];
        // About 111 km north.
        let mut v = vehicle(Coordinate::new(13.0, 80.0), Coordinate::new(14.0, 80.0));
        h.step(&mut v, 0);
        assert!(h.notices.is_empty(), "route start is zero km away");

        h.step(&mut v, 1);
        let sections: Vec<_> = h
            .notices
            .iter()
            .filter_map(|n| match &n.kind {
                NoticeKind::SpeedLimitExceeded { section, .. } => Some(section.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(sections, vec!["short"]);
        assert_eq!(h.account.payment_count(), 0);
    }

    #[test]
    fn congestion_doubles_step_duration() {
        let mut h = Harness::new(Vec::new());
        h.delay = CongestionDelayModel::new(Some(1), 1.0);
        let mut v = vehicle(Coordinate::new(13.0, 80.0), Coordinate::new(13.1, 80.1));
        assert_eq!(h.step(&mut v, 4), StepOutcome::Sleep { wake_at: 6 });
    }
}
