use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array, UInt8Array};
use arrow::datatypes::Schema;

use crate::telemetry::{NoticeKind, SimTelemetry};

use super::utils::{
    notice_kind_code, nullable_f64_field, nullable_u64_field, nullable_utf8_field, u64_field,
    u8_field, utf8_field, write_record_batch,
};

/// Flattens every notice into one wide table; columns that do not apply to
/// a notice kind are null.
///
/// `kind`: 0 = toll charged, 1 = speed limit exceeded, 2 = stationary
/// contingency.
pub fn write_notices_parquet<P: AsRef<Path>>(
    path: P,
    telemetry: &SimTelemetry,
) -> Result<(), Box<dyn Error>> {
    let len = telemetry.notices.len();
    let mut tick = Vec::with_capacity(len);
    let mut vehicle = Vec::with_capacity(len);
    let mut kind = Vec::with_capacity(len);
    let mut zone = Vec::with_capacity(len);
    let mut distance_km = Vec::with_capacity(len);
    let mut amount = Vec::with_capacity(len);
    let mut vendor = Vec::with_capacity(len);
    let mut balance_after = Vec::with_capacity(len);
    let mut section = Vec::with_capacity(len);
    let mut limit_kmh = Vec::with_capacity(len);
    let mut stationary_ticks = Vec::with_capacity(len);

    for notice in &telemetry.notices {
        tick.push(notice.tick);
        vehicle.push(notice.vehicle.as_str());
        kind.push(notice_kind_code(&notice.kind));
        match &notice.kind {
            NoticeKind::TollCharged {
                zone: z,
                distance_km: d,
                amount: a,
                vendor: v,
                balance_after: b,
            } => {
                zone.push(Some(*z as u64));
                distance_km.push(Some(*d));
                amount.push(Some(*a));
                vendor.push(Some(v.as_str()));
                balance_after.push(Some(*b));
                section.push(None);
                limit_kmh.push(None);
                stationary_ticks.push(None);
            }
            NoticeKind::SpeedLimitExceeded {
                section: s,
                limit_kmh: l,
                distance_km: d,
            } => {
                zone.push(None);
                distance_km.push(Some(*d));
                amount.push(None);
                vendor.push(None);
                balance_after.push(None);
                section.push(Some(s.as_str()));
                limit_kmh.push(Some(*l));
                stationary_ticks.push(None);
            }
            NoticeKind::StationaryContingency { stationary_ticks: t } => {
                zone.push(None);
                distance_km.push(None);
                amount.push(None);
                vendor.push(None);
                balance_after.push(None);
                section.push(None);
                limit_kmh.push(None);
                stationary_ticks.push(Some(u64::from(*t)));
            }
        }
    }

    let schema = Schema::new(vec![
        u64_field("tick"),
        utf8_field("vehicle"),
        u8_field("kind"),
        nullable_u64_field("zone"),
        nullable_f64_field("distance_km"),
        nullable_f64_field("amount"),
        nullable_utf8_field("vendor"),
        nullable_f64_field("balance_after"),
        nullable_utf8_field("section"),
        nullable_f64_field("limit_kmh"),
        nullable_u64_field("stationary_ticks"),
    ]);

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(tick)),
        Arc::new(StringArray::from(vehicle)),
        Arc::new(UInt8Array::from(kind)),
        Arc::new(UInt64Array::from(zone)),
        Arc::new(Float64Array::from(distance_km)),
        Arc::new(Float64Array::from(amount)),
        Arc::new(StringArray::from(vendor)),
        Arc::new(Float64Array::from(balance_after)),
        Arc::new(StringArray::from(section)),
        Arc::new(Float64Array::from(limit_kmh)),
        Arc::new(UInt64Array::from(stationary_ticks)),
    ];

    write_record_batch(path, schema, arrays)
}
