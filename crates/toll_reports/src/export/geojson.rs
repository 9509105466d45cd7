use serde_json::{json, Value};
use toll_core::report::VisualizationSnapshot;
use toll_core::spatial::Coordinate;

use super::csv::outcome_label;

fn lng_lat(c: Coordinate) -> Value {
    json!([c.lng, c.lat])
}

/// GeoJSON rings must repeat their first position at the end.
fn closed_ring(vertices: &[Coordinate]) -> Vec<Value> {
    let mut ring: Vec<Value> = vertices.iter().copied().map(lng_lat).collect();
    if let (Some(first), Some(last)) = (vertices.first(), vertices.last()) {
        if first != last {
            ring.push(lng_lat(*first));
        }
    }
    ring
}

/// Vehicles become `Point` features and toll zones `Polygon` features.
/// Positions are `[longitude, latitude]`.
pub fn map_feature_collection(snapshot: &VisualizationSnapshot) -> Value {
    let vehicles = snapshot.vehicles.iter().map(|marker| {
        json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": lng_lat(marker.position) },
            "properties": {
                "kind": "vehicle",
                "vehicle_id": marker.id,
                "outcome": outcome_label(marker.state),
            },
        })
    });
    let zones = snapshot.toll_zones.iter().enumerate().map(|(index, zone)| {
        json!({
            "type": "Feature",
            "geometry": { "type": "Polygon", "coordinates": [closed_ring(zone)] },
            "properties": { "kind": "toll_zone", "zone": index },
        })
    });

    json!({
        "type": "FeatureCollection",
        "features": zones.chain(vehicles).collect::<Vec<_>>(),
    })
}
