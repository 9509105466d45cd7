//! Polygonal toll zones.

use serde::{Deserialize, Serialize};

use crate::spatial::Coordinate;

/// A closed polygon; the last vertex connects back to the first.
///
/// Containment treats `(lat, lng)` as planar `(x, y)` and uses the even-odd
/// rule, so self-intersecting rings are accepted but carve out holes where
/// edges cross.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TollZone {
    vertices: Vec<Coordinate>,
}

impl TollZone {
    pub fn new(vertices: Vec<Coordinate>) -> Self {
        Self { vertices }
    }

    /// Axis-aligned rectangle spanning the two corners.
    pub fn rectangle(south_west: Coordinate, north_east: Coordinate) -> Self {
        Self::new(vec![
            south_west,
            Coordinate::new(north_east.lat, south_west.lng),
            north_east,
            Coordinate::new(south_west.lat, north_east.lng),
        ])
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    /// Checks the polygon can bound a region.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.vertices.len() < 3 {
            return Err("a polygon needs at least three vertices");
        }
        if self.vertices.iter().any(|v| !v.is_finite()) {
            return Err("vertex coordinates must be finite");
        }
        let mut distinct: Vec<Coordinate> = Vec::with_capacity(3);
        for vertex in &self.vertices {
            if !distinct.contains(vertex) {
                distinct.push(*vertex);
                if distinct.len() == 3 {
                    return Ok(());
                }
            }
        }
        Err("a polygon needs at least three distinct vertices")
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        let vertices = &self.vertices;
        if vertices.len() < 3 {
            return false;
        }
        let (x, y) = (point.lat, point.lng);
        let mut inside = false;
        let mut j = vertices.len() - 1;
        for i in 0..vertices.len() {
            let (xi, yi) = (vertices[i].lat, vertices[i].lng);
            let (xj, yj) = (vertices[j].lat, vertices[j].lng);
            if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> TollZone {
        TollZone::rectangle(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0))
    }

    #[test]
    fn contains_interior_points_only() {
        let zone = unit_square();
        assert!(zone.contains(Coordinate::new(0.5, 0.5)));
        assert!(zone.contains(Coordinate::new(0.01, 0.99)));
        assert!(!zone.contains(Coordinate::new(1.5, 0.5)));
        assert!(!zone.contains(Coordinate::new(0.5, -0.1)));
    }

    #[test]
    fn concave_polygon_excludes_notch() {
        // U shape opening north.
        let zone = TollZone::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 3.0),
            Coordinate::new(3.0, 3.0),
            Coordinate::new(3.0, 2.0),
            Coordinate::new(1.0, 2.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(3.0, 1.0),
            Coordinate::new(3.0, 0.0),
        ]);
        assert!(zone.validate().is_ok());
        assert!(zone.contains(Coordinate::new(0.5, 1.5)));
        assert!(!zone.contains(Coordinate::new(2.0, 1.5)));
        assert!(zone.contains(Coordinate::new(2.0, 0.5)));
    }

    #[test]
    fn validate_rejects_degenerate_polygons() {
        let two = TollZone::new(vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)]);
        assert!(two.validate().is_err());

        let repeated = TollZone::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 1.0),
        ]);
        assert!(repeated.validate().is_err());

        let nan = TollZone::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(f64::NAN, 1.0),
            Coordinate::new(1.0, 0.0),
        ]);
        assert!(nan.validate().is_err());

        assert!(unit_square().validate().is_ok());
    }
}
