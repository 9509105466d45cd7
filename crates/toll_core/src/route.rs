use serde::Serialize;

use crate::spatial::Coordinate;

/// Number of equal segments a vehicle route is split into by default.
pub const DEFAULT_ROUTE_SEGMENTS: usize = 10;

/// Ordered route points, linearly interpolated between two endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    points: Vec<Coordinate>,
}

impl Route {
    /// Splits `start..end` into `segments` equal steps, yielding `segments + 1`
    /// points. The first point is exactly `start` and the last exactly `end`.
    ///
    /// Returns `None` when `segments` is zero.
    pub fn interpolate(start: Coordinate, end: Coordinate, segments: usize) -> Option<Self> {
        if segments == 0 {
            return None;
        }
        let steps = segments as f64;
        let points = (0..=segments)
            .map(|i| {
                if i == segments {
                    end
                } else {
                    let t = i as f64;
                    Coordinate::new(
                        start.lat + t * (end.lat - start.lat) / steps,
                        start.lng + t * (end.lng - start.lng) / steps,
                    )
                }
            })
            .collect();
        Some(Self { points })
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn start(&self) -> Coordinate {
        self.points[0]
    }

    pub fn end(&self) -> Coordinate {
        self.points[self.points.len() - 1]
    }

    pub fn get(&self, index: usize) -> Option<Coordinate> {
        self.points.get(index).copied()
    }
}
