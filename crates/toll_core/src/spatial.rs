//! Coordinates and the distance oracle.
//!
//! The simulation only needs `distance(a, b) -> km`. [`Haversine`] is the
//! default great-circle implementation; [`CachedDistance`] memoises any oracle
//! behind an LRU keyed by the exact coordinate bits.

use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};

use bevy_ecs::prelude::Resource;
use lru::LruCache;
use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default number of cached coordinate pairs.
pub const DEFAULT_DISTANCE_CACHE_SIZE: usize = 10_000;

/// A (latitude, longitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    fn bits(&self) -> (u64, u64) {
        (self.lat.to_bits(), self.lng.to_bits())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Converts two coordinates into a distance in kilometres.
///
/// Implementations must return the same value for repeated calls on the same
/// inputs.
pub trait DistanceOracle: Send + Sync {
    fn distance_km(&self, a: Coordinate, b: Coordinate) -> f64;
}

/// Great-circle distance on a sphere of radius [`EARTH_RADIUS_KM`].
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lng.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lng.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let sin_dlat = (dlat * 0.5).sin();
    let sin_dlon = (dlon * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

impl DistanceOracle for Haversine {
    fn distance_km(&self, a: Coordinate, b: Coordinate) -> f64 {
        haversine_km(a, b)
    }
}

type PairKey = ((u64, u64), (u64, u64));

/// Memoising wrapper around another oracle.
pub struct CachedDistance<O> {
    inner: O,
    cache: Mutex<LruCache<PairKey, f64>>,
}

impl<O: DistanceOracle> CachedDistance<O> {
    pub fn new(inner: O, capacity: NonZeroUsize) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn cached_pairs(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl CachedDistance<Haversine> {
    pub fn haversine() -> Self {
        let capacity =
            NonZeroUsize::new(DEFAULT_DISTANCE_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN);
        Self::new(Haversine, capacity)
    }
}

impl<O: DistanceOracle> DistanceOracle for CachedDistance<O> {
    fn distance_km(&self, a: Coordinate, b: Coordinate) -> f64 {
        // Distances are symmetric, so store each unordered pair once.
        let (ka, kb) = (a.bits(), b.bits());
        let (key, first, second) = if ka <= kb {
            ((ka, kb), a, b)
        } else {
            ((kb, ka), b, a)
        };
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        *cache.get_or_insert(key, || self.inner.distance_km(first, second))
    }
}

/// The oracle consulted by vehicle steps.
#[derive(Resource)]
pub struct DistanceOracleResource(pub Box<dyn DistanceOracle>);

impl DistanceOracleResource {
    pub fn new(oracle: impl DistanceOracle + 'static) -> Self {
        Self(Box::new(oracle))
    }
}

impl Default for DistanceOracleResource {
    fn default() -> Self {
        Self(Box::new(CachedDistance::haversine()))
    }
}
