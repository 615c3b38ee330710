use serde::{Deserialize, Serialize};

/// A `[longitude, latitude]` pair, the order map engines and GeoJSON use.
pub type LngLat = [f64; 2];

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a coordinate from a `[lng, lat]` pair
    pub fn from_lng_lat(pair: LngLat) -> Self {
        Self::new(pair[1], pair[0])
    }

    /// Returns the `[lng, lat]` pair for engine and GeoJSON calls
    pub fn to_lng_lat(&self) -> LngLat {
        [self.lng, self.lat]
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<LngLat> for LatLng {
    fn from(pair: LngLat) -> Self {
        Self::from_lng_lat(pair)
    }
}

/// Represents a point in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
