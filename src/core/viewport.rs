use crate::core::geo::{LatLng, LngLat};
use serde::{Deserialize, Serialize};

/// The camera of a map instance: where it looks and how close
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self { center, zoom }
    }

    /// Center as a `[lng, lat]` pair
    pub fn center_lng_lat(&self) -> LngLat {
        self.center.to_lng_lat()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::default(), 0.0)
    }
}

/// Camera animation request, applied after the instance exists so the
/// engine can move without a full tile reload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlyTo {
    pub center: LatLng,
    pub zoom: f64,
    /// Animate even when the user prefers reduced motion.
    pub essential: bool,
}

impl FlyTo {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            essential: true,
        }
    }

    /// The camera state once the animation has finished
    pub fn target(&self) -> Viewport {
        Viewport::new(self.center, self.zoom)
    }
}
