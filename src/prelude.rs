//! Prelude module for common mapview types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapview::prelude::*;`

pub use crate::controller::{LocationOutcome, MapController};

pub use crate::core::{
    config::{
        ControllerConfig, DirectionsConfig, HighlightRule, MarkerPalette, RouteConfig, ViewConfig,
    },
    geo::{LatLng, LngLat, Point},
    lifecycle::{Generation, ReadyState, Surface},
    map::{HeadlessEngine, HeadlessMap, MapOptions},
    viewport::{FlyTo, Viewport},
};

pub use crate::layers::{base::LayerSpec, manager::LayerManager, marker::Marker};

pub use crate::data::{
    geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry},
    markers::{LocationMarker, MarkerDataset},
};

pub use crate::geolocation::{
    FixedGeolocation, GeolocationError, LocateRequest, LocateTicket, Position, PositionOptions,
};

pub use crate::routing::{
    DirectionsResponse, MapboxDirections, RouteError, RouteRequest, RouteStatus, RouteSummary,
    RouteTicket, StaticDirections,
};

pub use crate::search::{filtered_markers, SearchFilter};

pub use crate::traits::{
    DirectionsService, GeolocationProvider, MapEngine, MapEvent, MapInstance, MarkerId,
};

pub use crate::ui::{popup::render_popup, Control, PopupLabels};

pub use crate::{Error as MapError, Result};

pub use std::{sync::Arc, time::Duration};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
