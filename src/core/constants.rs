//! Core constants for the marker map screen.
//! Keeping them in a single place makes it easier to tweak viewer-wide magic numbers.

use crate::core::geo::LngLat;

/// Base map style every instance is created with.
pub const DEFAULT_STYLE_URL: &str = "mapbox://styles/mapbox/streets-v11";

/// San Luis Potosí, the default camera center.
pub const DEFAULT_CENTER: LngLat = [-100.429722, 22.603333];

/// Zoom the camera flies to once the map has been initialised.
pub const DEFAULT_ZOOM: f64 = 6.7;

/// Zoom used on first paint, before the fly-to.
pub const INITIAL_ZOOM: f64 = 1.0;

/// Zoom for a jump to a search result.
pub const SEARCH_RESULT_ZOOM: f64 = 15.0;

/// Zoom for a jump to the device position.
pub const LOCATION_ZOOM: f64 = 10.0;

/// Fixed route endpoints.
pub const ROUTE_ORIGIN: LngLat = [-100.429722, 22.603333];
pub const ROUTE_DESTINATION: LngLat = [-100.9733, 22.1505];

/// Marker colors: highlighted organisation and everyone else.
pub const HIGHLIGHT_MARKER_COLOR: &str = "#FF5733";
pub const DEFAULT_MARKER_COLOR: &str = "#3887be";

/// Title fragment that selects the highlight color.
pub const HIGHLIGHT_TITLE_FRAGMENT: &str = "Emsad";

/// Id shared by the route source and its line layer.
pub const ROUTE_OVERLAY_ID: &str = "route";

/// Id of the circle layer drawn at the route origin.
pub const ORIGIN_POINT_LAYER_ID: &str = "point";

/// Route line paint.
pub const ROUTE_LINE_COLOR: &str = "#3887be";
pub const ROUTE_LINE_WIDTH: f64 = 5.0;
pub const ROUTE_LINE_OPACITY: f64 = 0.75;

/// Origin point paint.
pub const ORIGIN_POINT_RADIUS: f64 = 10.0;
pub const ORIGIN_POINT_COLOR: &str = "#3887be";

/// Directions service defaults.
pub const DIRECTIONS_BASE_URL: &str = "https://api.mapbox.com";
pub const DIRECTIONS_PROFILE: &str = "driving";
pub const DIRECTIONS_TIMEOUT_MS: u64 = 10_000;

/// One-shot geolocation request defaults.
pub const GEOLOCATION_TIMEOUT_MS: u64 = 5_000;
pub const GEOLOCATION_MAXIMUM_AGE_MS: u64 = 0;
