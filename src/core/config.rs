//! Configuration for the map view-state controller
//!
//! The controller reads everything it needs from one [`ControllerConfig`]:
//! the base view, the marker palette and popup labels, the fixed route and
//! its styling, the directions service endpoint and the geolocation request
//! options. Every
//! nested config has defaults matching the viewer's historical behaviour, so
//! a JSON file only needs the fields it wants to change.

use crate::core::constants::*;
use crate::core::geo::{LatLng, LngLat};
use crate::data::markers::LocationMarker;
use crate::geolocation::PositionOptions;
use crate::ui::popup::PopupLabels;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub view: ViewConfig,
    pub markers: MarkerPalette,
    pub route: RouteConfig,
    pub directions: DirectionsConfig,
    pub geolocation: PositionOptions,
    pub popup: PopupLabels,
}

impl ControllerConfig {
    /// Parses a JSON document; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Applies `MAPBOX_ACCESS_TOKEN` (or `VITE_API_KEY`) and
    /// `MAPVIEW_DIRECTIONS_URL` from the environment.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(token) = std::env::var("MAPBOX_ACCESS_TOKEN")
            .ok()
            .or_else(|| std::env::var("VITE_API_KEY").ok())
            .filter(|token| !token.is_empty())
        {
            self.directions.access_token = Some(token);
        }
        if let Ok(url) = std::env::var("MAPVIEW_DIRECTIONS_URL") {
            if !url.is_empty() {
                self.directions.base_url = url;
            }
        }
        self
    }

    /// Short timeouts, no access token.
    pub fn for_testing() -> Self {
        Self {
            directions: DirectionsConfig {
                access_token: None,
                timeout_ms: 500,
                ..Default::default()
            },
            geolocation: PositionOptions {
                timeout_ms: 200,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, pair) in [
            ("view.default_center", self.view.default_center),
            ("route.origin", self.route.origin),
            ("route.destination", self.route.destination),
        ] {
            if !LatLng::from_lng_lat(pair).is_valid() {
                return Err(MapError::Config(format!(
                    "{} out of range: {:?}",
                    name, pair
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.route.line_opacity) {
            return Err(MapError::Config(format!(
                "route.line_opacity must be within 0..=1, got {}",
                self.route.line_opacity
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub style_url: String,
    pub initial_zoom: f64,
    pub default_center: LngLat,
    pub default_zoom: f64,
    pub search_result_zoom: f64,
    pub location_zoom: f64,
    pub navigation_control: bool,
}

impl ViewConfig {
    pub fn default_center(&self) -> LatLng {
        LatLng::from_lng_lat(self.default_center)
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            style_url: DEFAULT_STYLE_URL.to_string(),
            initial_zoom: INITIAL_ZOOM,
            default_center: DEFAULT_CENTER,
            default_zoom: DEFAULT_ZOOM,
            search_result_zoom: SEARCH_RESULT_ZOOM,
            location_zoom: LOCATION_ZOOM,
            navigation_control: true,
        }
    }
}

/// Which markers get the highlight color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum HighlightRule {
    /// Case-sensitive substring of the title.
    TitleContains(String),
    Never,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerPalette {
    pub highlight_color: String,
    pub default_color: String,
    pub highlight: HighlightRule,
}

impl MarkerPalette {
    pub fn color_for(&self, marker: &LocationMarker) -> &str {
        let highlighted = match &self.highlight {
            HighlightRule::TitleContains(fragment) => marker.title.contains(fragment.as_str()),
            HighlightRule::Never => false,
        };
        if highlighted {
            &self.highlight_color
        } else {
            &self.default_color
        }
    }
}

impl Default for MarkerPalette {
    fn default() -> Self {
        Self {
            highlight_color: HIGHLIGHT_MARKER_COLOR.to_string(),
            default_color: DEFAULT_MARKER_COLOR.to_string(),
            highlight: HighlightRule::TitleContains(HIGHLIGHT_TITLE_FRAGMENT.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub origin: LngLat,
    pub destination: LngLat,
    pub line_color: String,
    pub line_width: f64,
    pub line_opacity: f64,
    pub origin_point_radius: f64,
    pub origin_point_color: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            origin: ROUTE_ORIGIN,
            destination: ROUTE_DESTINATION,
            line_color: ROUTE_LINE_COLOR.to_string(),
            line_width: ROUTE_LINE_WIDTH,
            line_opacity: ROUTE_LINE_OPACITY,
            origin_point_radius: ORIGIN_POINT_RADIUS,
            origin_point_color: ORIGIN_POINT_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionsConfig {
    pub base_url: String,
    pub profile: String,
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl DirectionsConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: DIRECTIONS_BASE_URL.to_string(),
            profile: DIRECTIONS_PROFILE.to_string(),
            access_token: None,
            timeout_ms: DIRECTIONS_TIMEOUT_MS,
            user_agent: concat!("mapview/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
