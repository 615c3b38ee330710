//! Collaborator interfaces consumed by the controller
//!
//! The controller never talks to a rendering library, an HTTP stack or a
//! positioning API directly. It goes through these traits, so a web
//! binding, a native engine or the in-crate [`HeadlessEngine`] can sit
//! behind the same controller.
//!
//! [`HeadlessEngine`]: crate::core::map::HeadlessEngine

use crate::{
    core::{
        geo::LatLng,
        lifecycle::Surface,
        map::MapOptions,
        viewport::{FlyTo, Viewport},
    },
    data::geojson::GeoJson,
    geolocation::{GeolocationError, Position, PositionOptions},
    layers::{base::LayerSpec, marker::Marker},
    routing::{directions::DirectionsResponse, RouteError},
    ui::controls::Control,
    Result,
};
use async_trait::async_trait;

/// Identifier of a marker placed on an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// Events an instance reports back to its owner
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The base style finished loading; sources and layers may be added.
    StyleLoaded,
    /// Camera movement finished
    MoveEnd { center: LatLng, zoom: f64 },
    SourceAdded { source_id: String },
    SourceDataChanged { source_id: String },
    SourceRemoved { source_id: String },
    LayerAdded { layer_id: String },
    MarkerAdded { marker_id: MarkerId },
    MarkerRemoved { marker_id: MarkerId },
}

/// Builds map instances over display surfaces
pub trait MapEngine {
    type Instance: MapInstance;

    /// Construct an instance with `{ container, style, center, zoom }`.
    /// The previous instance over the same surface is the caller's to drop.
    fn create(&mut self, surface: &Surface, options: &MapOptions) -> Result<Self::Instance>;
}

/// A live engine instance bound to one surface.
///
/// Dropping the value releases its engine-side resources.
pub trait MapInstance {
    fn camera(&self) -> Viewport;

    fn fly_to(&mut self, fly_to: FlyTo);

    fn add_control(&mut self, control: Control);

    fn add_marker(&mut self, marker: Marker) -> MarkerId;

    fn remove_marker(&mut self, marker_id: MarkerId) -> bool;

    fn has_source(&self, source_id: &str) -> bool;

    /// Registers a GeoJSON source. Duplicate ids are an error.
    fn add_source(&mut self, source_id: &str, data: GeoJson) -> Result<()>;

    /// Replaces the data of an existing source in place.
    fn set_source_data(&mut self, source_id: &str, data: GeoJson) -> Result<()>;

    /// Drops a source no layer uses. Returns false if nothing was removed.
    fn remove_source(&mut self, source_id: &str) -> bool;

    fn has_layer(&self, layer_id: &str) -> bool;

    /// Registers a layer. Duplicate ids are an error.
    fn add_layer(&mut self, layer: LayerSpec) -> Result<()>;

    /// Whether the base style has finished loading
    fn is_style_loaded(&self) -> bool;

    /// Takes every event queued since the last call
    fn drain_events(&mut self) -> Vec<MapEvent>;
}

/// Remote directions service
#[async_trait]
pub trait DirectionsService: Send + Sync {
    /// Route between two `[lng, lat]` points with GeoJSON geometry
    async fn route(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> std::result::Result<DirectionsResponse, RouteError>;
}

/// One-shot device positioning
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> std::result::Result<Position, GeolocationError>;
}
