//! # mapview
//!
//! A map view-state controller for marker-based map viewers.
//!
//! The crate owns the state a map screen needs between UI events and the
//! map engine: the lifecycle of the engine instance bound to a display
//! surface, the static marker set with its popups, a live marker search,
//! geolocation-triggered fly-to, and a driving route overlay fetched from a
//! directions service. The engine, the directions service and the
//! geolocation provider are collaborators reached through the traits in
//! [`traits`]; [`core::map::HeadlessEngine`] is a complete in-memory engine
//! used by tests and the demo app.

pub mod controller;
pub mod core;
pub mod data;
pub mod geolocation;
pub mod layers;
pub mod prelude;
pub mod routing;
pub mod search;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use controller::{LocationOutcome, MapController};
pub use crate::core::{
    config::ControllerConfig,
    geo::LatLng,
    lifecycle::{Generation, ReadyState, Surface},
    map::{HeadlessEngine, HeadlessMap},
    viewport::{FlyTo, Viewport},
};
pub use data::markers::{LocationMarker, MarkerDataset};
pub use geolocation::{GeolocationError, LocateRequest, LocateTicket, Position, PositionOptions};
pub use routing::{RouteError, RouteStatus, RouteSummary, RouteTicket};
pub use traits::{DirectionsService, GeolocationProvider, MapEngine, MapInstance};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Source error: {0}")]
    Source(String),

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Initialise `env_logger` once for binaries and examples.
///
/// Respects `RUST_LOG`; repeated calls are ignored.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(cfg!(test))
        .try_init();
}
