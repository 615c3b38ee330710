//! Route fetching and the route line overlay.

pub mod directions;
pub mod overlay;

pub use directions::{DirectionsResponse, MapboxDirections, StaticDirections};
pub use overlay::{add_origin_point, upsert_route, OverlayChange};

use crate::core::geo::{LatLng, LngLat};
use crate::core::lifecycle::Generation;
use crate::traits::DirectionsService;
use crate::MapError;
use geo::HaversineLength;
use std::fmt;
use std::sync::Arc;

/// Why a route could not be shown
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("directions request failed: {0}")]
    Network(String),

    #[error("directions request timed out after {0} ms")]
    Timeout(u64),

    #[error("directions service answered {status}{}", .message.as_ref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Status { status: u16, message: Option<String> },

    #[error("malformed directions response: {0}")]
    Decode(String),

    #[error("directions service returned no routes")]
    NoRoutes,

    #[error("no directions access token configured")]
    MissingAccessToken,

    #[error("route overlay rejected by the engine: {0}")]
    Engine(String),
}

impl RouteError {
    pub(crate) fn from_reqwest(error: reqwest::Error, timeout_ms: u64) -> Self {
        if error.is_timeout() {
            RouteError::Timeout(timeout_ms)
        } else {
            RouteError::Network(error.to_string())
        }
    }
}

impl From<MapError> for RouteError {
    fn from(error: MapError) -> Self {
        RouteError::Engine(error.to_string())
    }
}

/// Identifies one route request: the instance it was issued for and its
/// position among requests on that instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteTicket {
    pub generation: Generation,
    pub sequence: u64,
}

impl fmt::Display for RouteTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route#{}@{}", self.sequence, self.generation)
    }
}

/// An issued route request. Sending it does not borrow the controller, so
/// other operations may run while it is in flight; hand the result back
/// with its ticket.
#[derive(Clone)]
pub struct RouteRequest {
    ticket: RouteTicket,
    origin: LatLng,
    destination: LatLng,
    directions: Arc<dyn DirectionsService>,
}

impl RouteRequest {
    pub(crate) fn new(
        ticket: RouteTicket,
        origin: LatLng,
        destination: LatLng,
        directions: Arc<dyn DirectionsService>,
    ) -> Self {
        Self {
            ticket,
            origin,
            destination,
            directions,
        }
    }

    pub fn ticket(&self) -> RouteTicket {
        self.ticket
    }

    pub fn endpoints(&self) -> (LatLng, LatLng) {
        (self.origin, self.destination)
    }

    pub async fn send(&self) -> Result<DirectionsResponse, RouteError> {
        self.directions.route(self.origin, self.destination).await
    }
}

impl fmt::Debug for RouteRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRequest")
            .field("ticket", &self.ticket)
            .field("origin", &self.origin)
            .field("destination", &self.destination)
            .finish_non_exhaustive()
    }
}

/// Shape of a route geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    pub points: usize,
    /// Great-circle length along the line
    pub length_m: f64,
}

impl RouteSummary {
    pub fn from_coordinates(coordinates: &[LngLat]) -> Self {
        let line: geo::LineString<f64> = coordinates.iter().copied().collect();
        Self {
            points: coordinates.len(),
            length_m: line.haversine_length(),
        }
    }

    pub fn length_km(&self) -> f64 {
        self.length_m / 1000.0
    }
}

/// What happened to a route result
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteStatus {
    /// Source and line layer were created
    Rendered(RouteSummary),
    /// The existing source got the new geometry
    Updated(RouteSummary),
    /// Instance still loading its style; drawn on `StyleLoaded`
    Pending(RouteSummary),
    /// A newer request or a newer instance took over; result dropped
    Superseded,
    /// No surface or instance to draw on
    Skipped,
}

impl RouteStatus {
    pub fn summary(&self) -> Option<RouteSummary> {
        match self {
            RouteStatus::Rendered(summary)
            | RouteStatus::Updated(summary)
            | RouteStatus::Pending(summary) => Some(*summary),
            RouteStatus::Superseded | RouteStatus::Skipped => None,
        }
    }

    pub fn is_drawn(&self) -> bool {
        matches!(self, RouteStatus::Rendered(_) | RouteStatus::Updated(_))
    }
}
