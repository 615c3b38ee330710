//! Directions service client and wire types.

use crate::core::config::DirectionsConfig;
use crate::core::geo::{LatLng, LngLat};
use crate::routing::RouteError;
use crate::traits::DirectionsService;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Shared async HTTP client for directions requests
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("mapview/", env!("CARGO_PKG_VERSION")))
        .tcp_keepalive(std::time::Duration::from_secs(30))
        .pool_idle_timeout(std::time::Duration::from_secs(90))
        .build()
        .expect("failed to build reqwest async client")
});

/// `{ routes: [ { geometry: { coordinates } } ] }`, plus the status fields
/// the service adds on failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRoute {
    pub geometry: RouteGeometry,
    /// Metres, as reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    pub coordinates: Vec<LngLat>,
}

impl DirectionsResponse {
    pub fn from_coordinates(coordinates: Vec<LngLat>) -> Self {
        Self {
            routes: vec![DirectionsRoute {
                geometry: RouteGeometry { coordinates },
                distance: None,
                duration: None,
            }],
            code: Some("Ok".to_string()),
            message: None,
        }
    }

    /// The first route's coordinates, verbatim
    pub fn into_first_route(self) -> Result<Vec<LngLat>, RouteError> {
        self.routes
            .into_iter()
            .next()
            .map(|route| route.geometry.coordinates)
            .ok_or(RouteError::NoRoutes)
    }
}

/// Mapbox Directions API v5
#[derive(Debug, Clone)]
pub struct MapboxDirections {
    config: DirectionsConfig,
}

impl MapboxDirections {
    pub fn new(config: DirectionsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DirectionsConfig {
        &self.config
    }

    /// `{base}/directions/v5/mapbox/{profile}/{oLng},{oLat};{dLng},{dLat}?steps=true&geometries=geojson&access_token={key}`
    pub fn request_url(&self, origin: LatLng, destination: LatLng) -> Result<reqwest::Url, RouteError> {
        let token = self
            .config
            .access_token
            .as_deref()
            .ok_or(RouteError::MissingAccessToken)?;
        let raw = format!(
            "{}/directions/v5/mapbox/{}/{},{};{},{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            origin.lng,
            origin.lat,
            destination.lng,
            destination.lat
        );
        let mut url =
            reqwest::Url::parse(&raw).map_err(|e| RouteError::Network(format!("bad url {}: {}", raw, e)))?;
        url.query_pairs_mut()
            .append_pair("steps", "true")
            .append_pair("geometries", "geojson")
            .append_pair("access_token", token);
        Ok(url)
    }

    /// Maps a status and body to a response or a fetch error
    pub fn decode(status: reqwest::StatusCode, body: &str) -> Result<DirectionsResponse, RouteError> {
        if !status.is_success() {
            let message = serde_json::from_str::<DirectionsResponse>(body)
                .ok()
                .and_then(|r| r.message);
            return Err(RouteError::Status {
                status: status.as_u16(),
                message,
            });
        }
        serde_json::from_str(body).map_err(|e| RouteError::Decode(e.to_string()))
    }
}

#[async_trait]
impl DirectionsService for MapboxDirections {
    async fn route(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<DirectionsResponse, RouteError> {
        let url = self.request_url(origin, destination)?;
        log::debug!(
            "requesting {} route {:?} -> {:?}",
            self.config.profile,
            origin.to_lng_lat(),
            destination.to_lng_lat()
        );

        let timeout_ms = self.config.timeout_ms;
        let response = HTTP_CLIENT
            .get(url)
            .header(reqwest::header::USER_AGENT, self.config.user_agent.as_str())
            .timeout(self.config.timeout())
            .send()
            .await
            .map_err(|e| RouteError::from_reqwest(e, timeout_ms))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RouteError::from_reqwest(e, timeout_ms))?;
        Self::decode(status, &body)
    }
}

/// Directions fake: hands out queued outcomes in order, repeating the last
#[derive(Debug)]
pub struct StaticDirections {
    outcomes: Mutex<Vec<Result<DirectionsResponse, RouteError>>>,
    calls: Mutex<Vec<(LatLng, LatLng)>>,
}

impl StaticDirections {
    pub fn new(outcomes: Vec<Result<DirectionsResponse, RouteError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_route(coordinates: Vec<LngLat>) -> Self {
        Self::new(vec![Ok(DirectionsResponse::from_coordinates(coordinates))])
    }

    pub fn failing(error: RouteError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Endpoints of every request made so far
    pub fn calls(&self) -> Vec<(LatLng, LatLng)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl DirectionsService for StaticDirections {
    async fn route(
        &self,
        origin: LatLng,
        destination: LatLng,
    ) -> Result<DirectionsResponse, RouteError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((origin, destination));
        }
        let mut outcomes = self
            .outcomes
            .lock()
            .map_err(|_| RouteError::Network("directions fake poisoned".to_string()))?;
        match outcomes.len() {
            0 => Err(RouteError::NoRoutes),
            1 => outcomes[0].clone(),
            _ => outcomes.remove(0),
        }
    }
}
