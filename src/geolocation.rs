//! One-shot device positioning.

use crate::core::constants::{GEOLOCATION_MAXIMUM_AGE_MS, GEOLOCATION_TIMEOUT_MS};
use crate::core::geo::LatLng;
use crate::traits::GeolocationProvider;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// `{ enableHighAccuracy, timeout, maximumAge }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout_ms: u64,
    /// Oldest cached fix accepted; 0 forces a fresh one
    pub maximum_age_ms: u64,
}

impl PositionOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout_ms: GEOLOCATION_TIMEOUT_MS,
            maximum_age_ms: GEOLOCATION_MAXIMUM_AGE_MS,
        }
    }
}

/// A position fix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub longitude: f64,
    pub latitude: f64,
    /// Accuracy radius in metres, when reported
    pub accuracy: Option<f64>,
}

impl Position {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            accuracy: None,
        }
    }

    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("permission to read the position was denied")]
    PermissionDenied,

    #[error("position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("no position within {0} ms")]
    Timeout(u64),

    #[error("geolocation is not supported in this environment")]
    Unsupported,
}

/// Asks the provider once, bounding the wait by `options.timeout_ms` even
/// when the provider does not enforce it.
pub async fn locate(
    provider: &dyn GeolocationProvider,
    options: &PositionOptions,
) -> Result<Position, GeolocationError> {
    bounded(options, provider.current_position(options)).await
}

/// Identifies one position request. Only the newest is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocateTicket {
    pub sequence: u64,
}

impl fmt::Display for LocateTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "locate#{}", self.sequence)
    }
}

/// An issued position request. It owns what it needs, so the controller
/// stays free while the device answers.
#[derive(Clone)]
pub struct LocateRequest {
    ticket: LocateTicket,
    provider: Option<Arc<dyn GeolocationProvider>>,
    options: PositionOptions,
}

impl LocateRequest {
    pub(crate) fn new(
        ticket: LocateTicket,
        provider: Option<Arc<dyn GeolocationProvider>>,
        options: PositionOptions,
    ) -> Self {
        Self {
            ticket,
            provider,
            options,
        }
    }

    pub fn ticket(&self) -> LocateTicket {
        self.ticket
    }

    /// Without a provider this fails with [`GeolocationError::Unsupported`].
    pub async fn send(&self) -> Result<Position, GeolocationError> {
        match &self.provider {
            Some(provider) => locate(provider.as_ref(), &self.options).await,
            None => Err(GeolocationError::Unsupported),
        }
    }
}

impl fmt::Debug for LocateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocateRequest")
            .field("ticket", &self.ticket)
            .field("has_provider", &self.provider.is_some())
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(feature = "tokio-runtime")]
async fn bounded<F>(options: &PositionOptions, request: F) -> Result<Position, GeolocationError>
where
    F: std::future::Future<Output = Result<Position, GeolocationError>>,
{
    match tokio::time::timeout(options.timeout(), request).await {
        Ok(result) => result,
        Err(_) => Err(GeolocationError::Timeout(options.timeout_ms)),
    }
}

#[cfg(not(feature = "tokio-runtime"))]
async fn bounded<F>(_options: &PositionOptions, request: F) -> Result<Position, GeolocationError>
where
    F: std::future::Future<Output = Result<Position, GeolocationError>>,
{
    request.await
}

#[cfg(feature = "tokio-runtime")]
async fn pause(delay: Option<Duration>) {
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(not(feature = "tokio-runtime"))]
async fn pause(_delay: Option<Duration>) {}

/// Provider that answers every request with the same outcome
#[derive(Debug, Clone)]
pub struct FixedGeolocation {
    outcome: Result<Position, GeolocationError>,
    delay: Option<Duration>,
}

impl FixedGeolocation {
    pub fn at(longitude: f64, latitude: f64) -> Self {
        Self {
            outcome: Ok(Position::new(longitude, latitude)),
            delay: None,
        }
    }

    pub fn failing(error: GeolocationError) -> Self {
        Self {
            outcome: Err(error),
            delay: None,
        }
    }

    /// Answer only after `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl GeolocationProvider for FixedGeolocation {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Position, GeolocationError> {
        pause(self.delay).await;
        self.outcome.clone()
    }
}
