//! The map view-state controller.
//!
//! [`MapController`] owns one map instance at a time (through a
//! [`ViewSlot`]) and everything the screen derives from it: the dataset
//! pins, the search-result pin, the route overlay and the search query.
//! [`initialize_map`] is the only operation that builds a fresh instance
//! over a live one; the others reuse the current instance, building one
//! first only where a navigation needs it (search result, device position).
//!
//! Asynchronous results are tagged with the instance [`Generation`] they
//! were started for. A result whose generation is no longer current, or
//! that a newer request of the same kind has overtaken, is dropped.
//!
//! [`initialize_map`]: MapController::initialize_map

use crate::{
    core::{
        config::ControllerConfig,
        geo::{LatLng, LngLat},
        lifecycle::{Generation, ReadyState, Surface, ViewSlot},
        map::MapOptions,
        viewport::{FlyTo, Viewport},
    },
    data::markers::{LocationMarker, MarkerDataset},
    geolocation::{GeolocationError, LocateRequest, LocateTicket, Position},
    layers::marker::Marker,
    routing::{
        add_origin_point, directions::DirectionsResponse, upsert_route, MapboxDirections,
        OverlayChange, RouteError, RouteRequest, RouteStatus, RouteSummary, RouteTicket,
    },
    search::SearchFilter,
    traits::{DirectionsService, GeolocationProvider, MapEngine, MapEvent, MapInstance, MarkerId},
    ui::{controls::Control, popup::PopupContent},
    MapError, Result,
};
use std::sync::Arc;

/// Result of switching the location zoom on or off
#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    /// The camera flew to the device position
    Moved(Viewport),
    /// Positioning failed; the view was left as it was
    Failed(GeolocationError),
    /// Not a false -> true transition, nothing requested
    NoTransition,
    /// A position arrived but no surface was mounted
    Skipped,
    /// The answer belongs to an overtaken request, or the flag was turned
    /// off while it was pending
    Superseded,
}

pub struct MapController<E: MapEngine> {
    engine: E,
    slot: ViewSlot<E::Instance>,
    config: ControllerConfig,
    dataset: MarkerDataset,
    search: SearchFilter,
    location_zoom: bool,
    directions: Arc<dyn DirectionsService>,
    geolocation: Option<Arc<dyn GeolocationProvider>>,
    /// Pins placed for the dataset on the current instance
    dataset_pins: Vec<MarkerId>,
    search_pin: Option<MarkerId>,
    route_sequence: u64,
    latest_route: Option<RouteTicket>,
    /// Geometry waiting for the style to load
    pending_route: Option<Vec<LngLat>>,
    route_summary: Option<RouteSummary>,
    locate_sequence: u64,
    latest_locate: Option<LocateTicket>,
    last_location_error: Option<GeolocationError>,
}

impl<E: MapEngine> MapController<E> {
    pub fn new(
        engine: E,
        config: ControllerConfig,
        dataset: MarkerDataset,
        directions: Arc<dyn DirectionsService>,
    ) -> Self {
        Self {
            engine,
            slot: ViewSlot::new(),
            config,
            dataset,
            search: SearchFilter::new(),
            location_zoom: false,
            directions,
            geolocation: None,
            dataset_pins: Vec::new(),
            search_pin: None,
            route_sequence: 0,
            latest_route: None,
            pending_route: None,
            route_summary: None,
            locate_sequence: 0,
            latest_locate: None,
            last_location_error: None,
        }
    }

    /// Controller whose routes come from the Mapbox Directions API
    /// configured in `config.directions`.
    pub fn with_mapbox(engine: E, config: ControllerConfig, dataset: MarkerDataset) -> Self {
        let directions = Arc::new(MapboxDirections::new(config.directions.clone()));
        Self::new(engine, config, dataset, directions)
    }

    /// Without a provider, turning the location zoom on reports
    /// [`GeolocationError::Unsupported`].
    pub fn with_geolocation(mut self, provider: Arc<dyn GeolocationProvider>) -> Self {
        self.geolocation = Some(provider);
        self
    }

    // ---- lifecycle ----

    /// Binds the display surface. Any instance over a previous surface is
    /// released; call [`restore_map_state`](Self::restore_map_state) to draw
    /// again.
    pub fn mount(&mut self, surface: Surface) {
        self.slot.mount(surface);
        self.reset_instance_state();
    }

    /// Releases the instance and the surface. Search query and location
    /// flag survive for the next mount.
    pub fn unmount(&mut self) -> Option<Surface> {
        let surface = self.slot.unmount();
        self.reset_instance_state();
        surface
    }

    /// Builds a fresh instance over the mounted surface at the initial zoom,
    /// adds the navigation control, and flies to the default view unless the
    /// location zoom is on. The origin point layer follows once the style has
    /// loaded.
    ///
    /// Returns `Ok(None)` without touching anything when no surface is
    /// mounted. An engine error leaves the previous instance in place.
    pub fn initialize_map(&mut self) -> Result<Option<Generation>> {
        let Some(surface) = self.slot.surface() else {
            log::debug!("initialize_map: no surface mounted");
            return Ok(None);
        };
        let options = MapOptions::new(
            surface.id.clone(),
            self.config.view.style_url.clone(),
            None,
            self.config.view.initial_zoom,
        );

        let Some(generation) = self.slot.create(&mut self.engine, &options)? else {
            return Ok(None);
        };
        self.reset_instance_state();

        if self.config.view.navigation_control {
            if let Some(instance) = self.slot.instance_mut() {
                instance.add_control(Control::navigation());
            }
        }

        // engines that load synchronously have StyleLoaded queued already
        self.process_events()?;

        if !self.location_zoom {
            let target = FlyTo::new(self.config.view.default_center(), self.config.view.default_zoom);
            if let Some(instance) = self.slot.instance_mut() {
                instance.fly_to(target);
            }
        }

        log::info!("map {} initialized ({})", generation, self.slot.state());
        Ok(Some(generation))
    }

    /// Handles the events the instance queued since the last call and
    /// returns them. `StyleLoaded` moves the instance to `Ready`, adds the
    /// origin point layer and draws any route that arrived while loading.
    ///
    /// Events raised by that handling are drained in the same call, so the
    /// queue is empty on return.
    pub fn process_events(&mut self) -> Result<Vec<MapEvent>> {
        let mut events = Vec::new();
        loop {
            let Some(instance) = self.slot.instance_mut() else {
                return Ok(events);
            };
            let batch = instance.drain_events();
            if batch.is_empty() {
                return Ok(events);
            }

            for event in &batch {
                match event {
                    MapEvent::StyleLoaded => self.on_style_loaded()?,
                    MapEvent::MoveEnd { center, zoom } => {
                        log::trace!("camera at {:?} z{}", center.to_lng_lat(), zoom)
                    }
                    _ => {}
                }
            }
            events.extend(batch);
        }
    }

    fn on_style_loaded(&mut self) -> Result<()> {
        if !self.slot.mark_ready() {
            return Ok(());
        }
        let Some(instance) = self.slot.instance_mut() else {
            return Ok(());
        };

        add_origin_point(instance, &self.config.route)?;

        if let Some(coordinates) = self.pending_route.take() {
            let summary = RouteSummary::from_coordinates(&coordinates);
            upsert_route(instance, coordinates, &self.config.route)?;
            self.route_summary = Some(summary);
            log::info!(
                "pending route drawn: {} points, {:.1} km",
                summary.points,
                summary.length_km()
            );
        }
        Ok(())
    }

    /// Re-runs initialization and the dataset pins, for a surface that was
    /// torn down and mounted again.
    pub fn restore_map_state(&mut self) -> Result<Option<Generation>> {
        let generation = self.initialize_map()?;
        if generation.is_some() {
            self.add_markers();
        }
        Ok(generation)
    }

    fn ensure_instance(&mut self) -> Result<bool> {
        if self.slot.instance().is_some() {
            return Ok(true);
        }
        Ok(self.initialize_map()?.is_some())
    }

    fn reset_instance_state(&mut self) {
        self.dataset_pins.clear();
        self.search_pin = None;
        self.latest_route = None;
        self.pending_route = None;
        self.route_summary = None;
    }

    // ---- markers ----

    /// Places a pin with its popup for every dataset record on the current
    /// instance, replacing pins placed earlier by this method. Returns the
    /// number placed; 0 when there is no instance.
    pub fn add_markers(&mut self) -> usize {
        let Some(instance) = self.slot.instance_mut() else {
            log::debug!("add_markers: no map instance");
            return 0;
        };

        for marker_id in self.dataset_pins.drain(..) {
            instance.remove_marker(marker_id);
        }
        for record in self.dataset.iter() {
            let popup = PopupContent::from_marker(record).to_html(&self.config.popup);
            let pin = Marker::new(record.position(), self.config.markers.color_for(record))
                .with_popup(popup);
            self.dataset_pins.push(instance.add_marker(pin));
        }

        log::debug!("placed {} dataset markers", self.dataset_pins.len());
        self.dataset_pins.len()
    }

    /// Jumps to a search result: flies to `[lng, lat]` at the search zoom,
    /// drops a highlighted pin there (replacing the previous one) and clears
    /// the search query. Dataset pins stay.
    ///
    /// Returns `Ok(false)` when no surface is mounted; the query is kept.
    pub fn zoom_to_location(&mut self, lng: f64, lat: f64) -> Result<bool> {
        let target = LatLng::from_lng_lat([lng, lat]);
        if !target.is_valid() {
            return Err(MapError::InvalidCoordinates(format!("[{}, {}]", lng, lat)));
        }
        if !self.ensure_instance()? {
            log::debug!("zoom_to_location: no surface mounted");
            return Ok(false);
        }
        let Some(instance) = self.slot.instance_mut() else {
            return Ok(false);
        };

        if let Some(previous) = self.search_pin.take() {
            instance.remove_marker(previous);
        }
        instance.fly_to(FlyTo::new(target, self.config.view.search_result_zoom));
        let pin = Marker::new(target, self.config.markers.highlight_color.as_str());
        self.search_pin = Some(instance.add_marker(pin));

        self.search.clear();
        Ok(true)
    }

    // ---- search ----

    pub fn search_query(&self) -> &str {
        self.search.query()
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search.set_query(query);
    }

    /// Dataset records matching the current query; empty for an empty query
    pub fn found_markers(&self) -> Vec<&LocationMarker> {
        self.search.results(&self.dataset)
    }

    // ---- geolocation ----

    pub fn is_location_zoom(&self) -> bool {
        self.location_zoom
    }

    /// Sets the location zoom flag. Switching it on requests the device
    /// position once and flies there at the location zoom.
    ///
    /// Positioning failures are logged and reported as
    /// [`LocationOutcome::Failed`] with the camera untouched; `Err` is only
    /// returned when an instance had to be built and the engine refused.
    pub async fn set_location_zoom(&mut self, enabled: bool) -> Result<LocationOutcome> {
        let Some(request) = self.begin_locate(enabled) else {
            return Ok(LocationOutcome::NoTransition);
        };
        let result = request.send().await;
        self.apply_position(request.ticket(), result)
    }

    /// Sets the location zoom flag and, on a false -> true transition,
    /// issues a position request. The request runs without borrowing the
    /// controller; hand its answer to [`apply_position`](Self::apply_position).
    pub fn begin_locate(&mut self, enabled: bool) -> Option<LocateRequest> {
        let was_enabled = std::mem::replace(&mut self.location_zoom, enabled);
        if !enabled || was_enabled {
            return None;
        }
        self.locate_sequence += 1;
        let ticket = LocateTicket {
            sequence: self.locate_sequence,
        };
        self.latest_locate = Some(ticket);
        log::debug!("{} issued", ticket);

        Some(LocateRequest::new(
            ticket,
            self.geolocation.clone(),
            self.config.geolocation.clone(),
        ))
    }

    /// Flies to the position answered for `ticket`.
    ///
    /// Answers to an overtaken request, or arriving after the flag was
    /// switched off, are dropped as [`LocationOutcome::Superseded`].
    pub fn apply_position(
        &mut self,
        ticket: LocateTicket,
        result: std::result::Result<Position, GeolocationError>,
    ) -> Result<LocationOutcome> {
        if !self.location_zoom || self.latest_locate != Some(ticket) {
            log::debug!("discarding stale position for {}", ticket);
            return Ok(LocationOutcome::Superseded);
        }
        let position = match result {
            Ok(position) => position,
            Err(error) => return Ok(self.location_failed(error)),
        };
        self.last_location_error = None;

        if !self.ensure_instance()? {
            log::debug!("position received but no surface mounted");
            return Ok(LocationOutcome::Skipped);
        }
        let target = FlyTo::new(position.lat_lng(), self.config.view.location_zoom);
        let Some(instance) = self.slot.instance_mut() else {
            return Ok(LocationOutcome::Skipped);
        };
        instance.fly_to(target);
        log::info!(
            "flew to device position {:?}",
            position.lat_lng().to_lng_lat()
        );
        Ok(LocationOutcome::Moved(target.target()))
    }

    fn location_failed(&mut self, error: GeolocationError) -> LocationOutcome {
        log::warn!("geolocation failed: {}", error);
        self.last_location_error = Some(error.clone());
        LocationOutcome::Failed(error)
    }

    /// The failure of the most recent position request, if it failed
    pub fn last_location_error(&self) -> Option<&GeolocationError> {
        self.last_location_error.as_ref()
    }

    // ---- route ----

    /// Issues a ticket for a route request on the current instance. `None`
    /// when there is no instance to draw on.
    ///
    /// Only the newest ticket for the current instance is applied by
    /// [`apply_route`](Self::apply_route).
    pub fn begin_route(&mut self) -> Option<RouteRequest> {
        if self.slot.instance().is_none() {
            log::debug!("begin_route: no map instance");
            return None;
        }
        self.route_sequence += 1;
        let ticket = RouteTicket {
            generation: self.slot.generation(),
            sequence: self.route_sequence,
        };
        self.latest_route = Some(ticket);
        log::debug!("{} issued", ticket);

        Some(RouteRequest::new(
            ticket,
            LatLng::from_lng_lat(self.config.route.origin),
            LatLng::from_lng_lat(self.config.route.destination),
            Arc::clone(&self.directions),
        ))
    }

    /// Draws the result of the request behind `ticket`.
    ///
    /// Results for a replaced instance or an overtaken request are dropped
    /// as [`RouteStatus::Superseded`], failures included. A failure for the
    /// live request leaves the overlay as it was.
    pub fn apply_route(
        &mut self,
        ticket: RouteTicket,
        result: std::result::Result<DirectionsResponse, RouteError>,
    ) -> std::result::Result<RouteStatus, RouteError> {
        if !self.slot.is_current(ticket.generation) || self.latest_route != Some(ticket) {
            log::warn!("discarding stale route result {}", ticket);
            return Ok(RouteStatus::Superseded);
        }

        let coordinates = result?.into_first_route()?;
        let summary = RouteSummary::from_coordinates(&coordinates);

        if self.slot.state() != ReadyState::Ready {
            log::debug!("{} waiting for the style to load", ticket);
            self.pending_route = Some(coordinates);
            self.route_summary = Some(summary);
            return Ok(RouteStatus::Pending(summary));
        }
        let Some(instance) = self.slot.instance_mut() else {
            return Ok(RouteStatus::Skipped);
        };

        let change = upsert_route(instance, coordinates, &self.config.route)?;
        self.route_summary = Some(summary);
        log::info!(
            "route {}: {} points, {:.1} km",
            if change == OverlayChange::Created { "rendered" } else { "updated" },
            summary.points,
            summary.length_km()
        );
        Ok(match change {
            OverlayChange::Created => RouteStatus::Rendered(summary),
            OverlayChange::Updated => RouteStatus::Updated(summary),
        })
    }

    /// Fetches the route between the configured endpoints and draws it.
    pub async fn get_route(&mut self) -> std::result::Result<RouteStatus, RouteError> {
        let Some(request) = self.begin_route() else {
            return Ok(RouteStatus::Skipped);
        };
        let result = request.send().await;
        self.apply_route(request.ticket(), result)
    }

    /// Summary of the route currently drawn (or waiting to be drawn)
    pub fn route_summary(&self) -> Option<RouteSummary> {
        self.route_summary
    }

    // ---- accessors ----

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn dataset(&self) -> &MarkerDataset {
        &self.dataset
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn instance(&self) -> Option<&E::Instance> {
        self.slot.instance()
    }

    pub fn instance_mut(&mut self) -> Option<&mut E::Instance> {
        self.slot.instance_mut()
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.slot.surface()
    }

    pub fn state(&self) -> ReadyState {
        self.slot.state()
    }

    pub fn generation(&self) -> Generation {
        self.slot.generation()
    }

    pub fn camera(&self) -> Option<Viewport> {
        self.slot.instance().map(|instance| instance.camera())
    }

    pub fn search_pin(&self) -> Option<MarkerId> {
        self.search_pin
    }
}
