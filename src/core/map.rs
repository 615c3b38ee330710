use crate::{
    core::{
        geo::LatLng,
        lifecycle::Surface,
        viewport::{FlyTo, Viewport},
    },
    data::geojson::GeoJson,
    layers::{base::LayerSpec, manager::LayerManager, marker::Marker},
    traits::{MapEngine, MapEvent, MapInstance, MarkerId},
    ui::controls::Control,
    MapError, Result,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Construction options: `{ container, style, center, zoom }`
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub container: String,
    pub style: String,
    /// `None` leaves the engine's own default center
    pub center: Option<LatLng>,
    pub zoom: f64,
}

impl MapOptions {
    pub fn new(
        container: impl Into<String>,
        style: impl Into<String>,
        center: Option<LatLng>,
        zoom: f64,
    ) -> Self {
        Self {
            container: container.into(),
            style: style.into(),
            center,
            zoom,
        }
    }
}

/// In-memory engine: keeps camera, markers, controls, sources and layers
/// without drawing anything.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    created: usize,
    live: Arc<AtomicUsize>,
    defer_style_load: bool,
    fail_next_create: Option<String>,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// New instances stay in the loading state until
    /// [`HeadlessMap::finish_style_load`] is called.
    pub fn with_deferred_style_load(mut self) -> Self {
        self.defer_style_load = true;
        self
    }

    /// Makes the next `create` call fail with an engine error.
    pub fn fail_next_create(&mut self, reason: impl Into<String>) {
        self.fail_next_create = Some(reason.into());
    }

    /// Instances built so far
    pub fn instances_created(&self) -> usize {
        self.created
    }

    /// Instances not yet dropped
    pub fn live_instances(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

impl MapEngine for HeadlessEngine {
    type Instance = HeadlessMap;

    fn create(&mut self, surface: &Surface, options: &MapOptions) -> Result<HeadlessMap> {
        if let Some(reason) = self.fail_next_create.take() {
            return Err(MapError::Engine(reason));
        }
        if surface.id != options.container {
            return Err(MapError::Engine(format!(
                "container '{}' does not match surface '{}'",
                options.container, surface.id
            )));
        }

        self.created += 1;
        self.live.fetch_add(1, Ordering::SeqCst);
        let mut map = HeadlessMap {
            options: options.clone(),
            viewport: Viewport::new(options.center.unwrap_or_default(), options.zoom),
            layer_manager: LayerManager::new(),
            markers: Vec::new(),
            next_marker_id: 0,
            controls: Vec::new(),
            fly_history: Vec::new(),
            style_loaded: false,
            event_queue: VecDeque::new(),
            live: Arc::clone(&self.live),
        };
        if !self.defer_style_load {
            map.finish_style_load();
        }
        Ok(map)
    }
}

pub struct HeadlessMap {
    options: MapOptions,
    viewport: Viewport,
    layer_manager: LayerManager,
    markers: Vec<(MarkerId, Marker)>,
    next_marker_id: u64,
    controls: Vec<Control>,
    fly_history: Vec<FlyTo>,
    style_loaded: bool,
    event_queue: VecDeque<MapEvent>,
    live: Arc<AtomicUsize>,
}

impl HeadlessMap {
    /// Marks the style as loaded and queues `StyleLoaded` once.
    pub fn finish_style_load(&mut self) {
        if !self.style_loaded {
            self.style_loaded = true;
            self.event_queue.push_back(MapEvent::StyleLoaded);
        }
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn layer_manager(&self) -> &LayerManager {
        &self.layer_manager
    }

    pub fn markers(&self) -> Vec<&Marker> {
        self.markers.iter().map(|(_, marker)| marker).collect()
    }

    pub fn marker(&self, marker_id: MarkerId) -> Option<&Marker> {
        self.markers
            .iter()
            .find(|(id, _)| *id == marker_id)
            .map(|(_, marker)| marker)
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Every camera animation requested, oldest first
    pub fn fly_history(&self) -> &[FlyTo] {
        &self.fly_history
    }

    fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    fn require_style(&self, what: &str) -> Result<()> {
        if self.style_loaded {
            Ok(())
        } else {
            Err(MapError::Engine(format!("Style is not done loading ({})", what)))
        }
    }
}

impl MapInstance for HeadlessMap {
    fn camera(&self) -> Viewport {
        self.viewport
    }

    fn fly_to(&mut self, fly_to: FlyTo) {
        self.fly_history.push(fly_to);
        self.viewport = fly_to.target();
        self.emit(MapEvent::MoveEnd {
            center: self.viewport.center,
            zoom: self.viewport.zoom,
        });
    }

    fn add_control(&mut self, control: Control) {
        self.controls.push(control);
    }

    fn add_marker(&mut self, marker: Marker) -> MarkerId {
        let marker_id = MarkerId(self.next_marker_id);
        self.next_marker_id += 1;
        self.markers.push((marker_id, marker));
        self.emit(MapEvent::MarkerAdded { marker_id });
        marker_id
    }

    fn remove_marker(&mut self, marker_id: MarkerId) -> bool {
        let before = self.markers.len();
        self.markers.retain(|(id, _)| *id != marker_id);
        let removed = self.markers.len() != before;
        if removed {
            self.emit(MapEvent::MarkerRemoved { marker_id });
        }
        removed
    }

    fn has_source(&self, source_id: &str) -> bool {
        self.layer_manager.has_source(source_id)
    }

    fn add_source(&mut self, source_id: &str, data: GeoJson) -> Result<()> {
        self.require_style("add_source")?;
        self.layer_manager.add_source(source_id, data)?;
        self.emit(MapEvent::SourceAdded {
            source_id: source_id.to_string(),
        });
        Ok(())
    }

    fn set_source_data(&mut self, source_id: &str, data: GeoJson) -> Result<()> {
        self.layer_manager.set_source_data(source_id, data)?;
        self.emit(MapEvent::SourceDataChanged {
            source_id: source_id.to_string(),
        });
        Ok(())
    }

    fn remove_source(&mut self, source_id: &str) -> bool {
        let removed = self.layer_manager.remove_source(source_id);
        if removed {
            self.emit(MapEvent::SourceRemoved {
                source_id: source_id.to_string(),
            });
        }
        removed
    }

    fn has_layer(&self, layer_id: &str) -> bool {
        self.layer_manager.has_layer(layer_id)
    }

    fn add_layer(&mut self, layer: LayerSpec) -> Result<()> {
        self.require_style("add_layer")?;
        let layer_id = layer.id.clone();
        self.layer_manager.add_layer(layer)?;
        self.emit(MapEvent::LayerAdded { layer_id });
        Ok(())
    }

    fn is_style_loaded(&self) -> bool {
        self.style_loaded
    }

    fn drain_events(&mut self) -> Vec<MapEvent> {
        self.event_queue.drain(..).collect()
    }
}

impl Drop for HeadlessMap {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}
