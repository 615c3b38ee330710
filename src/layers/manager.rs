use crate::{
    data::geojson::GeoJson,
    layers::base::{LayerSource, LayerSpec},
    layers::source::GeoJsonSource,
    MapError, Result,
};

use crate::prelude::HashMap;

/// Registry of the sources and layers of one map instance
pub struct LayerManager {
    /// All sources indexed by ID
    sources: HashMap<String, GeoJsonSource>,
    /// All layers indexed by ID
    layers: HashMap<String, LayerSpec>,
    /// Layer IDs in the order they were added (drawing order)
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            sources: HashMap::default(),
            layers: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Adds a source; an existing id is rejected
    pub fn add_source(&mut self, source_id: &str, data: GeoJson) -> Result<()> {
        if self.sources.contains_key(source_id) {
            return Err(MapError::Source(format!(
                "There is already a source with ID \"{}\"",
                source_id
            )));
        }
        self.sources
            .insert(source_id.to_string(), GeoJsonSource::new(data));
        Ok(())
    }

    /// Replaces the data of an existing source
    pub fn set_source_data(&mut self, source_id: &str, data: GeoJson) -> Result<()> {
        match self.sources.get_mut(source_id) {
            Some(source) => {
                source.set_data(data);
                Ok(())
            }
            None => Err(MapError::Source(format!(
                "There is no source with ID \"{}\"",
                source_id
            ))),
        }
    }

    /// Removes a source no layer draws from. Returns false if it was absent
    /// or still in use.
    pub fn remove_source(&mut self, source_id: &str) -> bool {
        let in_use = self.layers.values().any(|layer| match &layer.source {
            LayerSource::Named(named) => named == source_id,
            LayerSource::Inline(_) => layer.id == source_id,
        });
        !in_use && self.sources.remove(source_id).is_some()
    }

    pub fn get_source(&self, source_id: &str) -> Option<&GeoJsonSource> {
        self.sources.get(source_id)
    }

    pub fn has_source(&self, source_id: &str) -> bool {
        self.sources.contains_key(source_id)
    }

    /// Adds a layer. Inline data is registered as a source under the layer id
    /// first; a named source must already exist.
    pub fn add_layer(&mut self, layer: LayerSpec) -> Result<()> {
        if self.layers.contains_key(&layer.id) {
            return Err(MapError::Layer(format!(
                "Layer with id \"{}\" already exists on this map",
                layer.id
            )));
        }

        match &layer.source {
            LayerSource::Inline(data) => self.add_source(&layer.id, data.clone())?,
            LayerSource::Named(source_id) => {
                if !self.sources.contains_key(source_id) {
                    return Err(MapError::Layer(format!(
                        "Source \"{}\" not found for layer \"{}\"",
                        source_id, layer.id
                    )));
                }
            }
        }

        self.render_order.push(layer.id.clone());
        self.layers.insert(layer.id.clone(), layer);
        Ok(())
    }

    /// Gets a layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&LayerSpec> {
        self.layers.get(layer_id)
    }

    pub fn has_layer(&self, layer_id: &str) -> bool {
        self.layers.contains_key(layer_id)
    }

    /// Lists layer IDs in render order
    pub fn list_layers(&self) -> Vec<String> {
        self.render_order.clone()
    }

    /// Lists source IDs
    pub fn list_sources(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sources.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}
