use crate::data::geojson::GeoJson;

/// GeoJSON data registered on an instance under a source id
#[derive(Debug, Clone, PartialEq)]
pub struct GeoJsonSource {
    data: GeoJson,
    revision: u32,
}

impl GeoJsonSource {
    pub fn new(data: GeoJson) -> Self {
        Self { data, revision: 0 }
    }

    pub fn data(&self) -> &GeoJson {
        &self.data
    }

    /// Replaces the data; layers drawing from this source pick it up.
    pub fn set_data(&mut self, data: GeoJson) {
        self.data = data;
        self.revision += 1;
    }

    /// Number of `set_data` calls since registration
    pub fn revision(&self) -> u32 {
        self.revision
    }
}
