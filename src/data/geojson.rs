use crate::core::geo::LngLat;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// GeoJSON geometry types the viewer draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point { coordinates: LngLat },
    LineString { coordinates: Vec<LngLat> },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: HashMap<String, serde_json::Value>,
}

impl GeoJsonFeature {
    pub fn new(geometry: GeoJsonGeometry) -> Self {
        Self {
            id: None,
            geometry: Some(geometry),
            properties: HashMap::new(),
        }
    }
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
}

impl GeoJson {
    /// Parses a GeoJSON document
    pub fn from_str(geojson_str: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(geojson_str)?)
    }

    /// A collection holding one point feature
    pub fn point(coordinates: LngLat) -> Self {
        GeoJson::FeatureCollection {
            features: vec![GeoJsonFeature::new(GeoJsonGeometry::Point { coordinates })],
        }
    }

    /// A single line feature
    pub fn line_string(coordinates: Vec<LngLat>) -> Self {
        GeoJson::Feature(GeoJsonFeature::new(GeoJsonGeometry::LineString {
            coordinates,
        }))
    }

    /// Gets all features
    pub fn features(&self) -> Vec<&GeoJsonFeature> {
        match self {
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::FeatureCollection { features } => features.iter().collect(),
        }
    }

    /// Coordinates of the first line feature, if any
    pub fn line_coordinates(&self) -> Option<&[LngLat]> {
        self.features()
            .into_iter()
            .find_map(|feature| match &feature.geometry {
                Some(GeoJsonGeometry::LineString { coordinates }) => Some(coordinates.as_slice()),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geojson_parsing() {
        let geojson_str = r#"
        {
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"name": "Origen"},
                    "geometry": {
                        "type": "Point",
                        "coordinates": [-100.429722, 22.603333]
                    }
                }
            ]
        }
        "#;

        let geojson = GeoJson::from_str(geojson_str).unwrap();
        let features = geojson.features();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].properties["name"], "Origen");
    }

    #[test]
    fn test_point_geometry() {
        let point = GeoJson::point([-100.9733, 22.1505]);

        let features = point.features();
        assert_eq!(features.len(), 1);
        assert_eq!(
            features[0].geometry,
            Some(GeoJsonGeometry::Point {
                coordinates: [-100.9733, 22.1505]
            })
        );
        assert!(point.line_coordinates().is_none());
    }

    #[test]
    fn test_line_feature_serializes_as_geojson() {
        let line = GeoJson::line_string(vec![[-100.43, 22.60], [-100.97, 22.15]]);
        let value = serde_json::to_value(&line).unwrap();

        assert_eq!(value["type"], "Feature");
        assert_eq!(value["geometry"]["type"], "LineString");
        assert_eq!(value["geometry"]["coordinates"][1][0], -100.97);
        assert!(value["properties"].as_object().unwrap().is_empty());
        assert_eq!(
            line.line_coordinates(),
            Some(&[[-100.43, 22.60], [-100.97, 22.15]][..])
        );
    }

    #[test]
    fn test_point_collection_has_no_line() {
        assert!(GeoJson::point([-100.4, 22.6]).line_coordinates().is_none());
    }
}
