//! The fixed set of locations shown on the map.

use crate::core::geo::LatLng;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// One labeled location with its contact details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMarker {
    pub title: String,
    pub lat: f64,
    pub lng: f64,
    /// Person in charge
    pub encargado: String,
    /// Contact email
    pub correo: String,
    /// Street address
    pub direccion: String,
    /// Contact phone, when the location has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
}

impl LocationMarker {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// Phone number as stored. An empty string counts as absent.
    pub fn phone(&self) -> Option<&str> {
        self.telefono.as_deref().filter(|phone| !phone.is_empty())
    }
}

/// Immutable, ordered marker records loaded once at startup.
///
/// Cloning shares the records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerDataset {
    markers: Arc<[LocationMarker]>,
}

impl MarkerDataset {
    pub fn new(markers: Vec<LocationMarker>) -> Self {
        Self {
            markers: markers.into(),
        }
    }

    /// Parses a JSON array of records and rejects out-of-range coordinates
    pub fn from_json_str(json: &str) -> Result<Self> {
        let markers: Vec<LocationMarker> = serde_json::from_str(json)?;
        if let Some(bad) = markers.iter().find(|m| !m.position().is_valid()) {
            return Err(MapError::InvalidCoordinates(format!(
                "{} ({}, {})",
                bad.title, bad.lat, bad.lng
            )));
        }
        log::debug!("loaded {} location markers", markers.len());
        Ok(Self::new(markers))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocationMarker> {
        self.markers.iter()
    }

    pub fn as_slice(&self) -> &[LocationMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl From<Vec<LocationMarker>> for MarkerDataset {
    fn from(markers: Vec<LocationMarker>) -> Self {
        Self::new(markers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"[
        {
            "title": "Emsad Centro",
            "lat": 22.1505,
            "lng": -100.9733,
            "encargado": "María López",
            "correo": "emsad.centro@example.mx",
            "direccion": "Av. Universidad 100",
            "telefono": "555-1234"
        },
        {
            "title": "Clinica Norte",
            "lat": 22.603333,
            "lng": -100.429722,
            "encargado": "Jorge Ruiz",
            "correo": "clinica.norte@example.mx",
            "direccion": "Calle Hidalgo 5"
        }
    ]"#;

    #[test]
    fn test_dataset_parsing_keeps_order() {
        let dataset = MarkerDataset::from_json_str(DATASET).unwrap();
        assert_eq!(dataset.len(), 2);

        let titles: Vec<_> = dataset.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Emsad Centro", "Clinica Norte"]);
        assert_eq!(dataset.as_slice()[0].phone(), Some("555-1234"));
        assert_eq!(dataset.as_slice()[1].telefono, None);
    }

    #[test]
    fn test_phone_kept_as_stored() {
        let mut marker = MarkerDataset::from_json_str(DATASET).unwrap().as_slice()[0].clone();

        marker.telefono = Some(String::new());
        assert_eq!(marker.phone(), None);

        marker.telefono = Some(" 555 ".to_string());
        assert_eq!(marker.phone(), Some(" 555 "));

        marker.telefono = Some("  ".to_string());
        assert_eq!(marker.phone(), Some("  "));
    }

    #[test]
    fn test_invalid_coordinates_rejected() {
        let json = r#"[{ "title": "X", "lat": 122.0, "lng": 0.0,
                         "encargado": "", "correo": "", "direccion": "" }]"#;
        assert!(matches!(
            MarkerDataset::from_json_str(json),
            Err(MapError::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn test_clones_share_records() {
        let dataset = MarkerDataset::from_json_str(DATASET).unwrap();
        let copy = dataset.clone();
        assert!(std::ptr::eq(dataset.as_slice(), copy.as_slice()));
    }
}
