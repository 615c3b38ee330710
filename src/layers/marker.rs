use crate::core::geo::LatLng;

/// A pin placed on the map, with an optional HTML popup
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    position: LatLng,
    color: String,
    popup_html: Option<String>,
}

impl Marker {
    pub fn new(position: LatLng, color: impl Into<String>) -> Self {
        Self {
            position,
            color: color.into(),
            popup_html: None,
        }
    }

    pub fn with_popup(mut self, html: String) -> Self {
        self.popup_html = Some(html);
        self
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn popup_html(&self) -> Option<&str> {
        self.popup_html.as_deref()
    }
}
