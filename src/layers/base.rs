use crate::data::geojson::GeoJson;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    Circle,
    Line,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Circle => write!(f, "circle"),
            LayerType::Line => write!(f, "line"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    Round,
    Bevel,
    Miter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Round,
    Butt,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineLayout {
    pub join: LineJoin,
    pub cap: LineCap,
}

impl Default for LineLayout {
    fn default() -> Self {
        Self {
            join: LineJoin::Round,
            cap: LineCap::Round,
        }
    }
}

/// Paint properties, one variant per layer type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Paint {
    Circle { radius: f64, color: String },
    Line { color: String, width: f64, opacity: f64 },
}

/// Where a layer reads its features from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayerSource {
    /// A source registered separately under this id
    Named(String),
    /// Data registered together with the layer, under the layer's id
    Inline(GeoJson),
}

/// A style layer as handed to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub id: String,
    pub source: LayerSource,
    pub paint: Paint,
    pub layout: Option<LineLayout>,
    pub visible: bool,
}

impl LayerSpec {
    pub fn circle(id: impl Into<String>, data: GeoJson, radius: f64, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: LayerSource::Inline(data),
            paint: Paint::Circle {
                radius,
                color: color.into(),
            },
            layout: None,
            visible: true,
        }
    }

    pub fn line(
        id: impl Into<String>,
        source_id: impl Into<String>,
        color: impl Into<String>,
        width: f64,
        opacity: f64,
    ) -> Self {
        Self {
            id: id.into(),
            source: LayerSource::Named(source_id.into()),
            paint: Paint::Line {
                color: color.into(),
                width,
                opacity,
            },
            layout: Some(LineLayout::default()),
            visible: true,
        }
    }

    pub fn layer_type(&self) -> LayerType {
        match self.paint {
            Paint::Circle { .. } => LayerType::Circle,
            Paint::Line { .. } => LayerType::Line,
        }
    }

    /// Id of the source the layer draws from
    pub fn source_id(&self) -> &str {
        match &self.source {
            LayerSource::Named(id) => id,
            LayerSource::Inline(_) => &self.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_layer_defaults() {
        let layer = LayerSpec::line("route", "route", "#3887be", 5.0, 0.75);

        assert_eq!(layer.layer_type(), LayerType::Line);
        assert_eq!(layer.source_id(), "route");
        assert_eq!(
            layer.layout,
            Some(LineLayout {
                join: LineJoin::Round,
                cap: LineCap::Round
            })
        );
        assert!(layer.visible);
    }

    #[test]
    fn test_inline_circle_uses_own_id() {
        let layer = LayerSpec::circle("point", GeoJson::point([-100.4, 22.6]), 10.0, "#3887be");
        assert_eq!(layer.layer_type(), LayerType::Circle);
        assert_eq!(layer.source_id(), "point");
        assert!(layer.layout.is_none());
    }

    #[test]
    fn test_layer_type_display() {
        assert_eq!(LayerType::Circle.to_string(), "circle");
        assert_eq!(LayerType::Line.to_string(), "line");
    }
}
