use serde::{Deserialize, Serialize};

/// Corner of the map a control is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Default for Position {
    fn default() -> Self {
        Position::TopRight
    }
}

/// Engine add-ons placed over the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Control {
    /// Zoom buttons and compass
    Navigation {
        position: Position,
        show_compass: bool,
        show_zoom: bool,
    },
}

impl Control {
    pub fn navigation() -> Self {
        Control::Navigation {
            position: Position::default(),
            show_compass: true,
            show_zoom: true,
        }
    }

    pub fn is_navigation(&self) -> bool {
        matches!(self, Control::Navigation { .. })
    }
}
