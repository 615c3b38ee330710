pub mod controls;
pub mod popup;

pub use controls::{Control, Position};
pub use popup::{PopupContent, PopupLabels};
