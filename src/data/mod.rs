pub mod geojson;
pub mod markers;
