#![allow(dead_code)]

use mapview::prelude::*;

pub const ROUTE_A: &[LngLat] = &[[-100.429722, 22.603333], [-100.70, 22.40], [-100.9733, 22.1505]];
pub const ROUTE_B: &[LngLat] = &[[-100.429722, 22.603333], [-100.9733, 22.1505]];

pub fn record(title: &str, lng: f64, lat: f64, telefono: Option<&str>) -> LocationMarker {
    LocationMarker {
        title: title.to_string(),
        lat,
        lng,
        encargado: "María López".to_string(),
        correo: "contacto@example.mx".to_string(),
        direccion: "Av. Universidad 100".to_string(),
        telefono: telefono.map(str::to_string),
    }
}

pub fn dataset() -> MarkerDataset {
    vec![
        record("Emsad Centro", -100.9733, 22.1505, Some("555-1234")),
        record("Clinica Norte", -100.4297, 22.6033, None),
        record("EMSAD Rioverde", -99.9945, 21.9300, None),
    ]
    .into()
}

pub fn directions(routes: &[&[LngLat]]) -> Arc<StaticDirections> {
    Arc::new(StaticDirections::new(
        routes
            .iter()
            .map(|coordinates| Ok(DirectionsResponse::from_coordinates(coordinates.to_vec())))
            .collect(),
    ))
}

/// Controller over a mounted headless surface, not yet initialized
pub fn mounted(directions: Arc<StaticDirections>) -> MapController<HeadlessEngine> {
    let mut controller = MapController::new(
        HeadlessEngine::new(),
        ControllerConfig::for_testing(),
        dataset(),
        directions,
    );
    controller.mount(Surface::new("map", 1024.0, 768.0));
    controller
}

/// Mounted, initialized and with the dataset drawn
pub fn ready(directions: Arc<StaticDirections>) -> MapController<HeadlessEngine> {
    let mut controller = mounted(directions);
    controller.restore_map_state().unwrap();
    controller
}

pub fn map(controller: &MapController<HeadlessEngine>) -> &HeadlessMap {
    controller.instance().expect("map instance")
}
