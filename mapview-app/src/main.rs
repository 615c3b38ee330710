use anyhow::Context;
use mapview::{
    ControllerConfig, HeadlessEngine, MapController, MarkerDataset, ReadyState, RouteStatus,
    Surface,
};

/// Headless walk through the map screen:
/// `mapview-app [markers.json] [config.json]`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mapview::init_logging();

    let mut args = std::env::args().skip(1);
    let dataset_path = args
        .next()
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/data/markers.json").to_string());
    let config = match args.next() {
        Some(path) => ControllerConfig::from_path(&path)
            .with_context(|| format!("loading config from {}", path))?,
        None => ControllerConfig::default(),
    }
    .with_env_overrides();

    let dataset = MarkerDataset::from_path(&dataset_path)
        .with_context(|| format!("loading markers from {}", dataset_path))?;
    let has_token = config.directions.access_token.is_some();

    let mut controller = MapController::with_mapbox(HeadlessEngine::new(), config, dataset);
    controller.mount(Surface::new("map", 1200.0, 800.0));

    let generation = controller
        .restore_map_state()?
        .context("surface was mounted but no map was created")?;
    if controller.state() != ReadyState::Ready {
        log::warn!("map {} is still {}", generation, controller.state());
    }
    if let Some(map) = controller.instance() {
        println!(
            "map {}: {} markers, layers {:?}",
            generation,
            map.markers().len(),
            map.layer_manager().list_layers()
        );
    }

    controller.set_search_query("emsad");
    let found: Vec<(String, f64, f64)> = controller
        .found_markers()
        .into_iter()
        .map(|m| (m.title.clone(), m.lng, m.lat))
        .collect();
    println!("search '{}': {} results", controller.search_query(), found.len());
    for (title, lng, lat) in &found {
        println!("  {} [{}, {}]", title, lng, lat);
    }

    if let Some((title, lng, lat)) = found.first() {
        controller.zoom_to_location(*lng, *lat)?;
        if let Some(camera) = controller.camera() {
            println!(
                "zoomed to {}: center {:?} zoom {}",
                title,
                camera.center_lng_lat(),
                camera.zoom
            );
        }
    }

    if has_token {
        match controller.get_route().await {
            Ok(RouteStatus::Rendered(summary)) | Ok(RouteStatus::Updated(summary)) => println!(
                "route drawn: {} points, {:.1} km",
                summary.points,
                summary.length_km()
            ),
            Ok(status) => println!("route not drawn: {:?}", status),
            Err(e) => log::error!("route failed: {}", e),
        }
    } else {
        log::info!("no MAPBOX_ACCESS_TOKEN or VITE_API_KEY set, skipping route");
    }

    controller.unmount();
    Ok(())
}
