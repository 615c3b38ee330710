mod common;

use common::*;
use mapview::prelude::*;

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    fn unmounted() -> MapController<HeadlessEngine> {
        MapController::new(
            HeadlessEngine::new(),
            ControllerConfig::for_testing(),
            dataset(),
            directions(&[ROUTE_A]),
        )
        .with_geolocation(Arc::new(FixedGeolocation::at(-99.1, 19.4)))
    }

    /// Without a surface every operation is a quiet no-op
    #[tokio::test]
    async fn test_operations_without_surface() {
        let mut controller = unmounted();
        controller.set_search_query("emsad");

        assert_eq!(controller.initialize_map().unwrap(), None);
        assert_eq!(controller.restore_map_state().unwrap(), None);
        assert_eq!(controller.add_markers(), 0);
        assert!(!controller.zoom_to_location(-100.5, 22.2).unwrap());
        assert_eq!(controller.get_route().await, Ok(RouteStatus::Skipped));
        assert_eq!(
            controller.set_location_zoom(true).await.unwrap(),
            LocationOutcome::Skipped
        );
        assert!(controller.process_events().unwrap().is_empty());

        assert_eq!(controller.search_query(), "emsad");
        assert_eq!(controller.engine().instances_created(), 0);
        assert!(controller.camera().is_none());
        assert_eq!(controller.state(), ReadyState::Uninitialized);
    }

    /// Mount, load, unmount, remount
    #[tokio::test]
    async fn test_mount_cycle() {
        let mut controller = unmounted();
        controller.mount(Surface::new("map", 1024.0, 768.0));

        let first = controller.restore_map_state().unwrap().unwrap();
        assert_eq!(controller.state(), ReadyState::Ready);
        assert_eq!(map(&controller).markers().len(), 3);
        controller.get_route().await.unwrap();

        let surface = controller.unmount().unwrap();
        assert_eq!(controller.engine().live_instances(), 0);
        assert!(controller.generation() > first);
        assert!(controller.route_summary().is_none());

        controller.mount(surface);
        let second = controller.restore_map_state().unwrap().unwrap();
        assert!(second > first);
        assert_eq!(map(&controller).markers().len(), 3);
        assert!(!map(&controller).has_source("route"));
        assert!(map(&controller).has_layer("point"));
    }

    /// A route in flight across an unmount is dropped
    #[tokio::test]
    async fn test_route_across_unmount() {
        let mut controller = unmounted();
        controller.mount(Surface::new("map", 1024.0, 768.0));
        controller.restore_map_state().unwrap();

        let request = controller.begin_route().unwrap();
        let surface = controller.unmount().unwrap();
        let result = request.send().await;
        controller.mount(surface);
        controller.restore_map_state().unwrap();

        assert_eq!(
            controller.apply_route(request.ticket(), result),
            Ok(RouteStatus::Superseded)
        );
        assert!(!map(&controller).has_source("route"));
    }

    /// Instances that load asynchronously get the origin layer once ready
    #[test]
    fn test_deferred_style_load() {
        let mut controller = MapController::new(
            HeadlessEngine::new().with_deferred_style_load(),
            ControllerConfig::for_testing(),
            dataset(),
            directions(&[ROUTE_A]),
        );
        controller.mount(Surface::new("map", 1024.0, 768.0));
        controller.restore_map_state().unwrap();

        assert_eq!(controller.state(), ReadyState::Loading);
        assert!(!map(&controller).has_layer("point"));
        // pins do not wait for the style
        assert_eq!(map(&controller).markers().len(), 3);

        controller.instance_mut().unwrap().finish_style_load();
        let events = controller.process_events().unwrap();

        // the origin layer raised by StyleLoaded comes back in the same batch
        let style_at = events.iter().position(|e| *e == MapEvent::StyleLoaded).unwrap();
        let layer_at = events
            .iter()
            .position(|e| {
                *e == MapEvent::LayerAdded {
                    layer_id: "point".to_string(),
                }
            })
            .unwrap();
        assert!(style_at < layer_at);
        assert_eq!(controller.state(), ReadyState::Ready);
        assert!(map(&controller).has_layer("point"));
        assert!(controller.process_events().unwrap().is_empty());
    }

    /// The view opens at zoom 1 with a navigation control and flies to San Luis Potosí
    #[test]
    fn test_initial_view() {
        let mut controller = unmounted();
        controller.mount(Surface::new("map", 1024.0, 768.0));
        controller.initialize_map().unwrap();

        let map = map(&controller);
        assert_eq!(map.options().container, "map");
        assert_eq!(map.options().zoom, 1.0);
        assert_eq!(map.controls().len(), 1);
        assert_eq!(
            map.fly_history(),
            &[FlyTo::new(LatLng::new(22.603333, -100.429722), 6.7)]
        );
    }

    /// Configuration loads from JSON with defaults for the rest
    #[test]
    fn test_config_from_json() {
        let config = ControllerConfig::from_json_str(
            r#"{ "view": { "navigation_control": false, "default_zoom": 8.0 } }"#,
        )
        .unwrap();
        let mut controller =
            MapController::new(HeadlessEngine::new(), config, dataset(), directions(&[ROUTE_A]));
        controller.mount(Surface::new("map", 1024.0, 768.0));
        controller.initialize_map().unwrap();

        assert!(map(&controller).controls().is_empty());
        assert_eq!(controller.camera().unwrap().zoom, 8.0);
    }
}
