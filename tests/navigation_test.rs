mod common;

use common::*;
use mapview::prelude::*;

#[cfg(test)]
mod navigation_tests {
    use super::*;

    fn with_provider(provider: FixedGeolocation) -> MapController<HeadlessEngine> {
        ready(directions(&[ROUTE_A])).with_geolocation(Arc::new(provider))
    }

    /// Jumping to a search result centers at zoom 15 and clears the query
    #[test]
    fn test_zoom_to_location() {
        let mut controller = ready(directions(&[ROUTE_A]));
        controller.set_search_query("emsad");
        assert_eq!(controller.found_markers().len(), 2);

        assert!(controller.zoom_to_location(-100.5, 22.2).unwrap());

        let camera = controller.camera().unwrap();
        assert_eq!(camera.center_lng_lat(), [-100.5, 22.2]);
        assert_eq!(camera.zoom, 15.0);
        assert_eq!(controller.search_query(), "");
        assert!(controller.found_markers().is_empty());

        let last = *map(&controller).fly_history().last().unwrap();
        assert!(last.essential);
    }

    /// The dataset pins stay; only the search pin is added
    #[test]
    fn test_zoom_to_location_keeps_dataset_pins() {
        let mut controller = ready(directions(&[ROUTE_A]));
        controller.zoom_to_location(-100.5, 22.2).unwrap();
        controller.zoom_to_location(-100.6, 22.3).unwrap();

        let markers = map(&controller).markers();
        assert_eq!(markers.len(), 4);
        assert_eq!(markers[3].position().to_lng_lat(), [-100.6, 22.3]);
        assert_eq!(markers[3].color(), "#FF5733");
        assert_eq!(controller.engine().instances_created(), 1);
    }

    /// A position fix flies the camera there at zoom 10
    #[tokio::test]
    async fn test_geolocation_success() {
        let mut controller = with_provider(FixedGeolocation::at(-99.1, 19.4));

        let outcome = controller.set_location_zoom(true).await.unwrap();

        let camera = controller.camera().unwrap();
        assert_eq!(camera.center_lng_lat(), [-99.1, 19.4]);
        assert_eq!(camera.zoom, 10.0);
        assert_eq!(outcome, LocationOutcome::Moved(camera));
        assert!(controller.last_location_error().is_none());
    }

    /// A provider slower than the timeout leaves the camera alone
    #[cfg(feature = "tokio-runtime")]
    #[tokio::test(start_paused = true)]
    async fn test_geolocation_timeout() {
        let mut controller = with_provider(
            FixedGeolocation::at(-99.1, 19.4).with_delay(Duration::from_secs(60)),
        );
        let before = controller.camera();
        let flights = map(&controller).fly_history().len();

        let outcome = controller.set_location_zoom(true).await.unwrap();

        assert_eq!(outcome, LocationOutcome::Failed(GeolocationError::Timeout(200)));
        assert_eq!(controller.camera(), before);
        assert_eq!(map(&controller).fly_history().len(), flights);
        assert_eq!(
            controller.last_location_error(),
            Some(&GeolocationError::Timeout(200))
        );
        assert!(controller.is_location_zoom());
    }

    /// Denied permission is reported, not raised
    #[tokio::test]
    async fn test_geolocation_denied() {
        let mut controller = with_provider(FixedGeolocation::failing(GeolocationError::PermissionDenied));
        let before = controller.camera();

        let outcome = controller.set_location_zoom(true).await;

        assert!(matches!(
            outcome,
            Ok(LocationOutcome::Failed(GeolocationError::PermissionDenied))
        ));
        assert_eq!(controller.camera(), before);
    }

    /// Toggling off and on again asks for a fresh position
    #[tokio::test]
    async fn test_geolocation_retry_after_toggle() {
        let mut controller = with_provider(FixedGeolocation::at(-99.1, 19.4));

        controller.set_location_zoom(true).await.unwrap();
        controller.set_location_zoom(false).await.unwrap();
        controller.zoom_to_location(-100.5, 22.2).unwrap();
        controller.set_location_zoom(true).await.unwrap();

        assert_eq!(controller.camera().unwrap().center_lng_lat(), [-99.1, 19.4]);
    }

    /// Only the newest position request moves the camera
    #[tokio::test]
    async fn test_overtaken_position_request() {
        let mut controller = with_provider(FixedGeolocation::at(-99.1, 19.4));

        let first = controller.begin_locate(true).unwrap();
        controller.begin_locate(false);
        let second = controller.begin_locate(true).unwrap();
        // searching while the device answers
        controller.set_search_query("norte");
        let (a, b) = futures::join!(first.send(), second.send());

        assert_eq!(
            controller.apply_position(first.ticket(), a).unwrap(),
            LocationOutcome::Superseded
        );
        assert!(matches!(
            controller.apply_position(second.ticket(), b).unwrap(),
            LocationOutcome::Moved(_)
        ));
        assert_eq!(controller.camera().unwrap().center_lng_lat(), [-99.1, 19.4]);
        assert_eq!(controller.found_markers().len(), 1);
    }

    /// With the location zoom on, a rebuilt view does not fly to the default
    #[tokio::test]
    async fn test_initialize_respects_location_zoom() {
        let mut controller = with_provider(FixedGeolocation::at(-99.1, 19.4));
        controller.set_location_zoom(true).await.unwrap();

        controller.initialize_map().unwrap();

        assert!(map(&controller).fly_history().is_empty());
        assert_eq!(controller.camera().unwrap().zoom, 1.0);
    }
}
