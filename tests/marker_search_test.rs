mod common;

use common::*;
use mapview::prelude::*;

#[cfg(test)]
mod marker_search_tests {
    use super::*;

    fn titles(markers: Vec<&LocationMarker>) -> Vec<String> {
        markers.into_iter().map(|m| m.title.clone()).collect()
    }

    /// Only the highlighted organisation gets the distinguishing color
    #[test]
    fn test_highlight_color_by_title() {
        let mut controller = mounted(directions(&[ROUTE_A]));
        controller.initialize_map().unwrap();
        controller.add_markers();

        let colors: Vec<(String, String)> = map(&controller)
            .markers()
            .into_iter()
            .map(|m| (format!("{:?}", m.position().to_lng_lat()), m.color().to_string()))
            .collect();
        assert_eq!(
            colors,
            vec![
                ("[-100.9733, 22.1505]".to_string(), "#FF5733".to_string()),
                ("[-100.4297, 22.6033]".to_string(), "#3887be".to_string()),
                // title match is case-sensitive
                ("[-99.9945, 21.93]".to_string(), "#3887be".to_string()),
            ]
        );
    }

    /// The highlight rule comes from the palette
    #[test]
    fn test_palette_is_configurable() {
        let mut config = ControllerConfig::for_testing();
        config.markers.highlight = HighlightRule::TitleContains("Clinica".to_string());
        config.markers.highlight_color = "#00AA00".to_string();
        let mut controller =
            MapController::new(HeadlessEngine::new(), config, dataset(), directions(&[ROUTE_A]));
        controller.mount(Surface::new("map", 1024.0, 768.0));
        controller.restore_map_state().unwrap();

        let colors: Vec<&str> = map(&controller).markers().iter().map(|m| m.color()).collect();
        assert_eq!(colors, vec!["#3887be", "#00AA00", "#3887be"]);
    }

    /// The phone section appears only for markers with a phone
    #[test]
    fn test_popup_phone_section() {
        let with_phone = render_popup(&record("Emsad Centro", -100.9, 22.1, Some("555-1234")));
        let without_phone = render_popup(&record("Clinica Norte", -100.4, 22.6, None));

        assert!(with_phone.contains(r#"href="tel:555-1234""#));
        assert!(!without_phone.contains("tel:"));
        for html in [&with_phone, &without_phone] {
            assert!(html.contains(r#"href="mailto:contacto@example.mx""#));
            assert!(html.contains("María López"));
            assert!(html.contains("Av. Universidad 100"));
        }
    }

    /// Popups use the configured labels
    #[test]
    fn test_popup_labels_from_config() {
        let mut config = ControllerConfig::for_testing();
        config.popup.responsible = "Manager".to_string();
        let mut controller =
            MapController::new(HeadlessEngine::new(), config, dataset(), directions(&[ROUTE_A]));
        controller.mount(Surface::new("map", 1024.0, 768.0));
        controller.restore_map_state().unwrap();

        let popup = map(&controller).markers()[0].popup_html().unwrap().to_string();
        assert!(popup.contains("Manager"));
        assert!(!popup.contains("Encargado"));
    }

    /// Search is a case-insensitive substring match over titles
    #[test]
    fn test_search_filter() {
        let data = dataset();

        assert!(filtered_markers(&data, "").is_empty());
        assert!(filtered_markers(&data, "hospital").is_empty());
        assert_eq!(
            titles(filtered_markers(&data, "emsad")),
            vec!["Emsad Centro", "EMSAD Rioverde"]
        );

        for query in ["e", "NORTE", "rio", "Centro", "x"] {
            let expected: Vec<String> = data
                .iter()
                .filter(|m| m.title.to_lowercase().contains(&query.to_lowercase()))
                .map(|m| m.title.clone())
                .collect();
            assert_eq!(titles(filtered_markers(&data, query)), expected, "query {}", query);
        }
    }

    /// The controller's found markers follow its query
    #[test]
    fn test_found_markers_track_query() {
        let mut controller = mounted(directions(&[ROUTE_A]));
        assert!(controller.found_markers().is_empty());

        controller.set_search_query("Norte");
        assert_eq!(titles(controller.found_markers()), vec!["Clinica Norte"]);

        controller.set_search_query("");
        assert!(controller.found_markers().is_empty());
        assert_eq!(controller.dataset().len(), 3);
    }

    /// Datasets load from JSON files
    #[test]
    fn test_dataset_from_file() {
        let path = std::env::temp_dir().join(format!("mapview-markers-{}.json", std::process::id()));
        std::fs::write(
            &path,
            serde_json::to_string(dataset().as_slice()).unwrap(),
        )
        .unwrap();

        let loaded = MarkerDataset::from_path(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, dataset());
    }
}
