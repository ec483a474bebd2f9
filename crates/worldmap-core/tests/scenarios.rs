// crates/worldmap-core/tests/scenarios.rs
//
// End-to-end runs through MapApp: events in, effects out.

use worldmap_core::manual;
use worldmap_core::prelude::*;
use worldmap_core::search::SearchPhase;

const BOUNDARIES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {"type": "Feature", "id": "FRA", "properties": {"name": "France"},
     "geometry": {"type": "MultiPolygon", "coordinates": [
        [[[-4.8, 42.3], [8.2, 42.3], [8.2, 51.1], [-4.8, 51.1], [-4.8, 42.3]]],
        [[[8.5, 41.4], [9.6, 41.4], [9.6, 43.0], [8.5, 43.0], [8.5, 41.4]]]
     ]}},
    {"type": "Feature", "id": "DEU", "properties": {"name": "Germany"},
     "geometry": {"type": "Polygon", "coordinates": [[[5.9, 47.3], [15.0, 47.3], [15.0, 55.1], [5.9, 55.1], [5.9, 47.3]]]}},
    {"type": "Feature", "id": "LUX", "properties": {"name": "Luxembourg"},
     "geometry": {"type": "Polygon", "coordinates": [[[5.7, 49.4], [6.5, 49.4], [6.5, 50.2], [5.7, 50.2], [5.7, 49.4]]]}},
    {"type": "Feature", "id": "XXX", "properties": {"name": "Broken"}, "geometry": null}
  ]
}"#;

const PARIS: &str = r#"[
  {"place_id": 1, "display_name": "Paris, Île-de-France, France métropolitaine, France",
   "lat": "48.8566", "lon": "2.3522",
   "address": {"city": "Paris", "country": "France", "country_code": "fr"}}
]"#;

fn app() -> MapApp {
    let mut app = MapApp::new(Config::default(), "map", &headless()).unwrap();
    app.take_effects();
    app
}

fn loaded_app() -> MapApp {
    let mut app = app();
    app.dispatch(AppEvent::BoundariesLoaded {
        body: BOUNDARIES.to_string(),
    });
    app
}

fn geocode_ticket(fx: &[Effect]) -> Option<Ticket> {
    fx.iter().find_map(|e| match e {
        Effect::Search(SearchEffect::Geocode { ticket, .. }) => Some(*ticket),
        _ => None,
    })
}

fn set_view(fx: &[Effect]) -> Option<(LatLng, f64)> {
    fx.iter().find_map(|e| match e {
        Effect::Map(MapCommand::SetView { center, zoom, .. }) => Some((*center, *zoom)),
        _ => None,
    })
}

fn last_status(fx: &[Effect]) -> Option<&str> {
    fx.iter().rev().find_map(|e| match e {
        Effect::Status(s) => Some(s.as_str()),
        _ => None,
    })
}

fn shown_rows(fx: &[Effect]) -> Option<Vec<String>> {
    fx.iter().find_map(|e| match e {
        Effect::Search(SearchEffect::ShowResults { items }) => {
            Some(items.iter().map(|r| r.label.clone()).collect())
        }
        _ => None,
    })
}

#[test]
fn singapore_by_localized_name() {
    let mut app = app();

    let fx = app.dispatch(AppEvent::SearchSubmit {
        input: "新加坡".into(),
    });
    assert_eq!(geocode_ticket(&fx), None);
    assert_eq!(shown_rows(&fx), Some(vec!["新加坡 (Singapore)".to_string()]));

    let fx = app.dispatch(AppEvent::SearchKey {
        key: SearchKey::Enter,
        input: "新加坡".into(),
    });
    assert_eq!(set_view(&fx), Some((LatLng::new(1.3521, 103.8198), 11.0)));
    assert_eq!(last_status(&fx), Some("新加坡 (Singapore)"));
    assert!(fx.contains(&Effect::Search(SearchEffect::SetInput {
        text: "新加坡 (Singapore)".into()
    })));
}

#[test]
fn paris_falls_back_to_geocoder_and_highlights_france() {
    let mut app = loaded_app();
    assert!(app.layer().boundaries_loaded());

    let fx = app.dispatch(AppEvent::SearchSubmit {
        input: "Paris".into(),
    });
    let ticket = geocode_ticket(&fx).expect("geocoder request");
    let url = fx
        .iter()
        .find_map(|e| match e {
            Effect::Search(SearchEffect::Geocode { url, .. }) => Some(url.clone()),
            _ => None,
        })
        .unwrap();
    assert!(url.contains("q=Paris"));
    assert!(url.contains("addressdetails=1"));

    let fx = app.dispatch(AppEvent::GeocodeResponse {
        ticket,
        body: PARIS.into(),
    });
    assert_eq!(shown_rows(&fx), Some(vec!["Paris".to_string()]));

    let fx = app.dispatch(AppEvent::SearchResultClicked { index: 0 });
    let paris = LatLng::new(48.8566, 2.3522);
    assert!(fx.contains(&Effect::Map(MapCommand::PlaceSearchMarker {
        at: paris,
        popup: "Paris".into()
    })));
    assert_eq!(set_view(&fx), Some((paris, 12.0)));
    assert!(!fx
        .iter()
        .any(|e| matches!(e, Effect::Map(MapCommand::FitBounds { .. }))));
    assert_eq!(last_status(&fx), Some("法国 (France)"));
    assert_eq!(app.stats().selected.as_deref(), Some("法国 (France)"));
    assert_eq!(app.search_marker(), Some(paris));
}

#[test]
fn picking_the_country_after_its_city_frames_it() {
    let mut app = loaded_app();
    let fx = app.dispatch(AppEvent::SearchSubmit {
        input: "Paris".into(),
    });
    let ticket = geocode_ticket(&fx).unwrap();
    app.dispatch(AppEvent::GeocodeResponse {
        ticket,
        body: PARIS.into(),
    });
    app.dispatch(AppEvent::SearchResultClicked { index: 0 });
    assert_eq!(app.viewport().view().zoom, 12.0);
    assert!(app.viewport().view().fitted.is_none());

    let fx = app.dispatch(AppEvent::SearchSubmit {
        input: "France".into(),
    });
    assert_eq!(shown_rows(&fx), Some(vec!["法国 (France)".to_string()]));
    let fx = app.dispatch(AppEvent::SearchResultClicked { index: 0 });
    assert!(fx
        .iter()
        .any(|e| matches!(e, Effect::Map(MapCommand::FitBounds { .. }))));
    assert_eq!(last_status(&fx), Some("法国 (France)"));
    assert!(app.viewport().view().fitted.is_some());
    assert_eq!(app.layer().selected_count(), 1);
}

#[test]
fn second_city_replaces_the_search_marker() {
    let mut app = loaded_app();
    for _ in 0..2 {
        let fx = app.dispatch(AppEvent::SearchSubmit {
            input: "Paris".into(),
        });
        let ticket = geocode_ticket(&fx).unwrap();
        app.dispatch(AppEvent::GeocodeResponse {
            ticket,
            body: PARIS.into(),
        });
        let fx = app.dispatch(AppEvent::SearchResultClicked { index: 0 });
        let removed = fx
            .iter()
            .filter(|e| matches!(e, Effect::Map(MapCommand::RemoveSearchMarker)))
            .count();
        let placed = fx
            .iter()
            .filter(|e| matches!(e, Effect::Map(MapCommand::PlaceSearchMarker { .. })))
            .count();
        assert!(removed <= 1);
        assert_eq!(placed, 1);
    }
}

#[test]
fn country_names_take_priority_over_cities() {
    let mut app = loaded_app();
    let fx = app.dispatch(AppEvent::SearchSubmit {
        input: "法国".into(),
    });
    assert_eq!(geocode_ticket(&fx), None);
    assert_eq!(shown_rows(&fx), Some(vec!["法国 (France)".to_string()]));
}

#[test]
fn only_the_newest_session_renders() {
    let mut app = loaded_app();
    let a = geocode_ticket(&app.dispatch(AppEvent::SearchSubmit {
        input: "Paris".into(),
    }))
    .unwrap();
    let fx = app.dispatch(AppEvent::SearchSubmit {
        input: "Lyon".into(),
    });
    assert!(fx.contains(&Effect::Search(SearchEffect::Abort { ticket: a })));
    let b = geocode_ticket(&fx).unwrap();

    // A's response arrives after B was issued
    let late = app.dispatch(AppEvent::GeocodeResponse {
        ticket: a,
        body: PARIS.into(),
    });
    assert!(late.is_empty());
    assert_eq!(app.search().phase(), SearchPhase::Searching);

    let fx = app.dispatch(AppEvent::GeocodeResponse {
        ticket: b,
        body: r#"[{"display_name": "Lyon, France", "lat": "45.76", "lon": "4.83"}]"#.into(),
    });
    assert_eq!(shown_rows(&fx), Some(vec!["Lyon".to_string()]));
}

#[test]
fn response_after_timeout_is_discarded() {
    let mut app = loaded_app();
    let fx = app.dispatch(AppEvent::SearchSubmit {
        input: "Paris".into(),
    });
    let ticket = geocode_ticket(&fx).unwrap();
    assert!(fx.contains(&Effect::Search(SearchEffect::StartTimer {
        ticket,
        after_ms: 3000
    })));

    // timer fires at 3000 ms, reply lands at 3001 ms
    let fx = app.dispatch(AppEvent::SearchTimeout { ticket });
    assert!(fx.contains(&Effect::Search(SearchEffect::ShowMessage {
        text: "请求超时，请重试".into(),
        tone: Tone::Error
    })));
    let late = app.dispatch(AppEvent::GeocodeResponse {
        ticket,
        body: PARIS.into(),
    });
    assert!(late.is_empty());
    assert_eq!(app.search().phase(), SearchPhase::TimedOut);
}

#[test]
fn clicks_keep_a_single_selection() {
    let mut app = loaded_app();
    let names = ["France", "Germany", "Luxembourg", "Malta", "Germany"];
    for name in names {
        let id = app.layer().find_by_name(name).unwrap();
        app.dispatch(AppEvent::Click { region: id });
        assert_eq!(app.layer().selected_count(), 1, "after {name}");
    }
    let de = app.layer().find_by_name("Germany").unwrap();
    assert!(app.dispatch(AppEvent::Click { region: de }).is_empty());
}

#[test]
fn luxembourg_is_covered_by_the_manual_entry() {
    let mut app = loaded_app();
    // The manual entry is registered before the boundary and wins the name.
    let fx = {
        app.select_by_name("Luxembourg").unwrap();
        app.take_effects()
    };
    assert_eq!(set_view(&fx), Some((LatLng::new(49.8153, 6.1296), 9.0)));
}

#[test]
fn small_boundaries_get_proxy_markers() {
    let mut app = app();
    let fx = app.dispatch(AppEvent::BoundariesLoaded {
        body: BOUNDARIES.to_string(),
    });
    // Luxembourg's box is 0.8 x 0.8 = 0.64, not small; nothing else is either.
    assert!(!fx
        .iter()
        .any(|e| matches!(e, Effect::Map(MapCommand::AddMarker { .. }))));
    assert!(fx.contains(&Effect::Map(MapCommand::RemoveBanner)));
    let stats = app.stats();
    assert_eq!(stats.boundary_regions, 3);
    assert_eq!(stats.manual_regions, manual::entries().len());
}

#[test]
fn every_manual_entry_round_trips() {
    let mut app = app();
    for entry in manual::entries() {
        app.select_by_name(entry.name).unwrap();
        let fx = app.take_effects();
        assert_eq!(
            set_view(&fx),
            Some((entry.center, f64::from(entry.zoom))),
            "{}",
            entry.name
        );
        assert_eq!(last_status(&fx), Some(entry.bilingual_label().as_str()));
    }
}

#[test]
fn boundary_names_before_load_report_loading() {
    let mut app = app();
    let fx = app.dispatch(AppEvent::SearchSubmit {
        input: "Germany".into(),
    });
    assert_eq!(shown_rows(&fx), Some(vec!["德国 (Germany)".to_string()]));
    let fx = app.dispatch(AppEvent::SearchResultClicked { index: 0 });
    assert_eq!(last_status(&fx), Some("正在加载数据... (德国)"));
    assert_eq!(app.selection().selected(), None);
}
