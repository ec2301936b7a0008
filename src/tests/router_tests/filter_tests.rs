use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, init_test_state};
use astra::Body;
use http::{Method, Request};
use scraper::{Html, Selector};

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn option_values(html: &str, select: &str) -> (Vec<String>, Vec<String>) {
    let doc = Html::parse_fragment(html);
    let options = Selector::parse(&format!("select[name='{select}'] option")).unwrap();

    let all = doc
        .select(&options)
        .filter_map(|o| o.value().attr("value").map(str::to_string))
        .collect();
    let selected = doc
        .select(&options)
        .filter(|o| o.value().attr("selected").is_some())
        .filter_map(|o| o.value().attr("value").map(str::to_string))
        .collect();
    (all, selected)
}

fn attr(html: &str, selector: &str, name: &str) -> Option<String> {
    let doc = Html::parse_fragment(html);
    let selector = Selector::parse(selector).unwrap();
    doc.select(&selector)
        .next()
        .and_then(|el| el.value().attr(name).map(str::to_string))
}

#[test]
fn home_page_lists_every_location_once() {
    let state = init_test_state("home");

    let resp = handle(get("/"), &state).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    let (locations, selected) = option_values(&body, "location");
    assert_eq!(locations, vec!["Strand", "Waterloo", "Camden"]);
    assert!(selected.is_empty());

    // Nothing selected: the room select falls back to every room type.
    let (rooms, _) = option_values(&body, "room");
    assert_eq!(rooms, vec!["Single", "Ensuite", "Studio"]);

    assert!(body.contains("Showing <strong>4</strong> of 4 listings"));
    assert!(body.contains(r#"src="/map?""#));
}

#[test]
fn home_page_keeps_the_selection_in_links() {
    let state = init_test_state("home_selection");

    let resp = handle(get("/?location=Strand&room=Single"), &state).unwrap();
    let body = body_string(resp);

    let (_, selected) = option_values(&body, "location");
    assert_eq!(selected, vec!["Strand"]);

    let (rooms, selected_rooms) = option_values(&body, "room");
    assert_eq!(rooms, vec!["Single", "Ensuite"]);
    assert_eq!(selected_rooms, vec!["Single"]);

    assert!(body.contains("Showing <strong>1</strong> of 4 listings"));
    assert!(body.contains("/map?location=Strand&amp;room=Single"));
    assert!(body.contains("/export?location=Strand&amp;room=Single"));
}

#[test]
fn room_fragment_narrows_and_preselects() {
    let state = init_test_state("rooms");

    let resp = handle(get("/filters/rooms?location=Strand&location=Camden"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    // A partial, so htmx can swap it straight in.
    assert!(!body.contains("<html"));
    assert!(body.contains(r#"id="room-filter""#));

    let (rooms, selected) = option_values(&body, "room");
    assert_eq!(rooms, vec!["Single", "Ensuite"]);
    assert_eq!(selected, vec!["Single", "Ensuite"]);
}

#[test]
fn every_select_change_refreshes_the_map() {
    let state = init_test_state("wiring");

    let body = body_string(handle(get("/"), &state).unwrap());

    assert_eq!(
        attr(&body, "select[name='location']", "hx-get").as_deref(),
        Some("/filters/rooms")
    );
    assert_eq!(
        attr(&body, "select[name='room']", "hx-get").as_deref(),
        Some("/filters/map")
    );
    assert_eq!(
        attr(&body, "select[name='room']", "hx-target").as_deref(),
        Some("#map-panel")
    );
    assert_eq!(
        attr(&body, "#map-panel iframe#map", "src").as_deref(),
        Some("/map?")
    );
}

#[test]
fn location_change_brings_a_fresh_map_panel_out_of_band() {
    let state = init_test_state("rooms_panel");

    let resp = handle(get("/filters/rooms?location=Strand&location=Camden"), &state).unwrap();
    let body = body_string(resp);

    assert_eq!(
        attr(&body, "#map-panel", "hx-swap-oob").as_deref(),
        Some("true")
    );
    assert_eq!(
        attr(&body, "#map-panel iframe#map", "src").as_deref(),
        Some("/map?location=Strand&location=Camden&room=Single&room=Ensuite")
    );
    assert!(body.contains("Showing <strong>3</strong> of 4 listings"));
}

#[test]
fn room_change_swaps_in_a_map_panel() {
    let state = init_test_state("map_panel");

    let resp = handle(get("/filters/map?location=Strand&room=Ensuite"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(!body.contains("<html"));
    assert_eq!(attr(&body, "#map-panel", "hx-swap-oob"), None);
    assert_eq!(
        attr(&body, "#map-panel iframe#map", "src").as_deref(),
        Some("/map?location=Strand&room=Ensuite")
    );
    assert_eq!(
        attr(&body, "#map-panel a", "href").as_deref(),
        Some("/export?location=Strand&room=Ensuite")
    );
    assert!(body.contains("Showing <strong>1</strong> of 4 listings"));
}

#[test]
fn room_fragment_for_no_match_offers_everything_preselects_nothing() {
    let state = init_test_state("rooms_none");

    let resp = handle(get("/filters/rooms?location=Atlantis"), &state).unwrap();
    let (rooms, selected) = option_values(&body_string(resp), "room");

    assert_eq!(rooms, vec!["Single", "Ensuite", "Studio"]);
    assert!(selected.is_empty());
}

#[test]
fn unknown_route_is_not_found() {
    let state = init_test_state("missing");

    let result = handle(get("/nope"), &state);
    assert!(matches!(result, Err(ServerError::NotFound)));

    let resp = crate::templates::html_error_response(ServerError::NotFound);
    assert_eq!(resp.status(), 404);
}

#[test]
fn known_route_with_wrong_method_is_a_bad_request() {
    let state = init_test_state("method");

    let req = Request::builder()
        .method(Method::POST)
        .uri("/map")
        .body(Body::empty())
        .unwrap();

    match handle(req, &state) {
        Err(ServerError::BadRequest(msg)) => assert_eq!(msg, "POST is not supported on /map"),
        other => panic!("expected a bad request, got {:?}", other.map(|r| r.status())),
    }
}
