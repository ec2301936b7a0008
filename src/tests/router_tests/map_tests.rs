use crate::router::handle;
use crate::tests::utils::{body_string, init_test_state};
use astra::Body;
use http::{Method, Request};
use std::fs;

fn get_map(query: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(format!("/map?{query}"))
        .body(Body::empty())
        .unwrap()
}

fn map_data(page: &str) -> serde_json::Value {
    let start = page.find("const mapData = ").unwrap() + "const mapData = ".len();
    let end = start + page[start..].find(";\n").unwrap_or_else(|| page[start..].find(';').unwrap());
    serde_json::from_str(&page[start..end]).unwrap()
}

fn listing_count(data: &serde_json::Value) -> usize {
    data["layers"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["name"] == "Accommodation")
        .unwrap()["markers"]
        .as_array()
        .unwrap()
        .len()
}

#[test]
fn map_is_rendered_and_persisted() {
    let state = init_test_state("map");

    let resp = handle(get_map(""), &state).expect("Failed to render map");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    let on_disk = fs::read_to_string(&state.output_path).unwrap();
    assert_eq!(body, on_disk);

    let data = map_data(&body);
    assert_eq!(data["zoom"], 12);
    assert_eq!(listing_count(&data), 4);
}

#[test]
fn each_filter_change_overwrites_the_saved_map() {
    let state = init_test_state("map_overwrite");

    handle(get_map(""), &state).unwrap();
    handle(get_map("location=Strand&room=Ensuite"), &state).unwrap();

    let on_disk = fs::read_to_string(&state.output_path).unwrap();
    assert_eq!(listing_count(&map_data(&on_disk)), 1);
}

#[test]
fn locations_without_rooms_show_no_listings() {
    let state = init_test_state("map_empty");

    let body = body_string(handle(get_map("location=Waterloo"), &state).unwrap());
    assert_eq!(listing_count(&map_data(&body)), 0);
}
