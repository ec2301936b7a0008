use crate::config::BRITISH_NATIONAL_GRID;
use crate::domain::listing::sample;
use crate::domain::{BoundaryPolygon, BoundarySet, Listing};
use crate::state::AppState;
use astra::Response;
use geo::{polygon, MultiPolygon};
use std::io::Read;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// A fresh output path so parallel tests never share a map file.
pub fn temp_output(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir()
        .join(format!("accommodation_map_{tag}_{nanos}"))
        .join("index.html")
}

pub fn test_listings() -> Vec<Listing> {
    vec![
        sample("Strand", "Single"),
        sample("Strand", "Ensuite"),
        sample("Waterloo", "Studio"),
        sample("Camden", "Single"),
    ]
}

fn test_boundaries() -> BoundarySet {
    BoundarySet {
        boroughs: vec![BoundaryPolygon {
            name: "Westminster".to_string(),
            geometry: MultiPolygon::new(vec![polygon![
                (x: 529_000.0, y: 179_000.0),
                (x: 531_000.0, y: 179_000.0),
                (x: 531_000.0, y: 181_000.0),
                (x: 529_000.0, y: 181_000.0),
                (x: 529_000.0, y: 179_000.0),
            ]]),
        }],
        zones: None,
        crs: BRITISH_NATIONAL_GRID.to_string(),
        notices: Vec::new(),
    }
}

/// State as the server would hold it after a clean startup, minus stations.
pub fn init_test_state(tag: &str) -> AppState {
    AppState::new(
        test_listings(),
        &test_boundaries(),
        None,
        Vec::new(),
        temp_output(tag),
    )
    .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}
