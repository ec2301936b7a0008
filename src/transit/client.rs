// client.rs
use crate::domain::TransitStation;
use crate::transit::StopPoint;
use crate::transit::TransitError;
use log::{debug, info};
use reqwest::blocking::Client;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;

const USER_AGENT: &str = concat!("accommodation_map/", env!("CARGO_PKG_VERSION"));

/// Suffixes dropped from station names, longest first.
const NAME_SUFFIXES: [&str; 2] = [" Underground Station", " Station"];

/// Inclusive box approximating central London.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }
}

pub const LONDON_BOUNDS: Bounds = Bounds {
    min_lat: 51.45,
    max_lat: 51.57,
    min_lon: -0.27,
    max_lon: 0.0044,
};

pub struct TransitClient {
    client: Client,
}

impl TransitClient {
    pub fn new(timeout: Duration) -> Result<Self, TransitError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| TransitError::Network(e.to_string()))?;

        Ok(Self { client })
    }

    /// Fetches every stop for the endpoint's mode and returns the cleaned,
    /// deduplicated stations inside [`LONDON_BOUNDS`].
    pub fn fetch(&self, endpoint: &str) -> Result<Vec<TransitStation>, TransitError> {
        debug!("Fetching stations from {endpoint}");

        let resp = self
            .client
            .get(endpoint)
            .send()
            .map_err(|e| TransitError::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| TransitError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(TransitError::Status(status.as_u16(), truncate(&text, 200)));
        }

        let stops = Self::extract_stop_points(&text)?;
        let fetched = stops.len();
        let stations = clean_stations(stops);
        info!(
            "Fetched {fetched} stop points, kept {} stations",
            stations.len()
        );
        Ok(stations)
    }

    fn extract_stop_points(body: &str) -> Result<Vec<StopPoint>, TransitError> {
        let data: Value =
            serde_json::from_str(body).map_err(|e| TransitError::Format(e.to_string()))?;

        let arr = data["stopPoints"]
            .as_array()
            .ok_or_else(|| TransitError::Format("stopPoints missing".to_string()))?;

        arr.iter()
            .map(|v| {
                serde_json::from_value(v.clone()).map_err(|e| TransitError::Format(e.to_string()))
            })
            .collect()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Drops " Underground Station" or " Station" from the end of a name.
pub fn strip_suffixes(name: &str) -> &str {
    NAME_SUFFIXES
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix))
        .unwrap_or(name)
}

/// Keeps stops inside [`LONDON_BOUNDS`], cleans their names and keeps the
/// first stop seen for each cleaned name.
pub fn clean_stations(stops: Vec<StopPoint>) -> Vec<TransitStation> {
    let mut seen = HashSet::new();

    stops
        .into_iter()
        .filter(|s| LONDON_BOUNDS.contains(s.lat, s.lon))
        .filter_map(|s| {
            let name = strip_suffixes(s.common_name.trim()).to_string();
            seen.insert(name.clone()).then(|| TransitStation {
                id: s.id,
                name,
                lat: s.lat,
                lon: s.lon,
            })
        })
        .collect()
}
