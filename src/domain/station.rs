use serde::Serialize;

/// A public-transport stop, cleaned and deduplicated by the transit client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitStation {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}
