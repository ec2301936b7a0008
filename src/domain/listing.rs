use serde::Serialize;

/// A latitude/longitude pair in degrees (EPSG:4326).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    // Key (not unique, several listings share a key)
    pub accommodation_type: String,
    pub location: String,

    pub distance_to_campus: String,
    pub room_type: String,
    pub cost_per_week: String,
    pub details: String,
    pub coordinates: Coordinate,
    pub site_url: String,
}

impl Listing {
    pub fn key(&self) -> (&str, &str) {
        (&self.accommodation_type, &self.location)
    }

    /// Plain-text hover summary shown on the listing marker.
    pub fn tooltip(&self) -> String {
        format!("Location: {} Room Type: {}", self.location, self.room_type)
    }
}

/// Distinct `Location` values in order of first appearance.
pub fn distinct_locations(listings: &[Listing]) -> Vec<String> {
    distinct_by(listings.iter(), |l| &l.location)
}

/// Distinct room types in order of first appearance.
pub fn distinct_room_types<'a, I>(listings: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Listing>,
{
    distinct_by(listings.into_iter(), |l| &l.room_type)
}

fn distinct_by<'a, I, F>(listings: I, field: F) -> Vec<String>
where
    I: Iterator<Item = &'a Listing>,
    F: Fn(&'a Listing) -> &'a String,
{
    let mut out: Vec<String> = Vec::new();
    for listing in listings {
        let value = field(listing);
        if !out.iter().any(|seen| seen == value) {
            out.push(value.clone());
        }
    }
    out
}

#[cfg(test)]
pub(crate) fn sample(location: &str, room_type: &str) -> Listing {
    Listing {
        accommodation_type: "Halls".to_string(),
        location: location.to_string(),
        distance_to_campus: "10 min walk".to_string(),
        room_type: room_type.to_string(),
        cost_per_week: "250".to_string(),
        details: "Bills included".to_string(),
        coordinates: Coordinate::new(51.51, -0.11),
        site_url: "https://example.com".to_string(),
    }
}
