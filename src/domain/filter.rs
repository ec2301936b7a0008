// src/domain/filter.rs

use crate::domain::listing::{distinct_room_types, Listing};

/// The user's current choices in the two cascading multi-selects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub locations: Vec<String>,
    pub room_types: Vec<String>,
}

impl FilterSelection {
    pub fn new(locations: Vec<String>, room_types: Vec<String>) -> Self {
        Self {
            locations,
            room_types,
        }
    }

    /// Parses `location=..&room=..` pairs (keys may repeat) from a query string.
    pub fn from_query(query: &str) -> Self {
        let mut selection = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "location" => selection.locations.push(value.into_owned()),
                "room" => selection.room_types.push(value.into_owned()),
                _ => {}
            }
        }
        selection
    }

    pub fn to_query(&self) -> String {
        let mut ser = url::form_urlencoded::Serializer::new(String::new());
        for location in &self.locations {
            ser.append_pair("location", location);
        }
        for room in &self.room_types {
            ser.append_pair("room", room);
        }
        ser.finish()
    }
}

fn at_locations<'a: 'b, 'b>(
    all: &'a [Listing],
    locations: &'b [String],
) -> impl Iterator<Item = &'a Listing> + 'b {
    all.iter()
        .filter(move |l| locations.iter().any(|loc| *loc == l.location))
}

/// Room types offered in the second select.
///
/// Narrowed to the listings at the selected locations. When that subset is
/// empty (nothing selected, or nothing matches) the options fall back to the
/// room types of the full listing set.
pub fn room_type_options(all: &[Listing], selected_locations: &[String]) -> Vec<String> {
    let narrowed = distinct_room_types(at_locations(all, selected_locations));
    if narrowed.is_empty() {
        distinct_room_types(all)
    } else {
        narrowed
    }
}

/// Room types preselected after the location selection changes: everything
/// present at the selected locations, or nothing when that subset is empty.
pub fn default_room_types(all: &[Listing], selected_locations: &[String]) -> Vec<String> {
    distinct_room_types(at_locations(all, selected_locations))
}

/// Listings drawn on the map.
///
/// With no location selected every listing is visible and the room-type
/// selection is ignored. Otherwise a listing must match both a selected
/// location and a selected room type.
pub fn visible_listings<'a>(all: &'a [Listing], selection: &FilterSelection) -> Vec<&'a Listing> {
    if selection.locations.is_empty() {
        return all.iter().collect();
    }

    at_locations(all, &selection.locations)
        .filter(|l| selection.room_types.iter().any(|r| *r == l.room_type))
        .collect()
}
