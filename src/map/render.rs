// map/render.rs

use crate::config::WGS84;
use crate::domain::{BoundaryPolygon, BoundarySet, Coordinate, Listing, TransitStation};
use crate::errors::RenderError;
use crate::map::artifact::{Layer, MapArtifact, Marker, MarkerIcon, OutlineStyle, Popup};
use crate::projection::Projection;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject};
use log::debug;
use maud::html;
use serde_json::Value as JsonValue;

pub const MAP_CENTER: Coordinate = Coordinate::new(51.50161, -0.07625);
pub const MAP_ZOOM: u8 = 12;

pub const CAMPUS_NAME: &str = "King's Strand Campus";
pub const CAMPUS_LOCATION: Coordinate = Coordinate::new(51.51161, -0.11625);

pub const BOROUGH_LAYER: &str = "Borough Boundaries";
pub const ZONE_LAYER: &str = "Fare Zones";
pub const CAMPUS_LAYER: &str = "Campus";
pub const LISTING_LAYER: &str = "Accommodation";
pub const STATION_LAYER: &str = "Tube Stations";

const POPUP_MAX_WIDTH: u32 = 2650;

/// Borough and zone outlines, projected to WGS84 and turned into GeoJSON.
///
/// Boundaries never change after load, so this is built once and every
/// render clones the layers.
#[derive(Debug, Clone)]
pub struct OutlineLayers {
    boroughs: Layer,
    zones: Option<Layer>,
}

impl OutlineLayers {
    pub fn from_boundaries(boundaries: &BoundarySet) -> Result<Self, RenderError> {
        let to_wgs84 = if boundaries.crs == WGS84 {
            None
        } else {
            Some(Projection::new(&boundaries.crs, WGS84).map_err(RenderError::Projection)?)
        };

        let boroughs = outline_layer(
            BOROUGH_LAYER,
            "blue",
            &boundaries.boroughs,
            to_wgs84.as_ref(),
        )?;
        let zones = boundaries
            .zones
            .as_deref()
            .map(|zones| outline_layer(ZONE_LAYER, "green", zones, to_wgs84.as_ref()))
            .transpose()?;

        Ok(Self { boroughs, zones })
    }
}

/// Composes the map for one filter state.
///
/// `listings` is the already filtered, visible subset. Passing `stations`
/// adds the station layer; the layer control appears once there is more
/// than the borough layer to toggle.
pub fn render(
    outlines: &OutlineLayers,
    listings: &[&Listing],
    stations: Option<&[TransitStation]>,
) -> MapArtifact {
    let mut layers = vec![outlines.boroughs.clone()];
    layers.extend(outlines.zones.clone());

    layers.push(Layer::Markers {
        name: CAMPUS_LAYER.to_string(),
        markers: vec![Marker {
            position: CAMPUS_LOCATION,
            tooltip: escaped(CAMPUS_NAME),
            popup: Some(Popup {
                html: escaped(CAMPUS_NAME),
                max_width: POPUP_MAX_WIDTH,
            }),
            icon: MarkerIcon::new("red", "info-sign", "glyphicon"),
        }],
    });

    layers.push(Layer::Markers {
        name: LISTING_LAYER.to_string(),
        markers: listings.iter().map(|l| listing_marker(l)).collect(),
    });

    if let Some(stations) = stations {
        layers.push(Layer::Markers {
            name: STATION_LAYER.to_string(),
            markers: stations.iter().map(station_marker).collect(),
        });
    }

    debug!(
        "Rendered map with {} layers and {} listings",
        layers.len(),
        listings.len()
    );

    MapArtifact {
        center: MAP_CENTER,
        zoom: MAP_ZOOM,
        layers,
        layer_control: outlines.zones.is_some() || stations.is_some(),
        spiderfy: true,
    }
}

/// Leaflet treats tooltip and popup strings as HTML.
fn escaped(text: &str) -> String {
    html! { (text) }.into_string()
}

fn outline_layer(
    name: &str,
    color: &str,
    boundaries: &[BoundaryPolygon],
    to_wgs84: Option<&Projection>,
) -> Result<Layer, RenderError> {
    let features = boundaries
        .iter()
        .map(|b| {
            let geometry = match to_wgs84 {
                Some(projection) => projection
                    .project(&b.geometry)
                    .map_err(|e| RenderError::Projection(format!("{}: {e}", b.name)))?,
                None => b.geometry.clone(),
            };

            let mut properties = JsonObject::new();
            properties.insert("name".to_string(), JsonValue::from(b.name.clone()));
            properties.insert("tooltip".to_string(), JsonValue::from(escaped(&b.name)));

            Ok(Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(&geometry))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            })
        })
        .collect::<Result<Vec<_>, RenderError>>()?;

    Ok(Layer::Outline {
        name: name.to_string(),
        style: OutlineStyle {
            color: color.to_string(),
            weight: 2,
            fill: false,
        },
        features: FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        },
    })
}

fn listing_marker(listing: &Listing) -> Marker {
    let popup = html! {
        div style="width: 200px; height: 200px; overflow: auto;" {
            h3 { (listing.location) }
            ul {
                li { "Distance: " (listing.distance_to_campus) }
                li { "Room Type: " (listing.room_type) }
                li { "Cost(per week): " (listing.cost_per_week) }
                li { "Details: " (listing.details) }
                li { a href=(listing.site_url) target="_blank" rel="noopener" { "site" } }
            }
        }
    };

    Marker {
        position: listing.coordinates,
        tooltip: escaped(&listing.tooltip()),
        popup: Some(Popup {
            html: popup.into_string(),
            max_width: POPUP_MAX_WIDTH,
        }),
        icon: MarkerIcon::new("blue", "home", "glyphicon"),
    }
}

fn station_marker(station: &TransitStation) -> Marker {
    Marker {
        position: Coordinate::new(station.lat, station.lon),
        tooltip: escaped(&station.name),
        popup: Some(Popup {
            html: escaped(&station.name),
            max_width: POPUP_MAX_WIDTH,
        }),
        icon: MarkerIcon::new("darkblue", "train", "fa"),
    }
}
