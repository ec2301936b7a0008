use crate::domain::Coordinate;
use geojson::FeatureCollection;
use serde::Serialize;

/// Everything the browser needs to draw one map: the view, then the layers
/// in drawing order.
#[derive(Debug, Clone, Serialize)]
pub struct MapArtifact {
    pub center: Coordinate,
    pub zoom: u8,
    pub layers: Vec<Layer>,
    /// Show the overlay on/off control.
    pub layer_control: bool,
    /// Fan out overlapping markers on click.
    pub spiderfy: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layer {
    Outline {
        name: String,
        style: OutlineStyle,
        features: FeatureCollection,
    },
    Markers {
        name: String,
        markers: Vec<Marker>,
    },
}

// Lookups for assertions; the browser walks the layers itself.
#[cfg(test)]
impl Layer {
    pub fn name(&self) -> &str {
        match self {
            Layer::Outline { name, .. } | Layer::Markers { name, .. } => name,
        }
    }

    pub fn markers(&self) -> &[Marker] {
        match self {
            Layer::Markers { markers, .. } => markers,
            Layer::Outline { .. } => &[],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OutlineStyle {
    pub color: String,
    pub weight: u8,
    pub fill: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub position: Coordinate,
    pub tooltip: String,
    pub popup: Option<Popup>,
    pub icon: MarkerIcon,
}

#[derive(Debug, Clone, Serialize)]
pub struct Popup {
    /// Already escaped HTML.
    pub html: String,
    pub max_width: u32,
}

/// A Leaflet.awesome-markers icon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerIcon {
    pub color: String,
    pub icon: String,
    /// `glyphicon` or `fa`
    pub prefix: String,
}

impl MarkerIcon {
    pub fn new(color: &str, icon: &str, prefix: &str) -> Self {
        Self {
            color: color.to_string(),
            icon: icon.to_string(),
            prefix: prefix.to_string(),
        }
    }
}

#[cfg(test)]
impl MapArtifact {
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name() == name)
    }
}
