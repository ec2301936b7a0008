// map/document.rs
//
// Turns a `MapArtifact` into a self-contained Leaflet page and writes it out.

use crate::errors::RenderError;
use crate::map::artifact::MapArtifact;
use log::info;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::fs;
use std::path::Path;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const AWESOME_MARKERS_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.css";
const AWESOME_MARKERS_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.js";
const GLYPHICONS_CSS: &str =
    "https://netdna.bootstrapcdn.com/bootstrap/3.0.0/css/bootstrap-glyphicons.css";
const FONT_AWESOME_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/4.7.0/css/font-awesome.min.css";
const SPIDERFIER_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/OverlappingMarkerSpiderfier-Leaflet/0.2.6/oms.min.js";

// Reads the `mapData` object declared just before it.
const MAP_SCRIPT: &str = r#"
const map = L.map('map').setView([mapData.center.lat, mapData.center.lon], mapData.zoom);
L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
  maxZoom: 19,
  attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);

const oms = mapData.spiderfy ? new OverlappingMarkerSpiderfier(map, { keepSpiderfied: true }) : null;
const overlays = {};

for (const layer of mapData.layers) {
  let group;
  if (layer.kind === 'outline') {
    group = L.geoJSON(layer.features, {
      style: () => ({ color: layer.style.color, weight: layer.style.weight, fill: layer.style.fill }),
      onEachFeature: (feature, shape) => {
        if (feature.properties && feature.properties.tooltip) {
          shape.bindTooltip(feature.properties.tooltip);
        }
      }
    });
  } else {
    group = L.layerGroup();
    for (const m of layer.markers) {
      const marker = L.marker([m.position.lat, m.position.lon], {
        icon: L.AwesomeMarkers.icon({ icon: m.icon.icon, markerColor: m.icon.color, prefix: m.icon.prefix })
      });
      marker.bindTooltip(m.tooltip);
      if (m.popup) {
        marker.bindPopup(m.popup.html, { maxWidth: m.popup.max_width });
      }
      marker.addTo(group);
      if (oms) {
        oms.addMarker(marker);
      }
    }
  }
  group.addTo(map);
  overlays[layer.name] = group;
}

if (mapData.layer_control) {
  L.control.layers(null, overlays).addTo(map);
}
"#;

impl MapArtifact {
    /// Serializes the artifact for inlining inside a `<script>` element.
    pub fn to_json(&self) -> Result<String, RenderError> {
        let json = serde_json::to_string(self).map_err(|e| RenderError::Serialize(e.to_string()))?;
        // `<` only occurs inside strings, where \u003c decodes to the same
        // text but can neither close the script element nor open a comment.
        Ok(json.replace('<', "\\u003c"))
    }

    pub fn to_html(&self, title: &str) -> Result<Markup, RenderError> {
        let json = self.to_json()?;

        Ok(html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (title) }
                    link rel="stylesheet" href=(LEAFLET_CSS);
                    link rel="stylesheet" href=(AWESOME_MARKERS_CSS);
                    link rel="stylesheet" href=(GLYPHICONS_CSS);
                    link rel="stylesheet" href=(FONT_AWESOME_CSS);
                    script src=(LEAFLET_JS) {}
                    script src=(AWESOME_MARKERS_JS) {}
                    script src=(SPIDERFIER_JS) {}
                    style { "html, body { height: 100%; margin: 0; } #map { position: absolute; inset: 0; }" }
                }
                body {
                    div id="map" {}
                    script {
                        (PreEscaped(format!("const mapData = {json};")))
                        (PreEscaped(MAP_SCRIPT))
                    }
                }
            }
        })
    }
}

/// Writes the artifact to `path`, creating parent directories, and returns
/// the HTML that was written.
pub fn persist(artifact: &MapArtifact, path: &Path) -> Result<String, RenderError> {
    let page = artifact.to_html("Accommodation Map")?.into_string();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| RenderError::Io(format!("{}: {e}", parent.display())))?;
    }
    fs::write(path, &page).map_err(|e| RenderError::Io(format!("{}: {e}", path.display())))?;

    info!("Saved map to {}", path.display());
    Ok(page)
}
