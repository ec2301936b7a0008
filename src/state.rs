// state.rs
use crate::config::AppConfig;
use crate::domain::filter::visible_listings;
use crate::domain::{BoundarySet, FilterSelection, Listing, TransitStation};
use crate::errors::{LoadError, RenderError};
use crate::map::{self, OutlineLayers};
use crate::stores::{boundaries, listings};
use crate::transit::TransitClient;
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Mutex;

/// Everything loaded at startup. Read-only afterwards, shared by every
/// request.
pub struct AppState {
    pub listings: Vec<Listing>,
    pub stations: Option<Vec<TransitStation>>,
    /// Non-fatal startup problems, shown above the map.
    pub warnings: Vec<String>,
    pub output_path: PathBuf,
    outlines: OutlineLayers,
    // Held while the artifact file is written.
    render_lock: Mutex<()>,
}

impl AppState {
    pub fn new(
        listings: Vec<Listing>,
        boundaries: &BoundarySet,
        stations: Option<Vec<TransitStation>>,
        warnings: Vec<String>,
        output_path: PathBuf,
    ) -> Result<Self, RenderError> {
        let outlines = OutlineLayers::from_boundaries(boundaries)?;

        Ok(Self {
            listings,
            stations,
            warnings,
            output_path,
            outlines,
            render_lock: Mutex::new(()),
        })
    }

    /// Runs the listing, boundary and transit stores.
    ///
    /// Listing and boundary failures are fatal. A transit failure only drops
    /// the station layer and is recorded as a warning.
    pub fn load(cfg: &AppConfig) -> Result<Self, LoadError> {
        let mut warnings = Vec::new();

        let listings = listings::load(&cfg.listings_path)?;

        let boundaries = boundaries::load(&boundaries::BoundarySources {
            boroughs_path: &cfg.boroughs_path,
            borough_name_field: &cfg.borough_name_field,
            borough_crs: &cfg.borough_crs,
            zones_archive: cfg.zones_archive.as_deref(),
            work_dir: &cfg.work_dir,
            planar_crs: &cfg.planar_crs,
        })?;
        warnings.extend(boundaries.notices.iter().cloned());

        let stations = match &cfg.transit {
            Some(transit) => {
                let fetched = TransitClient::new(transit.timeout)
                    .and_then(|client| client.fetch(&transit.endpoint));
                match fetched {
                    Ok(stations) => Some(stations),
                    Err(e) => {
                        warn!("Station layer omitted: {e}");
                        warnings.push(format!("Station layer omitted: {e}"));
                        None
                    }
                }
            }
            None => None,
        };

        info!(
            "Startup complete: {} listings, {} boroughs, {} zones, {} stations",
            listings.len(),
            boundaries.boroughs.len(),
            boundaries.zones.as_ref().map_or(0, Vec::len),
            stations.as_ref().map_or(0, Vec::len)
        );

        Self::new(
            listings,
            &boundaries,
            stations,
            warnings,
            cfg.output_path.clone(),
        )
        .map_err(|e| LoadError::Projection(e.to_string()))
    }

    /// One full render cycle: filter, compose, persist. Returns the page.
    pub fn render_selection(&self, selection: &FilterSelection) -> Result<String, RenderError> {
        let visible = visible_listings(&self.listings, selection);
        let artifact = map::render(&self.outlines, &visible, self.stations.as_deref());

        let _guard = self
            .render_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        map::persist(&artifact, &self.output_path)
    }
}
