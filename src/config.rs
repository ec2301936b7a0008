use std::path::PathBuf;
use std::time::Duration;

/// British National Grid (EPSG:27700). The London borough shapefiles ship in
/// this CRS and it is the planar CRS boundaries are held in.
pub const BRITISH_NATIONAL_GRID: &str = "+proj=tmerc +lat_0=49 +lon_0=-2 +k=0.9996012717 \
     +x_0=400000 +y_0=-100000 +ellps=airy \
     +towgs84=446.448,-125.157,542.06,0.15,0.247,0.842,-20.489 +units=m +no_defs";

/// Geographic WGS84 (EPSG:4326), used by KML files and by the browser map.
pub const WGS84: &str = "+proj=longlat +datum=WGS84 +no_defs";

pub const DEFAULT_TRANSIT_ENDPOINT: &str = "https://api.tfl.gov.uk/StopPoint/Mode/tube";

/// Runtime configuration. Every value can be overridden through an
/// `ACCOM_*` environment variable.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listings_path: PathBuf,
    pub boroughs_path: PathBuf,
    pub borough_name_field: String,
    pub borough_crs: String,
    pub zones_archive: Option<PathBuf>,
    pub planar_crs: String,
    pub work_dir: PathBuf,
    pub output_path: PathBuf,
    pub bind_addr: String,
    pub transit: Option<TransitConfig>,
}

#[derive(Debug, Clone)]
pub struct TransitConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listings_path: PathBuf::from("Accommodation.xlsx"),
            boroughs_path: PathBuf::from("London_Borough_Excluding_MHW.shp"),
            borough_name_field: "NAME".to_string(),
            borough_crs: BRITISH_NATIONAL_GRID.to_string(),
            zones_archive: None,
            planar_crs: BRITISH_NATIONAL_GRID.to_string(),
            work_dir: std::env::temp_dir().join("accommodation_map"),
            output_path: PathBuf::from("index.html"),
            bind_addr: "127.0.0.1:3000".to_string(),
            transit: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup, falling back to the defaults for
    /// keys that are absent or empty.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let transit_enabled = get("ACCOM_TRANSIT")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);
        let transit = transit_enabled.then(|| TransitConfig {
            endpoint: get("ACCOM_TRANSIT_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_TRANSIT_ENDPOINT.to_string()),
            timeout: Duration::from_secs(
                get("ACCOM_TRANSIT_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),
        });

        Self {
            listings_path: get("ACCOM_LISTINGS")
                .map(PathBuf::from)
                .unwrap_or(defaults.listings_path),
            boroughs_path: get("ACCOM_BOROUGHS")
                .map(PathBuf::from)
                .unwrap_or(defaults.boroughs_path),
            borough_name_field: get("ACCOM_BOROUGH_NAME_FIELD")
                .unwrap_or(defaults.borough_name_field),
            borough_crs: get("ACCOM_BOROUGH_CRS").unwrap_or(defaults.borough_crs),
            zones_archive: get("ACCOM_ZONES_ARCHIVE").map(PathBuf::from),
            planar_crs: get("ACCOM_PLANAR_CRS").unwrap_or(defaults.planar_crs),
            work_dir: get("ACCOM_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
            output_path: get("ACCOM_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            bind_addr: get("ACCOM_ADDR").unwrap_or(defaults.bind_addr),
            transit,
        }
    }
}
