// stores/boundaries.rs
//
// Boundary Store: borough polygons from a shapefile, plus the optional zone
// archive, all reprojected into one planar CRS.

use crate::config::{BRITISH_NATIONAL_GRID, WGS84};
use crate::domain::{BoundaryPolygon, BoundarySet};
use crate::errors::LoadError;
use crate::projection::Projection;
use crate::stores::zones;
use geo::{Coord, LineString, MultiPolygon, Polygon};
use log::{debug, info, warn};
use shapefile::dbase::{FieldValue, Record};
use shapefile::{Polygon as ShpPolygon, PolygonRing};
use std::fs;
use std::path::Path;

/// Where and how to read boundaries from.
pub struct BoundarySources<'a> {
    pub boroughs_path: &'a Path,
    pub borough_name_field: &'a str,
    pub borough_crs: &'a str,
    pub zones_archive: Option<&'a Path>,
    pub work_dir: &'a Path,
    pub planar_crs: &'a str,
}

pub const NO_ZONE_FILE: &str = "No zone file was found in the zones archive.";
pub const EMPTY_ZONE_FILE: &str = "The zone file in the zones archive holds no polygons.";

/// Marker every British National Grid `.prj` carries in its WKT.
const BNG_PRJ_MARKER: &str = "British_National_Grid";

pub fn load(sources: &BoundarySources) -> Result<BoundarySet, LoadError> {
    let mut notices = Vec::new();

    if let Some(notice) = prj_mismatch(sources.boroughs_path, sources.borough_crs) {
        warn!("{notice}");
        notices.push(notice);
    }

    let boroughs = load_boroughs(sources.boroughs_path, sources.borough_name_field)?;
    let boroughs = reproject(boroughs, sources.borough_crs, sources.planar_crs)?;

    let zones = match sources.zones_archive {
        Some(archive) => {
            let zones = match zones::load(archive, sources.work_dir)? {
                Some(zones) if zones.is_empty() => {
                    notices.push(EMPTY_ZONE_FILE.to_string());
                    zones
                }
                Some(zones) => zones,
                None => {
                    notices.push(NO_ZONE_FILE.to_string());
                    Vec::new()
                }
            };
            Some(reproject(zones, WGS84, sources.planar_crs)?)
        }
        None => None,
    };

    Ok(BoundarySet {
        boroughs,
        zones,
        crs: sources.planar_crs.to_string(),
        notices,
    })
}

/// Compares the shapefile's `.prj` sidecar with the configured CRS.
///
/// Only British National Grid can be recognised from the WKT, so a `.prj`
/// naming another CRS while BNG is configured is reported. A missing or
/// unreadable sidecar is not.
pub fn prj_mismatch(shp_path: &Path, configured_crs: &str) -> Option<String> {
    let prj_path = shp_path.with_extension("prj");
    let wkt = fs::read_to_string(&prj_path).ok()?;

    let says_bng = wkt.contains(BNG_PRJ_MARKER);
    let configured_bng = configured_crs == BRITISH_NATIONAL_GRID;
    (says_bng != configured_bng).then(|| {
        format!(
            "{} does not match the configured borough CRS; set ACCOM_BOROUGH_CRS if the outlines look misplaced.",
            prj_path.display()
        )
    })
}

/// Reads every polygon of the shapefile at `path`, named by `name_field`.
///
/// Coordinates are returned untouched, in whatever CRS the file uses.
pub fn load_boroughs(path: &Path, name_field: &str) -> Result<Vec<BoundaryPolygon>, LoadError> {
    if !path.is_file() {
        return Err(LoadError::Io(format!("{}: no such file", path.display())));
    }
    let shapes = shapefile::read_as::<_, ShpPolygon, Record>(path)
        .map_err(|e| LoadError::Format(format!("{}: {e}", path.display())))?;

    let mut boroughs = Vec::with_capacity(shapes.len());
    for (index, (shape, record)) in shapes.into_iter().enumerate() {
        let name = record_name(&record, name_field).unwrap_or_else(|| {
            warn!("Borough #{index} has no {name_field} attribute");
            format!("Borough {}", index + 1)
        });
        boroughs.push(BoundaryPolygon {
            name,
            geometry: to_multi_polygon(&shape),
        });
    }

    info!("Loaded {} boroughs from {}", boroughs.len(), path.display());
    Ok(boroughs)
}

fn record_name(record: &Record, field: &str) -> Option<String> {
    match record.get(field)? {
        FieldValue::Character(Some(s)) | FieldValue::Memo(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

/// Outer rings start a new polygon; inner rings become holes of the polygon
/// started most recently.
fn to_multi_polygon(shape: &ShpPolygon) -> MultiPolygon<f64> {
    let mut polygons: Vec<Polygon<f64>> = Vec::new();

    for ring in shape.rings() {
        let line: LineString<f64> = ring
            .points()
            .iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect();

        match ring {
            PolygonRing::Outer(_) => polygons.push(Polygon::new(line, vec![])),
            PolygonRing::Inner(_) => match polygons.last_mut() {
                Some(polygon) => polygon.interiors_push(line),
                None => polygons.push(Polygon::new(line, vec![])),
            },
        }
    }

    MultiPolygon::new(polygons)
}

/// Moves every boundary from `from` into `to`. Identical definitions are a
/// no-op.
pub fn reproject(
    boundaries: Vec<BoundaryPolygon>,
    from: &str,
    to: &str,
) -> Result<Vec<BoundaryPolygon>, LoadError> {
    if from == to {
        return Ok(boundaries);
    }

    let projection = Projection::new(from, to).map_err(LoadError::Projection)?;
    debug!("Reprojecting {} boundaries", boundaries.len());

    boundaries
        .into_iter()
        .map(|b| {
            let geometry = projection
                .project(&b.geometry)
                .map_err(|e| LoadError::Projection(format!("{}: {e}", b.name)))?;
            Ok(BoundaryPolygon {
                name: b.name,
                geometry,
            })
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use geo::{Area, BoundingRect};
    use shapefile::dbase::TableWriterBuilder;
    use shapefile::{Point, Writer};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    pub(crate) fn unique_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "{tag}_{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Writes a one-borough shapefile (a 2 km square near Westminster, in
    /// British National Grid metres).
    pub(crate) fn write_borough_shapefile(dir: &Path) -> PathBuf {
        let path = dir.join("boroughs.shp");
        let table = TableWriterBuilder::new()
            .add_character_field("NAME".try_into().unwrap(), 50);
        let mut writer = Writer::from_path(&path, table).unwrap();

        let square = ShpPolygon::new(PolygonRing::Outer(vec![
            Point::new(529_000.0, 179_000.0),
            Point::new(529_000.0, 181_000.0),
            Point::new(531_000.0, 181_000.0),
            Point::new(531_000.0, 179_000.0),
            Point::new(529_000.0, 179_000.0),
        ]));
        let mut record = Record::default();
        record.insert(
            "NAME".to_string(),
            FieldValue::Character(Some("Westminster".to_string())),
        );
        writer.write_shape_and_record(&square, &record).unwrap();
        path
    }

    #[test]
    fn reads_boroughs_with_names() {
        let dir = unique_dir("boroughs_read");
        let path = write_borough_shapefile(&dir);

        let boroughs = load_boroughs(&path, "NAME").unwrap();
        assert_eq!(boroughs.len(), 1);
        assert_eq!(boroughs[0].name, "Westminster");
        assert!((boroughs[0].geometry.unsigned_area() - 4_000_000.0).abs() < 1.0);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn unknown_name_field_falls_back_to_index() {
        let dir = unique_dir("boroughs_unnamed");
        let path = write_borough_shapefile(&dir);

        let boroughs = load_boroughs(&path, "LAD_NAME").unwrap();
        assert_eq!(boroughs[0].name, "Borough 1");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn loads_boroughs_and_zones_into_planar_crs() {
        let dir = unique_dir("boundaries_load");
        let shp = write_borough_shapefile(&dir);
        let archive = dir.join("zones.zip");
        zones::tests::write_archive(&archive, &[("zones.kml", zones::tests::ZONES_KML)]);

        let set = load(&BoundarySources {
            boroughs_path: &shp,
            borough_name_field: "NAME",
            borough_crs: BRITISH_NATIONAL_GRID,
            zones_archive: Some(&archive),
            work_dir: &dir.join("work"),
            planar_crs: BRITISH_NATIONAL_GRID,
        })
        .unwrap();

        assert_eq!(set.crs, BRITISH_NATIONAL_GRID);
        assert_eq!(set.boroughs.len(), 1);

        assert!(set.notices.is_empty(), "{:?}", set.notices);
        let zones = set.zones.expect("zones were configured");
        assert_eq!(zones.len(), 2);
        let rect = zones[0].geometry.bounding_rect().unwrap();
        // Zone 1 spans roughly E 525,000..539,000 once projected.
        assert!(rect.min().x > 500_000.0 && rect.max().x < 545_000.0, "{rect:?}");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_shapefile_fails() {
        let err = load_boroughs(Path::new("/nonexistent/boroughs.shp"), "NAME").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)), "{err}");
    }

    fn sources<'a>(shp: &'a Path, archive: &'a Path, work: &'a Path) -> BoundarySources<'a> {
        BoundarySources {
            boroughs_path: shp,
            borough_name_field: "NAME",
            borough_crs: BRITISH_NATIONAL_GRID,
            zones_archive: Some(archive),
            work_dir: work,
            planar_crs: BRITISH_NATIONAL_GRID,
        }
    }

    #[test]
    fn missing_and_empty_zone_files_get_different_notices() {
        let dir = unique_dir("boundaries_notices");
        let shp = write_borough_shapefile(&dir);
        let work = dir.join("work");

        let no_kml = dir.join("no_kml.zip");
        zones::tests::write_archive(&no_kml, &[("readme.txt", "nothing here")]);
        let set = load(&sources(&shp, &no_kml, &work)).unwrap();
        assert_eq!(set.notices, vec![NO_ZONE_FILE]);
        assert_eq!(set.zones, Some(Vec::new()));

        let points = dir.join("points.zip");
        zones::tests::write_archive(&points, &[("zones.kml", zones::tests::POINTS_ONLY_KML)]);
        let set = load(&sources(&shp, &points, &work)).unwrap();
        assert_eq!(set.notices, vec![EMPTY_ZONE_FILE]);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn prj_naming_another_crs_is_reported() {
        let dir = unique_dir("boroughs_prj");
        let shp = write_borough_shapefile(&dir);

        assert_eq!(prj_mismatch(&shp, BRITISH_NATIONAL_GRID), None);

        std::fs::write(
            shp.with_extension("prj"),
            r#"PROJCS["British_National_Grid",GEOGCS["GCS_OSGB_1936",DATUM["D_OSGB_1936"]]]"#,
        )
        .unwrap();
        assert_eq!(prj_mismatch(&shp, BRITISH_NATIONAL_GRID), None);

        std::fs::write(
            shp.with_extension("prj"),
            r#"GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137.0,298.257223563]]]"#,
        )
        .unwrap();
        let notice = prj_mismatch(&shp, BRITISH_NATIONAL_GRID).unwrap();
        assert!(notice.contains("boroughs.prj"), "{notice}");

        let set = load(&BoundarySources {
            boroughs_path: &shp,
            borough_name_field: "NAME",
            borough_crs: BRITISH_NATIONAL_GRID,
            zones_archive: None,
            work_dir: &dir.join("work"),
            planar_crs: BRITISH_NATIONAL_GRID,
        })
        .unwrap();
        assert_eq!(set.notices, vec![notice]);
        std::fs::remove_dir_all(&dir).ok();
    }
}
