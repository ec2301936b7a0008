// stores/zones.rs
//
// Fare zones ship as a zip archive wrapping a single KML document.

use crate::domain::BoundaryPolygon;
use crate::errors::LoadError;
use geo::{Coord, LineString, MultiPolygon, Polygon};
use log::{debug, info, warn};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

const KML_SUFFIX: &str = ".kml";

/// Extracts the KML entry of `archive_path` into `work_dir` and parses it.
///
/// Geometries are returned in geographic coordinates (x = longitude,
/// y = latitude). `None` means the archive has no KML entry at all, while
/// `Some(vec![])` means the KML was found but held no polygons.
pub fn load(
    archive_path: &Path,
    work_dir: &Path,
) -> Result<Option<Vec<BoundaryPolygon>>, LoadError> {
    let Some(kml_path) = extract_kml(archive_path, work_dir)? else {
        return Ok(None);
    };

    let text = fs::read_to_string(&kml_path)
        .map_err(|e| LoadError::Io(format!("{}: {e}", kml_path.display())))?;
    let zones = parse_kml(&text)?;
    if zones.is_empty() {
        warn!("{} has no polygon placemarks", kml_path.display());
    }
    info!(
        "Loaded {} zones from {}",
        zones.len(),
        archive_path.display()
    );
    Ok(Some(zones))
}

/// Copies the first `.kml` entry (by sorted name) into `work_dir` and
/// returns where it landed, or `None` when the archive has no such entry.
pub fn extract_kml(archive_path: &Path, work_dir: &Path) -> Result<Option<PathBuf>, LoadError> {
    let file = File::open(archive_path)
        .map_err(|e| LoadError::Io(format!("{}: {e}", archive_path.display())))?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| LoadError::Format(format!("{}: {e}", archive_path.display())))?;

    let mut candidates: Vec<String> = archive
        .file_names()
        .filter(|name| !name.ends_with('/') && name.to_ascii_lowercase().ends_with(KML_SUFFIX))
        .map(String::from)
        .collect();
    candidates.sort();

    let Some(chosen) = candidates.first().cloned() else {
        warn!(
            "No {KML_SUFFIX} file found in {}; continuing without zones",
            archive_path.display()
        );
        return Ok(None);
    };
    if candidates.len() > 1 {
        warn!(
            "{} holds {} {KML_SUFFIX} files, using {chosen} and ignoring the rest",
            archive_path.display(),
            candidates.len()
        );
    }

    // Only keep the file name so entries like "../x.kml" stay inside work_dir.
    let file_name = Path::new(&chosen)
        .file_name()
        .ok_or_else(|| LoadError::Format(format!("unusable archive entry name: {chosen}")))?;
    fs::create_dir_all(work_dir)?;
    let dest = work_dir.join(file_name);

    let mut entry = archive
        .by_name(&chosen)
        .map_err(|e| LoadError::Format(format!("{}: {e}", archive_path.display())))?;
    let mut out = File::create(&dest)?;
    std::io::copy(&mut entry, &mut out)
        .map_err(|e| LoadError::Format(format!("{chosen}: {e}")))?;

    debug!("Extracted {chosen} to {}", dest.display());
    Ok(Some(dest))
}

#[derive(Default)]
struct PlacemarkDraft {
    name: Option<String>,
    polygons: Vec<Polygon<f64>>,
    exterior: Option<LineString<f64>>,
    interiors: Vec<LineString<f64>>,
}

/// Reads every `Placemark` holding at least one polygon. Polygons nested in
/// a `MultiGeometry` are merged into a single region.
pub fn parse_kml(text: &str) -> Result<Vec<BoundaryPolygon>, LoadError> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut zones = Vec::new();
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut placemark: Option<PlacemarkDraft> = None;
    let mut text_buf = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"Placemark" {
                    placemark = Some(PlacemarkDraft::default());
                }
                path.push(name);
                text_buf.clear();
            }
            Ok(Event::Text(t)) => {
                let unescaped = t
                    .unescape()
                    .map_err(|e| LoadError::Format(format!("KML text: {e}")))?;
                text_buf.push_str(&unescaped);
            }
            Ok(Event::CData(c)) => {
                text_buf.push_str(&String::from_utf8_lossy(&c.into_inner()));
            }
            Ok(Event::End(e)) => {
                let parent_is_placemark =
                    path.len() >= 2 && path[path.len() - 2].as_slice() == b"Placemark";
                let inside = |tag: &[u8]| path.iter().any(|p| p.as_slice() == tag);

                if let Some(draft) = placemark.as_mut() {
                    match e.local_name().as_ref() {
                        b"name" if parent_is_placemark => {
                            draft.name = Some(text_buf.trim().to_string());
                        }
                        b"coordinates" => {
                            let ring = parse_ring(&text_buf)?;
                            if inside(b"outerBoundaryIs") {
                                draft.exterior = Some(ring);
                            } else if inside(b"innerBoundaryIs") {
                                draft.interiors.push(ring);
                            }
                        }
                        b"Polygon" => {
                            let interiors = std::mem::take(&mut draft.interiors);
                            if let Some(exterior) = draft.exterior.take() {
                                draft.polygons.push(Polygon::new(exterior, interiors));
                            }
                        }
                        b"Placemark" => {
                            if let Some(done) = placemark.take() {
                                push_zone(&mut zones, done);
                            }
                        }
                        _ => {}
                    }
                }

                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(LoadError::Format(format!(
                    "KML parse error at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
    }

    Ok(zones)
}

fn push_zone(zones: &mut Vec<BoundaryPolygon>, draft: PlacemarkDraft) {
    if draft.polygons.is_empty() {
        debug!("Skipping placemark {:?} without polygons", draft.name);
        return;
    }
    let name = draft
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| format!("Zone {}", zones.len() + 1));
    zones.push(BoundaryPolygon {
        name,
        geometry: MultiPolygon::new(draft.polygons),
    });
}

/// KML coordinates: whitespace separated `lon,lat[,alt]` tuples.
fn parse_ring(text: &str) -> Result<LineString<f64>, LoadError> {
    text.split_whitespace()
        .map(|tuple| {
            let mut parts = tuple.split(',').map(str::parse::<f64>);
            match (parts.next(), parts.next()) {
                (Some(Ok(x)), Some(Ok(y))) => Ok(Coord { x, y }),
                _ => Err(LoadError::Format(format!(
                    "invalid KML coordinate tuple \"{tuple}\""
                ))),
            }
        })
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}
