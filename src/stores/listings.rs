// stores/listings.rs
//
// Listing Store: reads the accommodation spreadsheet into `Listing`s.

use crate::domain::{Coordinate, Listing};
use crate::errors::LoadError;
use calamine::{open_workbook_auto, Data, Reader};
use log::{debug, info};
use std::path::Path;

/// Positional source columns. Header text is ignored, only the count is checked.
pub const COLUMNS: [&str; 9] = [
    "Accommodation Type",
    "Features",
    "Location",
    "Distance to Strand",
    "Room Type",
    "Cost (per week)",
    "Details",
    "loc",
    "site",
];

const COL_ACCOMMODATION_TYPE: usize = 0;
const COL_LOCATION: usize = 2;
const COL_DISTANCE: usize = 3;
const COL_ROOM_TYPE: usize = 4;
const COL_COST: usize = 5;
const COL_DETAILS: usize = 6;
const COL_COORDINATES: usize = 7;
const COL_SITE: usize = 8;

pub type Row = Vec<Option<String>>;

/// Loads every listing from the first worksheet of `path`.
pub fn load(path: &Path) -> Result<Vec<Listing>, LoadError> {
    let table = read_table(path)?;
    let listings = listings_from_table(table)?;
    info!(
        "Loaded {} listings from {}",
        listings.len(),
        path.display()
    );
    Ok(listings)
}

/// Reads the first worksheet as rows of optional text cells, header included.
pub fn read_table(path: &Path) -> Result<Vec<Row>, LoadError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| LoadError::Io(format!("{}: {e}", path.display())))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::Format(format!("{} has no worksheets", path.display())))?
        .map_err(|e| LoadError::Format(format!("{}: {e}", path.display())))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.trim().is_empty() => None,
        other => Some(other.to_string()),
    }
}

/// Turns a raw table (header first) into listings.
///
/// The header must have exactly [`COLUMNS`] entries. Data rows are
/// forward-filled before being mapped.
pub fn listings_from_table(mut table: Vec<Row>) -> Result<Vec<Listing>, LoadError> {
    if table.is_empty() {
        return Err(LoadError::Format("listing table is empty".into()));
    }

    let header = table.remove(0);
    if header.len() != COLUMNS.len() {
        return Err(LoadError::Format(format!(
            "expected {} columns ({}), found {}",
            COLUMNS.len(),
            COLUMNS.join(", "),
            header.len()
        )));
    }

    let mut rows = table;
    forward_fill(&mut rows, COLUMNS.len());

    rows.iter()
        .enumerate()
        // +2: one for the header, one for 1-based spreadsheet rows
        .map(|(i, row)| listing_from_row(row, i + 2))
        .collect()
}

/// Fills each missing cell with the nearest preceding non-missing value in
/// the same column. Rows are padded or truncated to `width`.
///
/// A column whose first cells are missing has nothing to fill from; those
/// cells stay `None`.
pub fn forward_fill(rows: &mut [Row], width: usize) {
    let mut last_seen: Vec<Option<String>> = vec![None; width];

    for row in rows.iter_mut() {
        row.resize(width, None);
        for (cell, seen) in row.iter_mut().zip(last_seen.iter_mut()) {
            if cell.is_some() {
                *seen = cell.clone();
            } else {
                *cell = seen.clone();
            }
        }
    }
}

fn listing_from_row(row: &Row, line: usize) -> Result<Listing, LoadError> {
    let field = |col: usize| -> Result<String, LoadError> {
        row[col].clone().ok_or_else(|| {
            LoadError::Parse(format!(
                "row {line}: column \"{}\" is empty and has no earlier value to fill from",
                COLUMNS[col]
            ))
        })
    };

    let raw_coordinates = field(COL_COORDINATES)?;
    let coordinates = parse_coordinates(&raw_coordinates)
        .map_err(|e| LoadError::Parse(format!("row {line}: {e}")))?;

    let listing = Listing {
        accommodation_type: field(COL_ACCOMMODATION_TYPE)?,
        location: field(COL_LOCATION)?,
        distance_to_campus: field(COL_DISTANCE)?,
        room_type: field(COL_ROOM_TYPE)?,
        cost_per_week: field(COL_COST)?,
        details: field(COL_DETAILS)?,
        coordinates,
        site_url: field(COL_SITE)?,
    };
    debug!("row {line}: {:?}", listing.key());
    Ok(listing)
}

/// Parses a two-element numeric list such as `[51.5, -0.11]` into a
/// coordinate. A parenthesized pair is accepted as well.
pub fn parse_coordinates(text: &str) -> Result<Coordinate, String> {
    let trimmed = text.trim();
    let normalized = match trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => format!("[{inner}]"),
        None => trimmed.to_string(),
    };

    let [lat, lon]: [f64; 2] = serde_json::from_str(&normalized)
        .map_err(|e| format!("invalid coordinate literal \"{text}\": {e}"))?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(format!("coordinate literal \"{text}\" is out of range"));
    }

    Ok(Coordinate::new(lat, lon))
}
