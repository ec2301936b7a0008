use crate::domain::Listing;
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use rust_xlsxwriter::Workbook;

pub const EXPORT_FILENAME: &str = "accommodation.xlsx";

const HEADERS: [&str; 8] = [
    "Accommodation Type",
    "Location",
    "Distance to Campus",
    "Room Type",
    "Cost per Week",
    "Details",
    "Coordinates",
    "Site",
];

/// The visible listings as a download, one row per listing.
pub fn export_listings_xlsx(listings: &[&Listing]) -> ResultResp {
    let buffer = listings_workbook(listings)?;
    xlsx_response(buffer, EXPORT_FILENAME)
}

pub fn listings_workbook(listings: &[&Listing]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, listing) in listings.iter().enumerate() {
        let r = (i + 1) as u32;
        let coordinates = format!(
            "({}, {})",
            listing.coordinates.lat, listing.coordinates.lon
        );

        let cells = [
            &listing.accommodation_type,
            &listing.location,
            &listing.distance_to_campus,
            &listing.room_type,
            &listing.cost_per_week,
            &listing.details,
            &coordinates,
            &listing.site_url,
        ];

        for (col, value) in cells.iter().enumerate() {
            worksheet
                .write_string(r, col as u16, value.as_str())
                .map_err(|e| {
                    ServerError::XlsxError(format!(
                        "Failed to write {} for row {}: {}",
                        HEADERS[col], r, e
                    ))
                })?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}
