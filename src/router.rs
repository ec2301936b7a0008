use crate::domain::filter::{default_room_types, room_type_options, visible_listings};
use crate::domain::listing::distinct_locations;
use crate::domain::FilterSelection;
use crate::errors::ServerError;
use crate::responses::{html_page_response, html_response, ResultResp};
use crate::spreadsheets::export_listings_xlsx;
use crate::state::AppState;
use crate::templates;
use crate::templates::pages::MapPageVm;
use astra::Request;
use log::debug;
use maud::{html, Markup};

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();
    let selection = FilterSelection::from_query(req.uri().query().unwrap_or(""));

    debug!("{method} {path} {selection:?}");

    match (method, path) {
        ("GET", "/") => {
            let vm = MapPageVm {
                locations: distinct_locations(&state.listings),
                room_options: room_type_options(&state.listings, &selection.locations),
                selection: &selection,
                visible_count: visible_listings(&state.listings, &selection).len(),
                total_count: state.listings.len(),
                warnings: &state.warnings,
            };
            html_response(templates::pages::home_page(&vm))
        }

        // Re-rendered and re-saved on every filter change.
        ("GET", "/map") => html_page_response(state.render_selection(&selection)?),

        // htmx swaps this in when the location select changes. The room
        // types at the new locations come preselected and the map panel
        // follows out of band.
        ("GET", "/filters/rooms") => {
            let options = room_type_options(&state.listings, &selection.locations);
            let preselected = default_room_types(&state.listings, &selection.locations);
            let cascaded = FilterSelection::new(selection.locations.clone(), preselected);

            html_response(html! {
                (templates::components::room_select(&options, &cascaded.room_types))
                (map_panel(state, &cascaded, true))
            })
        }

        // ...and this one when the room select changes.
        ("GET", "/filters/map") => html_response(map_panel(state, &selection, false)),

        ("GET", "/export") => {
            export_listings_xlsx(&visible_listings(&state.listings, &selection))
        }

        (_, "/" | "/map" | "/filters/rooms" | "/filters/map" | "/export") => Err(
            ServerError::BadRequest(format!("{method} is not supported on {path}")),
        ),

        _ => Err(ServerError::NotFound),
    }
}

fn map_panel(state: &AppState, selection: &FilterSelection, out_of_band: bool) -> Markup {
    templates::components::map_panel(
        &selection.to_query(),
        visible_listings(&state.listings, selection).len(),
        state.listings.len(),
        out_of_band,
    )
}
