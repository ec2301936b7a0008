use crate::templates::components::card;
use maud::{html, Markup};

pub const MAP_PANEL_ID: &str = "map-panel";

/// Summary, export link and the map frame for one selection.
///
/// `query` is the selection as a query string. The frame points at `/map`, so
/// swapping this panel in runs a full render. `out_of_band` marks it for an
/// htmx out-of-band swap next to another fragment.
pub fn map_panel(query: &str, visible: usize, total: usize, out_of_band: bool) -> Markup {
    html! {
        div id=(MAP_PANEL_ID) hx-swap-oob=[out_of_band.then_some("true")] {
            (card("Listings", html! {
                p {
                    "Showing " strong { (visible) } " of " (total) " listings. "
                    a href=(format!("/export?{query}")) { "Download as .xlsx" }
                }
            }))

            iframe id="map" title="Accommodation map" src=(format!("/map?{query}")) {}
        }
    }
}
