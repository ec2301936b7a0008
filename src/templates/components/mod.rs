use maud::{html, Markup};

pub mod error;
pub mod filters;
pub mod map_panel;

pub use error::html_error_response;
pub use filters::{location_select, room_select};
pub use map_panel::map_panel;

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        div class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}
