use maud::{html, Markup};

/// Multi-select of every location. Changing it swaps in a fresh room select
/// and, out of band, a map panel for the new selection.
pub fn location_select(locations: &[String], selected: &[String]) -> Markup {
    html! {
        label for="location" { "Select location" }
        select
            name="location"
            id="location"
            multiple
            hx-get="/filters/rooms"
            hx-include="[name='location']"
            hx-target="#room-filter"
            hx-swap="outerHTML"
            hx-trigger="change"
        {
            @for location in locations {
                option value=(location) selected[selected.contains(location)] { (location) }
            }
        }
    }
}

/// Multi-select of the room types on offer for the current locations.
/// Changing it swaps in a map panel for the new selection.
pub fn room_select(options: &[String], selected: &[String]) -> Markup {
    html! {
        div id="room-filter" {
            label for="room" { "Select rooms" }
            select
                name="room"
                id="room"
                multiple
                hx-get="/filters/map"
                hx-include="[name='location'], [name='room']"
                hx-target="#map-panel"
                hx-swap="outerHTML"
                hx-trigger="change"
            {
                @for room in options {
                    option value=(room) selected[selected.contains(room)] { (room) }
                }
            }
        }
    }
}
