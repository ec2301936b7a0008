// templates/pages/home.rs

use crate::domain::FilterSelection;
use crate::templates::{
    components::{location_select, map_panel, room_select},
    desktop_layout,
};
use maud::{html, Markup};

pub const PAGE_TITLE: &str = "Accommodation Locations";

pub struct MapPageVm<'a> {
    pub locations: Vec<String>,
    pub room_options: Vec<String>,
    pub selection: &'a FilterSelection,
    pub visible_count: usize,
    pub total_count: usize,
    pub warnings: &'a [String],
}

pub fn home_page(vm: &MapPageVm) -> Markup {
    let query = vm.selection.to_query();

    desktop_layout(
        PAGE_TITLE,
        html! {
            div class="layout" {
                aside class="sidebar" {
                    h2 { "Filters" }
                    form action="/" method="get" {
                        (location_select(&vm.locations, &vm.selection.locations))
                        (room_select(&vm.room_options, &vm.selection.room_types))
                        noscript { p { button type="submit" { "Apply" } } }
                    }
                    p class="muted" {
                        "With no location selected every listing is shown. "
                        "The map refreshes on every change."
                    }
                }

                main class="content" {
                    @for warning in vm.warnings {
                        div class="warning" { (warning) }
                    }

                    (map_panel(&query, vm.visible_count, vm.total_count, false))
                }
            }
        },
    )
}
