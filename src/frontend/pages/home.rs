use crate::frontend::app::Route;
use dioxus::prelude::*;
use dioxus_router::navigator;

/// Listing categories shown on the landing page.
const CATEGORIES: [(&str, &str); 4] = [
    ("houses", "Houses"),
    ("flats", "Flats"),
    ("offices", "Offices"),
    ("land", "Land"),
];

#[component]
pub fn Home() -> Element {
    let nav = navigator();

    rsx! {
        section { class: "home",
            h1 { "Find your next home" }
            ul { class: "categories",
                for (slug, label) in CATEGORIES {
                    li {
                        key: "{slug}",
                        onclick: move |_| {
                            nav.push(Route::Category { category: slug.to_string() });
                        },
                        "{label}"
                    }
                }
            }
        }
    }
}
