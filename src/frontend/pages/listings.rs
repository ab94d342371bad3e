//! Listing pages. Property data comes from the hosted database.

use dioxus::prelude::*;

#[component]
pub fn Offers() -> Element {
    rsx! {
        section { class: "offers",
            h1 { "Offers" }
        }
    }
}

#[component]
pub fn Category(category: String) -> Element {
    rsx! {
        section { class: "category",
            h1 { "Category: {category}" }
        }
    }
}

#[component]
pub fn PropertyDetail(id: String) -> Element {
    rsx! {
        section { class: "property-detail",
            h1 { "Property {id}" }
        }
    }
}
