use crate::frontend::app::Route;
use dioxus::prelude::*;
use dioxus_router::navigator;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let nav = navigator();
    let path = format!("/{}", segments.join("/"));

    rsx! {
        section { class: "not-found",
            h1 { "Page not found" }
            p { "Nothing lives at {path}" }
            button {
                onclick: move |_| { nav.push(Route::Home {}); },
                "Back to home"
            }
        }
    }
}
