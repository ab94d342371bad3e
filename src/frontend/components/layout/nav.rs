use crate::frontend::app::Route;
use crate::frontend::services::context::AuthState;
use dioxus::prelude::*;
use dioxus_router::{navigator, use_route};

#[component]
pub fn Navigation() -> Element {
    let nav = navigator();
    let route = use_route::<Route>();
    let auth = use_context::<AuthState>();
    let username = auth.get_username();

    let item_class = |target: &Route| {
        if route.name() == target.name() {
            "nav-item active"
        } else {
            "nav-item"
        }
    };

    rsx! {
        nav { class: "navigation",
            ul { class: "nav-items",
                li {
                    class: item_class(&Route::Home {}),
                    onclick: move |_| { nav.push(Route::Home {}); },
                    "Home"
                }
                li {
                    class: item_class(&Route::Offers {}),
                    onclick: move |_| { nav.push(Route::Offers {}); },
                    "Offers"
                }
                li {
                    class: item_class(&Route::AltaInmueble {}),
                    onclick: move |_| { nav.push(Route::AltaInmueble {}); },
                    "Publish"
                }
                if auth.is_authenticated() {
                    li {
                        class: item_class(&Route::Profile {}),
                        onclick: move |_| { nav.push(Route::Profile {}); },
                        "{username}"
                    }
                } else {
                    li {
                        class: item_class(&Route::Login {}),
                        onclick: move |_| { nav.push(Route::Login {}); },
                        "Sign in"
                    }
                }
            }
        }
    }
}
