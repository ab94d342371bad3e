//! Layout running in-app navigation through the headless [`Router`].

use crate::backend::auth::AuthProvider;
use crate::backend::routing::{RouteTable, Router, Transition};
use crate::frontend::app::Route;
use crate::frontend::components::layout::Navigation;
use crate::frontend::services::context::AuthState;
use dioxus::prelude::*;
use dioxus_router::{components::Outlet, navigator, use_route};
use std::cell::RefCell;
use std::rc::Rc;

/// What the layout shows for the current location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Page,
    Login,
    Restoring,
}

fn screen_for<A: AuthProvider>(router: &mut Router<A>, path: &str) -> Screen {
    match router.navigate(path) {
        Ok(Transition::Allowed { .. }) => Screen::Page,
        Ok(Transition::Redirected { .. }) => Screen::Login,
        Ok(Transition::Deferred { .. }) => Screen::Restoring,
        Err(e) => {
            log::warn!("Route table out of sync with views: {e}");
            Screen::Page
        }
    }
}

#[component]
pub fn RequiresAuth() -> Element {
    let nav = navigator();
    let route = use_route::<Route>();
    let auth = use_context::<AuthState>();
    let table = use_context::<RouteTable>();
    let router = use_hook(|| Router::new(table, auth).map(|router| Rc::new(RefCell::new(router))));

    let router = match router {
        Ok(router) => router,
        Err(e) => {
            log::error!("Cannot build router: {e}");
            return rsx! { div { class: "error-message error-visible", "{e}" } };
        }
    };

    match screen_for(&mut *router.borrow_mut(), &route.to_string()) {
        Screen::Page => rsx! {
            Navigation {}
            main { class: "page", Outlet::<Route> {} }
        },
        Screen::Login => {
            nav.replace(Route::Login {});
            rsx! { div {} }
        }
        Screen::Restoring => rsx! {
            div { class: "session-restoring", "Restoring session..." }
        },
    }
}
