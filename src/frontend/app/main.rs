//! Application routing system.

use crate::backend::auth::Session;
use crate::backend::routing::names;
use crate::frontend::components::layout::RequiresAuth;
use crate::frontend::pages::{
    AltaInmueble, Category, Home, Login, NotFound, Offers, Profile, PropertyDetail,
};
use crate::frontend::services::context::AuthState;

use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

/// Main routing enum for the application.
///
/// Every table route sits under [`RequiresAuth`], which consults the route
/// table to decide whether the visitor may see it.
#[derive(Clone, Routable, Debug, PartialEq, Eq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(RequiresAuth)]
        /// Landing page.
        #[route("/")]
        Home {},
        /// Current offers.
        #[route("/offers")]
        Offers {},
        /// Account page of the signed-in user.
        #[route("/profile")]
        Profile {},
        /// Sign-in page.
        #[route("/login")]
        Login {},
        /// Publishing form for a new property.
        #[route("/alta-inmueble")]
        AltaInmueble {},
        /// Listings of one category.
        #[route("/category/:category")]
        Category { category: String },
        /// A single property.
        #[route("/property/:id")]
        PropertyDetail { id: String },
    #[end_layout]
    /// Anything the table does not know.
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    /// Name of the matching route table entry, `None` for the fallback page.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::Home {} => Some(names::HOME),
            Self::Offers {} => Some(names::OFFERS),
            Self::Profile {} => Some(names::PROFILE),
            Self::Login {} => Some(names::LOGIN),
            Self::AltaInmueble {} => Some(names::ALTA_INMUEBLE),
            Self::Category { .. } => Some(names::CATEGORY),
            Self::PropertyDetail { .. } => Some(names::PROPERTY_DETAIL),
            Self::NotFound { .. } => None,
        }
    }
}

/// Root component. Mirrors the session into an [`AuthState`] signal.
#[component]
pub fn App() -> Element {
    let session = use_context::<Session>();
    let mut status = use_signal(|| session.status());
    use_context_provider(|| AuthState { status });

    use_future(move || {
        let mut rx = session.subscribe();
        async move {
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                log::debug!("Session is now {next}");
                status.set(next);
            }
        }
    });

    rsx! { Router::<Route> {} }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::routing::{RouteParams, RouteTable};

    #[test]
    fn every_table_route_has_a_view() {
        let table = RouteTable::standard().unwrap();
        let params = RouteParams::from([("category", "houses"), ("id", "42")]);

        for definition in table.iter() {
            let path = table.href(definition.name(), &params).unwrap();
            let route: Route = path.parse().unwrap();
            assert_eq!(route.name(), Some(definition.name()), "{path}");
            assert_eq!(route.to_string(), path);
        }
    }

    #[test]
    fn params_reach_the_views() {
        let route: Route = "/category/houses".parse().unwrap();
        assert_eq!(
            route,
            Route::Category {
                category: "houses".to_string()
            }
        );

        let route: Route = "/property/42".parse().unwrap();
        assert_eq!(route, Route::PropertyDetail { id: "42".to_string() });
    }

    #[test]
    fn unknown_paths_fall_back() {
        let route: Route = "/unknown-path".parse().unwrap();
        assert!(matches!(route, Route::NotFound { .. }));
        assert_eq!(route.name(), None);
    }
}
