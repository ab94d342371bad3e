//! Pages that need a signed-in user.

use crate::backend::auth::Session;
use crate::frontend::app::Route;
use crate::frontend::services::context::AuthState;
use dioxus::prelude::*;
use dioxus_router::navigator;

#[component]
pub fn Profile() -> Element {
    let nav = navigator();
    let auth = use_context::<AuthState>();
    let session = use_context::<Session>();
    let mut error = use_signal(|| None::<String>);

    let username = auth.get_username();
    let identity = auth.identity();
    let email = identity
        .as_ref()
        .and_then(|user| user.email.clone())
        .unwrap_or_default();
    let provider = identity
        .as_ref()
        .map(|user| user.provider.to_string())
        .unwrap_or_default();

    rsx! {
        section { class: "profile",
            h1 { "{username}" }
            p { "{email}" }
            p { class: "provider", "Signed in with {provider}" }
            button {
                class: "sign-out",
                onclick: move |_| {
                    let session = session.clone();
                    spawn(async move {
                        match session.sign_out().await {
                            Ok(()) => {
                                nav.push(Route::Home {});
                            }
                            Err(e) => {
                                log::error!("Failed to sign out: {e}");
                                error.set(Some(e.to_string()));
                            }
                        }
                    });
                },
                "Sign out"
            }
            if let Some(message) = error() {
                div { class: "error-message", "{message}" }
            }
        }
    }
}

#[component]
pub fn AltaInmueble() -> Element {
    rsx! {
        section { class: "alta-inmueble",
            h1 { "Publish a property" }
        }
    }
}
