//! Sign-in page.

use crate::backend::auth::{Identity, Session, SignInProvider};
use crate::frontend::app::Route;
use crate::frontend::services::context::AuthState;
use dioxus::{events::KeyboardEvent, prelude::*};
use dioxus_router::{Navigator, navigator};

/// Loose shape check before handing the address to the backend.
fn is_plausible_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}

/// Builds the identity recorded for `email` signing in through `provider`.
fn identity_for(email: &str, provider: SignInProvider) -> Result<Identity, String> {
    let email = email.trim();
    if !is_plausible_email(email) {
        return Err("Enter a valid email address".to_string());
    }
    Ok(Identity::new(email, provider).with_email(email))
}

fn submit(
    session: Session,
    email: &str,
    provider: SignInProvider,
    nav: Navigator,
    mut error: Signal<Option<String>>,
) {
    let identity = match identity_for(email, provider) {
        Ok(identity) => identity,
        Err(message) => {
            error.set(Some(message));
            return;
        }
    };

    spawn(async move {
        match session.sign_in(identity).await {
            Ok(()) => {
                nav.push(Route::Home {});
            }
            Err(e) => {
                log::error!("Sign-in via {provider} failed: {e}");
                error.set(Some(e.to_string()));
            }
        }
    });
}

#[component]
pub fn Login() -> Element {
    let nav = navigator();
    let auth = use_context::<AuthState>();
    let session = use_context::<Session>();
    let mut email = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    // Already signed in, nothing to do here
    if auth.is_authenticated() {
        nav.replace(Route::Home {});
        return rsx! { div {} };
    }

    let password_session = session.clone();
    let on_keydown = move |e: KeyboardEvent| {
        if e.key() == Key::Enter {
            submit(
                password_session.clone(),
                &email.read(),
                SignInProvider::Password,
                nav,
                error,
            );
        }
    };

    rsx! {
        section { class: "login",
            h1 { "Sign in" }
            input {
                class: "login-input",
                r#type: "email",
                value: "{email}",
                placeholder: "you@example.com",
                autofocus: true,
                oninput: move |e| {
                    email.set(e.value());
                    error.set(None);
                },
                onkeydown: on_keydown,
            }
            button {
                class: "login-google",
                onclick: move |_| {
                    submit(session.clone(), &email.read(), SignInProvider::Google, nav, error);
                },
                "Continue with Google"
            }
            if let Some(message) = error() {
                div { class: "error-message error-visible", "{message}" }
            }
        }
    }
}
