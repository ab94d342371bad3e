//! Authentication context and state management.

use crate::backend::auth::{AuthProvider, AuthStatus, Identity};
use dioxus::prelude::*;

/// Reactive view of the session for components.
#[derive(Clone, Copy)]
pub struct AuthState {
    pub status: Signal<AuthStatus>,
}

impl AuthState {
    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.status.read().identity().is_some()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.status.read().identity().cloned()
    }

    /// Gets the current user's label or returns "Guest" as default.
    pub fn get_username(&self) -> String {
        self.status
            .read()
            .identity()
            .map_or_else(|| "Guest".to_string(), |user| user.label().to_string())
    }
}

/// Lets the router read identity straight from the signal, so a layout that
/// navigates during render re-renders when the session changes.
impl AuthProvider for AuthState {
    fn current_identity(&self) -> AuthStatus {
        self.status.read().clone()
    }
}
