//! Navigation guard for protected routes.

use super::table::{RouteDefinition, names};
use crate::backend::auth::AuthStatus;
use std::fmt;

/// What the guard decided for one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Send the visitor to the named route instead.
    Redirect { to: String },
    /// Identity is still being restored; hold the navigation.
    Defer,
}

/// Phases a navigation attempt goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPhase {
    Requested,
    Checking,
    Allowed,
    Redirected,
    Deferred,
}

impl fmt::Display for NavigationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Requested => "requested",
            Self::Checking => "checking",
            Self::Allowed => "allowed",
            Self::Redirected => "redirected",
            Self::Deferred => "deferred",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationGuard {
    login_route: String,
}

impl NavigationGuard {
    pub fn new(login_route: impl Into<String>) -> Self {
        Self {
            login_route: login_route.into(),
        }
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    pub fn check(&self, target: &RouteDefinition, status: &AuthStatus) -> Decision {
        if !target.requires_auth() {
            return Decision::Allow;
        }

        match status {
            AuthStatus::Authenticated(_) => Decision::Allow,
            AuthStatus::Anonymous => Decision::Redirect {
                to: self.login_route.clone(),
            },
            AuthStatus::Unknown => Decision::Defer,
        }
    }
}

impl Default for NavigationGuard {
    fn default() -> Self {
        Self::new(names::LOGIN)
    }
}
