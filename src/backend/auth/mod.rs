//! Authentication state as seen by the router.
//!
//! Identity is owned by the hosted backend. This module only describes the
//! snapshot the router reads and the seam through which it is injected.

pub mod session;

pub use session::{Session, SessionError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::str::FromStr;

/// Sign-in methods enabled on the hosted backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignInProvider {
    Google,
    Password,
}

impl SignInProvider {
    pub const ALL: [Self; 2] = [Self::Google, Self::Password];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for SignInProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignInProvider {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "password" => Ok(Self::Password),
            other => Err(SessionError::UnknownProvider(other.to_string())),
        }
    }
}

/// An authenticated user handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub provider: SignInProvider,
    pub signed_in_at: DateTime<Utc>,
}

impl Identity {
    pub fn new(uid: impl Into<String>, provider: SignInProvider) -> Self {
        Self {
            uid: uid.into(),
            display_name: None,
            email: None,
            provider,
            signed_in_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Name to show in the UI, falling back to email and then uid.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.uid)
    }
}

/// Current identity as reported by the authentication collaborator.
///
/// `Unknown` lasts until session restoration finishes at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    Unknown,
    Anonymous,
    Authenticated(Identity),
}

impl AuthStatus {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Unknown | Self::Anonymous => None,
        }
    }

    /// Whether restoration has completed, whatever its result.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for AuthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            Self::Anonymous => f.write_str("anonymous"),
            Self::Authenticated(identity) => write!(f, "authenticated({})", identity.uid),
        }
    }
}

/// Read-only access to the current identity, injected into the router.
pub trait AuthProvider {
    /// Snapshot of the identity at this moment.
    fn current_identity(&self) -> AuthStatus;

    /// Resolves once the status is no longer [`AuthStatus::Unknown`].
    ///
    /// Providers without a restoration phase answer immediately.
    fn settled(&self) -> impl Future<Output = AuthStatus> {
        std::future::ready(self.current_identity())
    }
}

/// A fixed snapshot, useful when identity never changes.
impl AuthProvider for AuthStatus {
    fn current_identity(&self) -> AuthStatus {
        self.clone()
    }
}
