//! Local cache of the signed-in identity.
//!
//! The status starts as `Unknown` and is published through a `watch` channel so
//! the router and the UI both observe restoration and sign-in/out.

use super::{AuthProvider, AuthStatus, Identity, SignInProvider};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::watch;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),
    #[error("unknown sign-in provider: {0}")]
    UnknownProvider(String),
    #[error("sign-in provider {0} is not enabled")]
    ProviderDisabled(SignInProvider),
    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    identity: Identity,
}

/// Shared handle to the session. Clones observe the same status.
#[derive(Debug, Clone)]
pub struct Session {
    state: Arc<watch::Sender<AuthStatus>>,
    store: Option<PathBuf>,
    providers: Arc<[SignInProvider]>,
}

impl Session {
    /// Creates a session persisted at `store`, or kept in memory when `None`.
    pub fn new(store: Option<PathBuf>) -> Self {
        Self {
            state: Arc::new(watch::Sender::new(AuthStatus::Unknown)),
            store,
            providers: SignInProvider::ALL.into(),
        }
    }

    /// Restricts sign-in to the given providers.
    #[must_use]
    pub fn with_providers(mut self, providers: impl IntoIterator<Item = SignInProvider>) -> Self {
        self.providers = providers.into_iter().collect();
        self
    }

    pub fn store_path(&self) -> Option<&Path> {
        self.store.as_deref()
    }

    pub fn status(&self) -> AuthStatus {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.state.subscribe()
    }

    /// Reads the persisted session and leaves the `Unknown` state.
    ///
    /// A missing or unreadable file restores as anonymous. A sign-in or
    /// sign-out that happened first wins over the stored value.
    pub async fn restore(&self) -> AuthStatus {
        let restored = match self.load().await {
            Ok(Some(identity)) => {
                log::info!("Restored session for {}", identity.uid);
                AuthStatus::Authenticated(identity)
            }
            Ok(None) => AuthStatus::Anonymous,
            Err(e) => {
                log::warn!("Discarding stored session: {e}");
                AuthStatus::Anonymous
            }
        };

        self.state.send_if_modified(|current| {
            if current.is_settled() {
                return false;
            }
            *current = restored;
            true
        });
        self.status()
    }

    /// Records a signed-in identity and persists it.
    pub async fn sign_in(&self, identity: Identity) -> Result<(), SessionError> {
        let uid = identity.uid.trim();
        if uid.is_empty() || uid.len() != identity.uid.len() {
            return Err(SessionError::InvalidIdentity(format!(
                "uid {:?} must be non-empty without surrounding whitespace",
                identity.uid
            )));
        }
        if !self.providers.contains(&identity.provider) {
            return Err(SessionError::ProviderDisabled(identity.provider));
        }

        if let Some(path) = &self.store {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).await?;
            }
            let json = serde_json::to_string_pretty(&StoredSession {
                identity: identity.clone(),
            })?;
            fs::write(path, json).await?;
        }

        log::info!("Signed in {} via {}", identity.uid, identity.provider);
        self.state.send_replace(AuthStatus::Authenticated(identity));
        Ok(())
    }

    /// Forgets the identity and removes the persisted session.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        if let Some(path) = &self.store {
            match fs::remove_file(path).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        log::info!("Signed out");
        self.state.send_replace(AuthStatus::Anonymous);
        Ok(())
    }

    async fn load(&self) -> Result<Option<Identity>, SessionError> {
        let Some(path) = &self.store else {
            return Ok(None);
        };

        let json = match fs::read_to_string(path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredSession = serde_json::from_str(&json)?;
        Ok(Some(stored.identity))
    }
}

impl AuthProvider for Session {
    fn current_identity(&self) -> AuthStatus {
        self.status()
    }

    fn settled(&self) -> impl Future<Output = AuthStatus> {
        let mut rx = self.subscribe();
        async move {
            if rx.wait_for(AuthStatus::is_settled).await.is_err() {
                log::debug!("Session dropped before restoration finished");
            }
            rx.borrow().clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn temp_store(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("inmo-portal-{}-{name}", std::process::id()))
            .join("session.json")
    }

    #[tokio::test]
    async fn starts_unknown_and_restores_anonymous_without_file() {
        let session = Session::new(Some(temp_store("missing")));
        assert_eq!(session.status(), AuthStatus::Unknown);
        assert_eq!(session.restore().await, AuthStatus::Anonymous);
    }

    #[tokio::test]
    async fn sign_in_persists_for_next_restore() {
        let path = temp_store("persist");
        let session = Session::new(Some(path.clone()));
        let identity = Identity::new("u1", SignInProvider::Google).with_email("u1@example.com");
        session.sign_in(identity.clone()).await.unwrap();
        assert_eq!(session.status(), AuthStatus::Authenticated(identity.clone()));

        let next_start = Session::new(Some(path.clone()));
        assert_eq!(next_start.restore().await, AuthStatus::Authenticated(identity));

        next_start.sign_out().await.unwrap();
        assert!(!path.exists());
        assert_eq!(next_start.status(), AuthStatus::Anonymous);

        let after_sign_out = Session::new(Some(path.clone()));
        assert_eq!(after_sign_out.restore().await, AuthStatus::Anonymous);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn corrupt_file_restores_anonymous() {
        let path = temp_store("corrupt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        let session = Session::new(Some(path.clone()));
        assert_eq!(session.restore().await, AuthStatus::Anonymous);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn restore_does_not_override_earlier_sign_in() {
        let session = Session::new(None);
        let identity = Identity::new("u1", SignInProvider::Password);
        session.sign_in(identity.clone()).await.unwrap();
        assert_eq!(session.restore().await, AuthStatus::Authenticated(identity));
    }

    #[tokio::test]
    async fn rejects_blank_uid_and_disabled_provider() {
        let session = Session::new(None).with_providers([SignInProvider::Google]);
        assert!(matches!(
            session.sign_in(Identity::new("  ", SignInProvider::Google)).await,
            Err(SessionError::InvalidIdentity(_))
        ));
        assert!(matches!(
            session.sign_in(Identity::new("u1", SignInProvider::Password)).await,
            Err(SessionError::ProviderDisabled(SignInProvider::Password))
        ));
        assert_eq!(session.status(), AuthStatus::Unknown);
    }

    #[tokio::test]
    async fn settled_waits_for_restoration() {
        let session = Session::new(None);
        let waiter = session.settled();
        tokio::pin!(waiter);

        let early = tokio::time::timeout(Duration::from_millis(20), &mut waiter).await;
        assert!(early.is_err());

        session.restore().await;
        let status = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap();
        assert_eq!(status, AuthStatus::Anonymous);
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let session = Session::new(None);
        let mut rx = session.subscribe();
        session.restore().await;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), AuthStatus::Anonymous);
    }
}
