//! Headless router: owns the active route and runs the guard on every attempt.
//! The desktop shell drives one from its `RequiresAuth` layout.
//!
//! Navigations are handled one at a time through `&mut self`. An attempt ends
//! as allowed or redirected, except while identity is still unknown, where a
//! protected target is held as the single pending request until [`Router::resume`].

use super::guard::{Decision, NavigationGuard, NavigationPhase};
use super::table::{RouteDefinition, RouteParams, RouteTable, names};
use super::RouteError;
use crate::backend::auth::{AuthProvider, AuthStatus};

/// The route currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRoute {
    pub name: String,
    pub view: String,
    pub path: String,
    pub params: RouteParams,
}

/// A resolved navigation attempt, alive until the guard decides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub definition: RouteDefinition,
    pub path: String,
    pub params: RouteParams,
}

impl NavigationRequest {
    fn into_active(self) -> ActiveRoute {
        ActiveRoute {
            name: self.definition.name().to_string(),
            view: self.definition.view().to_string(),
            path: self.path,
            params: self.params,
        }
    }
}

/// Outcome of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The target is active. `changed` is false when it already was.
    Allowed { route: ActiveRoute, changed: bool },
    /// The target was discarded and the login route is active.
    Redirected { discarded: String, route: ActiveRoute },
    /// Waiting for session restoration.
    Deferred { path: String },
}

impl Transition {
    pub fn phase(&self) -> NavigationPhase {
        match self {
            Self::Allowed { .. } => NavigationPhase::Allowed,
            Self::Redirected { .. } => NavigationPhase::Redirected,
            Self::Deferred { .. } => NavigationPhase::Deferred,
        }
    }

    pub fn route(&self) -> Option<&ActiveRoute> {
        match self {
            Self::Allowed { route, .. } | Self::Redirected { route, .. } => Some(route),
            Self::Deferred { .. } => None,
        }
    }
}

pub struct Router<A> {
    table: RouteTable,
    guard: NavigationGuard,
    login: RouteDefinition,
    auth: A,
    active: Option<ActiveRoute>,
    pending: Option<NavigationRequest>,
}

impl<A: AuthProvider> Router<A> {
    /// Creates a router redirecting anonymous visitors to the `login` route.
    pub fn new(table: RouteTable, auth: A) -> Result<Self, RouteError> {
        Self::with_guard(table, auth, NavigationGuard::new(names::LOGIN))
    }

    pub fn with_guard(
        table: RouteTable,
        auth: A,
        guard: NavigationGuard,
    ) -> Result<Self, RouteError> {
        let login = table
            .get(guard.login_route())
            .cloned()
            .ok_or_else(|| RouteError::MissingLoginRoute(guard.login_route().to_string()))?;
        if login.pattern().params().next().is_some() || login.requires_auth() {
            return Err(RouteError::InvalidPattern {
                pattern: login.pattern().to_string(),
                reason: "login route must be public and take no parameters",
            });
        }

        Ok(Self {
            table,
            guard,
            login,
            auth,
            active: None,
            pending: None,
        })
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    pub fn active(&self) -> Option<&ActiveRoute> {
        self.active.as_ref()
    }

    pub fn pending(&self) -> Option<&NavigationRequest> {
        self.pending.as_ref()
    }

    /// Navigates to a path using the current identity snapshot.
    ///
    /// Any earlier pending request is superseded. Unknown paths leave the
    /// active route untouched.
    pub fn navigate(&mut self, path: &str) -> Result<Transition, RouteError> {
        let request = self.request(path)?;
        let status = self.auth.current_identity();
        Ok(self.decide(request, &status))
    }

    /// Navigates to a named route, filling its parameters.
    pub fn navigate_to(
        &mut self,
        name: &str,
        params: &RouteParams,
    ) -> Result<Transition, RouteError> {
        let path = self.table.href(name, params).inspect_err(|_| self.supersede(name))?;
        self.navigate(&path)
    }

    /// Like [`Router::navigate`], but waits for session restoration before
    /// deciding on a protected target.
    pub async fn navigate_settled(&mut self, path: &str) -> Result<Transition, RouteError> {
        let request = self.request(path)?;
        let status = if request.definition.requires_auth() {
            self.auth.settled().await
        } else {
            self.auth.current_identity()
        };
        Ok(self.decide(request, &status))
    }

    /// Decides the pending request once identity is known.
    pub fn resume(&mut self) -> Option<Transition> {
        self.pending.as_ref()?;
        let status = self.auth.current_identity();
        if !status.is_settled() {
            return None;
        }

        let request = self.pending.take()?;
        Some(self.decide(request, &status))
    }

    /// Starts a navigation attempt. Whatever was pending is dropped, even when
    /// the new path turns out not to exist.
    fn request(&mut self, path: &str) -> Result<NavigationRequest, RouteError> {
        log::debug!("{}: {path}", NavigationPhase::Requested);
        self.supersede(path);
        let resolved = self.table.resolve(path)?;
        Ok(NavigationRequest {
            definition: resolved.definition.clone(),
            path: resolved.path,
            params: resolved.params,
        })
    }

    fn supersede(&mut self, path: &str) {
        if let Some(previous) = self.pending.take() {
            log::debug!("{} superseded by {path}", previous.path);
        }
    }

    fn decide(&mut self, request: NavigationRequest, status: &AuthStatus) -> Transition {
        log::debug!("{}: {} as {status}", NavigationPhase::Checking, request.path);

        match self.guard.check(&request.definition, status) {
            Decision::Allow => {
                self.pending = None;
                let route = request.into_active();
                let changed = self.commit(route.clone());
                Transition::Allowed { route, changed }
            }
            Decision::Redirect { to } => {
                self.pending = None;
                log::info!("{} is protected, redirecting to {to}", request.path);
                let route = ActiveRoute {
                    name: self.login.name().to_string(),
                    view: self.login.view().to_string(),
                    path: self.login.pattern().to_string(),
                    params: RouteParams::default(),
                };
                self.commit(route.clone());
                Transition::Redirected {
                    discarded: request.path,
                    route,
                }
            }
            Decision::Defer => {
                let path = request.path.clone();
                self.pending = Some(request);
                log::debug!("{}: {path}", NavigationPhase::Deferred);
                Transition::Deferred { path }
            }
        }
    }

    fn commit(&mut self, route: ActiveRoute) -> bool {
        if self.active.as_ref() == Some(&route) {
            return false;
        }
        log::info!("Active route: {} ({})", route.name, route.path);
        self.active = Some(route);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::{Identity, Session, SignInProvider};
    use std::time::Duration;

    fn router(status: AuthStatus) -> Router<AuthStatus> {
        Router::new(RouteTable::standard().unwrap(), status).unwrap()
    }

    fn signed_in(uid: &str) -> AuthStatus {
        AuthStatus::Authenticated(Identity::new(uid, SignInProvider::Google))
    }

    fn active_name<A: AuthProvider>(router: &Router<A>) -> Option<&str> {
        router.active().map(|r| r.name.as_str())
    }

    #[test]
    fn anonymous_reaches_public_routes() {
        let table = RouteTable::standard().unwrap();
        for route in table.iter().filter(|r| !r.requires_auth()) {
            let mut router = router(AuthStatus::Anonymous);
            let path = table
                .href(route.name(), &RouteParams::from([("category", "houses"), ("id", "1")]))
                .unwrap();
            let transition = router.navigate(&path).unwrap();
            assert_eq!(transition.phase(), NavigationPhase::Allowed);
            assert_eq!(active_name(&router), Some(route.name()));
        }
    }

    #[test]
    fn anonymous_is_redirected_from_protected_routes() {
        for path in ["/profile", "/alta-inmueble"] {
            let mut router = router(AuthStatus::Anonymous);
            let transition = router.navigate(path).unwrap();
            assert_eq!(transition.phase(), NavigationPhase::Redirected);
            assert!(matches!(&transition, Transition::Redirected { discarded, .. } if discarded == path));
            assert_eq!(active_name(&router), Some(names::LOGIN));
            assert_eq!(router.active().unwrap().path, "/login");
            assert!(router.pending().is_none());
        }
    }

    #[test]
    fn signed_in_reaches_protected_routes() {
        let mut router = router(signed_in("u1"));
        router.navigate("/alta-inmueble").unwrap();
        assert_eq!(active_name(&router), Some(names::ALTA_INMUEBLE));

        router.navigate("/profile").unwrap();
        assert_eq!(active_name(&router), Some(names::PROFILE));
    }

    #[test]
    fn offers_are_public() {
        let mut router = router(AuthStatus::Anonymous);
        router.navigate("/offers").unwrap();
        assert_eq!(active_name(&router), Some(names::OFFERS));
    }

    #[test]
    fn repeated_navigation_is_a_no_op() {
        let mut router = router(AuthStatus::Anonymous);
        let first = router.navigate("/category/houses").unwrap();
        assert!(matches!(first, Transition::Allowed { changed: true, .. }));
        let before = router.active().cloned();

        let second = router.navigate("/category/houses").unwrap();
        assert!(matches!(second, Transition::Allowed { changed: false, .. }));
        assert_eq!(router.active().cloned(), before);

        let third = router.navigate("/category/flats").unwrap();
        assert!(matches!(third, Transition::Allowed { changed: true, .. }));
    }

    #[test]
    fn params_reach_the_active_route() {
        let mut router = router(AuthStatus::Anonymous);
        router.navigate("/property/42").unwrap();
        let active = router.active().unwrap();
        assert_eq!(active.name, names::PROPERTY_DETAIL);
        assert_eq!(active.view, "PropertyDetail");
        assert_eq!(active.params, RouteParams::from([("id", "42")]));
    }

    #[test]
    fn unknown_path_keeps_active_route() {
        let mut router = router(AuthStatus::Anonymous);
        router.navigate("/offers").unwrap();
        assert_eq!(
            router.navigate("/unknown-path"),
            Err(RouteError::NotFound("/unknown-path".to_string()))
        );
        assert_eq!(active_name(&router), Some(names::OFFERS));
    }

    #[test]
    fn named_navigation_fills_params() {
        let mut router = router(AuthStatus::Anonymous);
        router
            .navigate_to(names::CATEGORY, &RouteParams::from([("category", "houses")]))
            .unwrap();
        assert_eq!(router.active().unwrap().path, "/category/houses");
    }

    #[test]
    fn table_without_login_is_rejected() {
        let table = RouteTable::new(vec![RouteDefinition::new("/", "home", "Home").unwrap()]).unwrap();
        assert!(matches!(
            Router::new(table, AuthStatus::Anonymous),
            Err(RouteError::MissingLoginRoute(_))
        ));
    }

    #[test]
    fn unknown_identity_defers_only_protected_routes() {
        let mut router = router(AuthStatus::Unknown);
        router.navigate("/offers").unwrap();
        assert_eq!(active_name(&router), Some(names::OFFERS));

        let transition = router.navigate("/profile").unwrap();
        assert_eq!(transition, Transition::Deferred { path: "/profile".to_string() });
        assert_eq!(active_name(&router), Some(names::OFFERS));
        assert_eq!(router.pending().unwrap().path, "/profile");
        assert_eq!(router.resume(), None);
    }

    #[tokio::test]
    async fn pending_request_resumes_after_restoration() {
        let session = Session::new(None);
        let mut router = Router::new(RouteTable::standard().unwrap(), session.clone()).unwrap();

        router.navigate("/profile").unwrap();
        router.navigate("/alta-inmueble").unwrap();
        assert_eq!(router.pending().unwrap().path, "/alta-inmueble");

        session
            .sign_in(Identity::new("u1", SignInProvider::Google))
            .await
            .unwrap();
        let transition = router.resume().unwrap();
        assert_eq!(transition.phase(), NavigationPhase::Allowed);
        assert_eq!(active_name(&router), Some(names::ALTA_INMUEBLE));
        assert!(router.pending().is_none());
        assert_eq!(router.resume(), None);
    }

    #[tokio::test]
    async fn pending_request_redirects_when_restored_anonymous() {
        let session = Session::new(None);
        let mut router = Router::new(RouteTable::standard().unwrap(), session.clone()).unwrap();

        router.navigate("/profile").unwrap();
        session.restore().await;
        let transition = router.resume().unwrap();
        assert_eq!(transition.phase(), NavigationPhase::Redirected);
        assert_eq!(active_name(&router), Some(names::LOGIN));
    }

    #[tokio::test]
    async fn failed_navigation_drops_pending_request() {
        let session = Session::new(None);
        let mut router = Router::new(RouteTable::standard().unwrap(), session.clone()).unwrap();

        router.navigate("/offers").unwrap();
        router.navigate("/profile").unwrap();
        assert!(router.pending().is_some());

        assert!(router.navigate("/unknown-path").is_err());
        assert!(router.pending().is_none());

        router.navigate("/profile").unwrap();
        assert!(router.navigate_to(names::PROPERTY_DETAIL, &RouteParams::default()).is_err());
        assert!(router.pending().is_none());

        session
            .sign_in(Identity::new("u1", SignInProvider::Google))
            .await
            .unwrap();
        assert_eq!(router.resume(), None);
        assert_eq!(active_name(&router), Some(names::OFFERS));
    }

    #[tokio::test]
    async fn public_navigation_drops_pending_request() {
        let session = Session::new(None);
        let mut router = Router::new(RouteTable::standard().unwrap(), session.clone()).unwrap();

        router.navigate("/profile").unwrap();
        router.navigate("/offers").unwrap();
        assert!(router.pending().is_none());

        session.restore().await;
        assert_eq!(router.resume(), None);
        assert_eq!(active_name(&router), Some(names::OFFERS));
    }

    #[tokio::test]
    async fn settled_navigation_waits_for_identity() {
        let session = Session::new(None);
        let mut router = Router::new(RouteTable::standard().unwrap(), session.clone()).unwrap();

        let restorer = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            session
                .sign_in(Identity::new("u1", SignInProvider::Password))
                .await
                .unwrap();
        });

        let transition = tokio::time::timeout(
            Duration::from_secs(1),
            router.navigate_settled("/profile"),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(transition.phase(), NavigationPhase::Allowed);
        assert_eq!(active_name(&router), Some(names::PROFILE));
        restorer.await.unwrap();
    }
}
