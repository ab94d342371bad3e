//! Routing errors.

/// Errors raised while building the route table or resolving a path.
///
/// An anonymous visitor hitting a protected page is not an error; the guard
/// turns that into a redirect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("no route matches {0}")]
    NotFound(String),
    #[error("route name {0} is used more than once")]
    DuplicateName(String),
    #[error("pattern {pattern} collides with {existing}")]
    PatternCollision { pattern: String, existing: String },
    #[error("invalid pattern {pattern}: {reason}")]
    InvalidPattern {
        pattern: String,
        reason: &'static str,
    },
    #[error("route table has no {0} route to redirect to")]
    MissingLoginRoute(String),
    #[error("route {route} needs a value for :{param}")]
    MissingParam { route: String, param: String },
}
