//! Client-side routing: the route table, the navigation guard and the router
//! that ties them to the current identity.

pub mod error;
pub mod guard;
pub mod router;
pub mod table;

pub use error::RouteError;
pub use guard::{Decision, NavigationGuard, NavigationPhase};
pub use router::{ActiveRoute, NavigationRequest, Router, Transition};
pub use table::{PathPattern, ResolvedRoute, RouteDefinition, RouteParams, RouteTable, names};
