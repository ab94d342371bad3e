//! Layout components.

pub mod guard;
pub mod nav;

pub use guard::RequiresAuth;
pub use nav::Navigation;
