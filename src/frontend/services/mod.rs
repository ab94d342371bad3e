//! Frontend services for state shared between components.

pub mod context;

pub use context::AuthState;
