//! Backend of the application.

pub mod auth;
pub mod routing;
pub mod utils;
