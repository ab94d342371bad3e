//! Desktop shell of a real-estate listing service.
//!
//! `backend` holds the route table, the navigation guard, the session cache
//! and configuration. `frontend` binds them to Dioxus views.

pub mod backend;
pub mod frontend;
