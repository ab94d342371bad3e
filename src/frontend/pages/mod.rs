//! Pages, one per route.

pub mod account;
pub mod home;
pub mod listings;
pub mod login;
pub mod not_found;

pub use account::{AltaInmueble, Profile};
pub use home::Home;
pub use listings::{Category, Offers, PropertyDetail};
pub use login::Login;
pub use not_found::NotFound;
