//! Utility modules for the backend.
//!
//! Path management and configuration loading.

/// Application configuration.
pub mod config;
/// Path utilities for the application directory.
pub mod paths;

pub use config::{AppConfig, BackendConfig};
