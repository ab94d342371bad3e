//! Frontend module for the Inmo Portal application.

pub mod app;
pub mod components;
pub mod pages;
pub mod services;
