//! HTTP route handlers.
//!
//! This module organizes all endpoints: navigable pages, health probes,
//! and the versioned API.

pub mod health;
pub mod pages;
pub mod v1;

pub use health::routes as health_routes;
pub use pages::routes as page_routes;
pub use v1::routes as v1_routes;
