//! REST API for the CV-Screen platform.
//!
//! Serves the two navigable pages (`/` and `/cv-analysis`), health probes,
//! and the `/api/v1` surface for jobs, candidates, shortlisting, and
//! interview scheduling.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod routes;
pub mod state;

pub use app::create_app;
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
