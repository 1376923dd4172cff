//! API v1 routes.

use crate::state::AppState;
use axum::Router;

pub mod candidates;
pub mod jobs;
pub mod shortlist;

/// Create all v1 API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(jobs::routes())
        .merge(candidates::routes())
        .merge(shortlist::routes())
}
