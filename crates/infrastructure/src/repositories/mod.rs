//! Repository implementations of the application ports.
//!
//! PostgreSQL-backed persistence for jobs, candidates, and shortlist
//! entries. Row mapping keeps the analysis and summary payloads as JSONB and
//! denormalizes the match score into its own column for ranked queries.

mod candidate_repository;
mod job_repository;
mod shortlist_repository;

pub use candidate_repository::PgCandidateRepository;
pub use job_repository::PgJobRepository;
pub use shortlist_repository::PgShortlistRepository;

use cv_screen_application::ApplicationError;

/// Map a sqlx error into an application error.
pub(crate) fn db_err(error: sqlx::Error) -> ApplicationError {
    ApplicationError::from(crate::Error::Database(error))
}

/// Map a serde_json error into an application error.
pub(crate) fn json_err(error: serde_json::Error) -> ApplicationError {
    ApplicationError::from(crate::Error::Serialization(error))
}
