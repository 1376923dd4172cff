//! Infrastructure layer for CV-Screen
//!
//! This crate provides implementations for:
//! - Database access (PostgreSQL with sqlx)
//! - Repository implementations of the application ports
//! - The Ollama chat client behind the application's model port
//! - Object storage (S3) for archived CV documents
//!
//! ## Architecture
//!
//! The infrastructure layer implements the ports declared by the
//! application crate, so every repository and client here is reachable from
//! the services that drive it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cv_screen_infrastructure::{
//!     database::{DatabaseConfig, DatabasePool},
//!     repositories::PgJobRepository,
//!     llm::{OllamaClient, OllamaConfig},
//! };
//!
//! // Initialize database pool
//! let db_config = DatabaseConfig::from_env()?;
//! let pool = DatabasePool::new(&db_config).await?;
//!
//! // Create repository
//! let job_repo = PgJobRepository::new(pool.pool().clone());
//! ```

pub mod database;
pub mod llm;
pub mod repositories;
pub mod storage;

// Re-export commonly used types
pub use database::{DatabaseConfig, DatabasePool, HealthStatus, PoolStats};
pub use llm::{OllamaClient, OllamaConfig};
pub use repositories::{PgCandidateRepository, PgJobRepository, PgShortlistRepository};
pub use storage::{DocumentStorage, ObjectInfo, S3Storage, StorageConfig};

/// Infrastructure result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Infrastructure-level errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database errors from sqlx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Storage errors from S3 operations
    #[error("Storage error: {0}")]
    Storage(String),

    /// Model endpoint errors
    #[error("Model endpoint error: {0}")]
    Llm(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Resource not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Timeout errors
    #[error("Timeout: {0}")]
    Timeout(String),
}

impl Error {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Database(_) | Error::Llm(_) | Error::Timeout(_)
        )
    }

    /// Get HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound(_) => 404,
            Error::Configuration(_) => 400,
            Error::Serialization(_) => 400,
            Error::Database(_) | Error::Storage(_) => 503,
            Error::Llm(_) | Error::Timeout(_) => 502,
        }
    }
}

impl From<Error> for cv_screen_application::ApplicationError {
    fn from(error: Error) -> Self {
        use cv_screen_application::ApplicationError;
        match error {
            Error::NotFound(message) => ApplicationError::NotFound(message),
            Error::Configuration(message) => ApplicationError::InvalidInput(message),
            Error::Serialization(e) => ApplicationError::Internal(e.to_string()),
            Error::Timeout(message) => ApplicationError::Timeout(message),
            other => ApplicationError::ServiceUnavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let db_err = Error::Database(sqlx::Error::PoolTimedOut);
        assert!(db_err.is_retryable());

        let not_found = Error::NotFound("test".to_string());
        assert!(!not_found.is_retryable());
    }

    #[test]
    fn test_error_http_status() {
        let not_found = Error::NotFound("test".to_string());
        assert_eq!(not_found.http_status(), 404);

        let llm = Error::Llm("model offline".to_string());
        assert_eq!(llm.http_status(), 502);
    }

    #[test]
    fn test_conversion_to_application_error() {
        use cv_screen_application::ApplicationError;

        let err: ApplicationError = Error::NotFound("job".to_string()).into();
        assert!(matches!(err, ApplicationError::NotFound(_)));

        let err: ApplicationError = Error::Llm("offline".to_string()).into();
        assert!(err.is_retryable());
    }
}
