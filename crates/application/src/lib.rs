//! Application layer for CV-Screen
//!
//! This crate orchestrates domain logic and coordinates between layers.
//!
//! ## Architecture
//!
//! The application layer sits between the domain and infrastructure layers,
//! providing use case orchestration and business logic coordination.
//!
//! ## Modules
//!
//! - `services` - Business logic services (JobService, CandidateService, ShortlistService)
//! - `analysis` - LLM-backed CV analysis and job summarization
//! - `validation` - Input validation framework

pub mod analysis;
pub mod services;
pub mod validation;

// Re-export commonly used types
pub use analysis::{AnalysisConfig, AnalysisEngine, JobSummarizer, LlmPort};
pub use services::{
    EventPublisher, NoOpEventPublisher, PaginatedResult, Pagination, ServiceConfig,
    ServiceContext, ServiceEvent,
};
pub use validation::Validatable;

// Common error types for the application layer
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug, Clone)]
pub enum ApplicationError {
    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Resource conflict (e.g., duplicate)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// External service unavailable (database, queue, model endpoint)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl ApplicationError {
    /// Get HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            ApplicationError::NotFound(_) => 404,
            ApplicationError::InvalidInput(_) => 400,
            ApplicationError::ValidationFailed(_) => 422,
            ApplicationError::Conflict(_) => 409,
            ApplicationError::Internal(_) => 500,
            ApplicationError::ServiceUnavailable(_) => 503,
            ApplicationError::Timeout(_) => 504,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApplicationError::ServiceUnavailable(_) | ApplicationError::Timeout(_)
        )
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::NotFound(_) => "NOT_FOUND",
            ApplicationError::InvalidInput(_) => "INVALID_INPUT",
            ApplicationError::ValidationFailed(_) => "VALIDATION_FAILED",
            ApplicationError::Conflict(_) => "CONFLICT",
            ApplicationError::Internal(_) => "INTERNAL_ERROR",
            ApplicationError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            ApplicationError::Timeout(_) => "TIMEOUT",
        }
    }
}

/// Application-wide result alias
pub type ApplicationResult<T> = Result<T, ApplicationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_http_status() {
        assert_eq!(ApplicationError::NotFound("test".to_string()).http_status(), 404);
        assert_eq!(ApplicationError::InvalidInput("test".to_string()).http_status(), 400);
        assert_eq!(ApplicationError::ValidationFailed("test".to_string()).http_status(), 422);
        assert_eq!(ApplicationError::Conflict("test".to_string()).http_status(), 409);
        assert_eq!(ApplicationError::Internal("test".to_string()).http_status(), 500);
    }

    #[test]
    fn test_error_retryable() {
        assert!(ApplicationError::ServiceUnavailable("test".to_string()).is_retryable());
        assert!(ApplicationError::Timeout("test".to_string()).is_retryable());
        assert!(!ApplicationError::NotFound("test".to_string()).is_retryable());
        assert!(!ApplicationError::ValidationFailed("test".to_string()).is_retryable());
    }
}
