//! Error types for the CV-Screen domain.
//!
//! This module defines a comprehensive error hierarchy for all domain
//! operations, providing structured error information with HTTP status codes
//! and error codes for API responses.

use crate::identifiers::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level application error type
///
/// This enum encompasses all possible error types that can occur within the
/// application, providing a unified error handling mechanism.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Job-related errors
    #[error("Job error: {0}")]
    Job(#[from] JobError),

    /// Candidate-related errors
    #[error("Candidate error: {0}")]
    Candidate(#[from] CandidateError),

    /// Shortlist-related errors
    #[error("Shortlist error: {0}")]
    Shortlist(#[from] ShortlistError),

    /// CV analysis errors (LLM boundary)
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Validation-related errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for this error
    ///
    /// Error codes are used in API responses for programmatic error handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Job(_) => "JOB_ERROR",
            Self::Candidate(_) => "CANDIDATE_ERROR",
            Self::Shortlist(_) => "SHORTLIST_ERROR",
            Self::Analysis(_) => "ANALYSIS_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Job(JobError::NotFound(_)) => 404,
            Self::Candidate(CandidateError::NotFound(_)) => 404,
            Self::Shortlist(ShortlistError::NotFound(_)) => 404,
            Self::Analysis(_) => 502,
            Self::Database(_) => 503,
            Self::Internal(_) => 500,
            _ => 400,
        }
    }

    /// Check if this error is retryable
    ///
    /// Retryable errors are typically transient issues like database
    /// connection failures or model endpoint timeouts.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Analysis(AnalysisError::ModelUnavailable(_))
        )
    }
}

/// Job-specific errors
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    /// Job not found
    #[error("Job not found: {0}")]
    NotFound(JobId),

    /// Import file could not be read
    #[error("Import file unreadable: {0}")]
    UnreadableImport(String),

    /// Import file is missing required columns
    #[error("Missing required columns: {0:?}")]
    MissingColumns(Vec<String>),

    /// Import file produced no jobs
    #[error("Import produced no jobs")]
    EmptyImport,
}

/// Candidate-specific errors
#[derive(Debug, thiserror::Error)]
pub enum CandidateError {
    /// Candidate not found
    #[error("Candidate not found: {0}")]
    NotFound(CandidateId),

    /// CV text is empty after extraction
    #[error("CV text is empty")]
    EmptyCv,

    /// No candidate ids were given for a bulk operation
    #[error("No candidates specified")]
    NoneSpecified,
}

/// Shortlist-specific errors
#[derive(Debug, thiserror::Error)]
pub enum ShortlistError {
    /// Shortlist entry not found
    #[error("Shortlist entry not found: {0}")]
    NotFound(ShortlistEntryId),

    /// Candidate already shortlisted for this job
    #[error("Candidate already shortlisted")]
    AlreadyShortlisted,

    /// Interview status transition not allowed
    #[error("Interview status transition not allowed: {from:?} -> {to:?}")]
    InvalidStatusTransition {
        /// Status the entry is currently in
        from: crate::shortlist::InterviewStatus,
        /// Status the transition targeted
        to: crate::shortlist::InterviewStatus,
    },
}

/// CV analysis errors (model boundary)
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The model endpoint could not be reached
    #[error("Model endpoint unavailable: {0}")]
    ModelUnavailable(String),

    /// The model reply contained no parseable JSON
    #[error("Unparseable model reply: {0}")]
    UnparseableReply(String),

    /// The configured score weights are invalid
    #[error("Invalid score weights: {0}")]
    InvalidWeights(String),
}

/// Validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Field validation failed
    #[error("Field validation failed: {field} - {message}")]
    FieldValidation {
        /// Field that failed validation
        field: String,
        /// Description of the failure
        message: String,
    },

    /// Multiple validation errors
    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<String>),
}

/// Database errors
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Connection pool exhausted
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Query execution failed
    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    /// Transaction failed
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Standardized API error response
///
/// This structure is returned in API responses to provide
/// consistent error information to clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetail,

    /// Unique request identifier for tracing
    pub request_id: String,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

/// Detailed error information
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorDetail {
                code: error.error_code().to_string(),
                message: error.to_string(),
                details: None,
            },
            request_id: String::new(), // Set by middleware
            timestamp: Utc::now(),
        }
    }
}

/// Application-wide result type
pub type AppResult<T> = Result<T, AppError>;

/// Service-specific result types
pub type JobResult<T> = Result<T, JobError>;
/// Result alias for candidate operations
pub type CandidateResult<T> = Result<T, CandidateError>;
/// Result alias for shortlist operations
pub type ShortlistResult<T> = Result<T, ShortlistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::Job(JobError::NotFound(JobId::new()));
        assert_eq!(err.error_code(), "JOB_ERROR");
        assert_eq!(err.http_status(), 404);

        let err = AppError::Analysis(AnalysisError::ModelUnavailable("refused".to_string()));
        assert_eq!(err.error_code(), "ANALYSIS_ERROR");
        assert_eq!(err.http_status(), 502);
    }

    #[test]
    fn test_retryable() {
        let err = AppError::Database(DatabaseError::PoolExhausted);
        assert!(err.is_retryable());

        let err = AppError::Candidate(CandidateError::EmptyCv);
        assert!(!err.is_retryable());

        let err = AppError::Analysis(AnalysisError::UnparseableReply("not json".to_string()));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_error_response_serialization() {
        let err = AppError::Candidate(CandidateError::NotFound(CandidateId::new()));
        let response = ErrorResponse::from(err);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("CANDIDATE_ERROR"));
    }
}
