//! Application Services
//!
//! Business logic orchestration layer that coordinates domain operations,
//! repository access, and cross-cutting concerns.

mod candidate;
mod job;
mod shortlist;

pub use candidate::*;
pub use job::*;
pub use shortlist::*;

use crate::ApplicationError;
use async_trait::async_trait;

/// Service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Maximum page size for list operations
    pub max_page_size: u32,
    /// Default page size for list operations
    pub default_page_size: u32,
    /// Match score at or above which candidates are shortlisted
    pub shortlist_threshold: f64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_page_size: 100,
            default_page_size: 20,
            shortlist_threshold: 0.8,
        }
    }
}

/// Pagination parameters for list operations
#[derive(Debug, Clone)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page
    pub page_size: u32,
}

impl Pagination {
    /// Create pagination parameters
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Offset for database queries (0-indexed)
    pub fn offset(&self) -> u64 {
        ((self.page.saturating_sub(1)) * self.page_size) as u64
    }

    /// Limit for database queries
    pub fn limit(&self) -> u32 {
        self.page_size
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
        }
    }
}

/// Paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    /// Items on the current page
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: u64,
    /// Current page number (1-indexed)
    pub page: u32,
    /// Items per page
    pub page_size: u32,
    /// Total number of pages
    pub total_pages: u32,
}

impl<T> PaginatedResult<T> {
    /// Build a result from items, a total count, and the request pagination
    pub fn new(items: Vec<T>, total: u64, pagination: &Pagination) -> Self {
        let total_pages = ((total as f64) / (pagination.page_size as f64)).ceil() as u32;
        Self {
            items,
            total,
            page: pagination.page,
            page_size: pagination.page_size,
            total_pages,
        }
    }

    /// Whether a following page exists
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether a preceding page exists
    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }
}

/// Service context for request handling
///
/// The platform is an internal tool without user accounts, so the context
/// carries only the request correlation id used for tracing.
#[derive(Debug, Clone)]
pub struct ServiceContext {
    /// Request correlation ID for tracing
    pub correlation_id: String,
}

impl ServiceContext {
    /// Create a context for a request
    pub fn new(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
        }
    }
}

/// Service event for event-driven consumers
#[derive(Debug, Clone)]
pub enum ServiceEvent {
    // Job events
    /// Jobs were imported from a file
    JobsImported {
        /// Number of jobs created
        count: usize,
    },
    /// A job summary was produced
    JobSummarized {
        /// Summarized job
        job_id: String,
    },
    /// A job and its dependents were deleted
    JobDeleted {
        /// Deleted job
        job_id: String,
    },

    // Candidate events
    /// A candidate CV was ingested and analyzed
    CandidateAnalyzed {
        /// Analyzed candidate
        candidate_id: String,
        /// Job the candidate was screened against
        job_id: String,
        /// Resulting match score
        match_score: f64,
    },
    /// Candidates were deleted
    CandidatesDeleted {
        /// Number of candidates removed
        count: u64,
    },

    // Shortlist events
    /// A candidate was shortlisted
    CandidateShortlisted {
        /// Shortlisted candidate
        candidate_id: String,
        /// Job shortlisted for
        job_id: String,
    },
    /// Interview slots were assigned
    InterviewsScheduled {
        /// Job the interviews belong to
        job_id: String,
        /// Number of interviews scheduled
        count: usize,
    },
}

/// Event publisher trait for service events
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event
    async fn publish(&self, event: ServiceEvent) -> Result<(), ApplicationError>;
}

/// No-op event publisher for testing
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: ServiceEvent) -> Result<(), ApplicationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination() {
        let pagination = Pagination::new(1, 20);
        assert_eq!(pagination.offset(), 0);
        assert_eq!(pagination.limit(), 20);

        let pagination = Pagination::new(3, 10);
        assert_eq!(pagination.offset(), 20);
        assert_eq!(pagination.limit(), 10);
    }

    #[test]
    fn test_paginated_result() {
        let items = vec![1, 2, 3];
        let pagination = Pagination::new(1, 10);
        let result = PaginatedResult::new(items, 25, &pagination);

        assert_eq!(result.total, 25);
        assert_eq!(result.page, 1);
        assert_eq!(result.total_pages, 3);
        assert!(result.has_next_page());
        assert!(!result.has_previous_page());
    }
}
