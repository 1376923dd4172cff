//! CV-Screen Domain Types
//!
//! This crate provides the core domain model for the CV-Screen recruitment
//! platform. It defines all domain entities, value objects, and errors using
//! strongly-typed Rust structures with serialization support.
//!
//! ## Architecture
//!
//! The domain layer is organized into the following modules:
//!
//! - **identifiers**: Strongly-typed UUID-based identifiers for all entities
//! - **job**: Job postings and LLM-produced job summaries
//! - **candidate**: Candidates and their CV texts
//! - **shortlist**: Shortlist entries and interview lifecycle
//! - **analysis**: CV analysis results, score breakdowns, and weights
//! - **skills**: Technical and soft skill taxonomy with extraction
//! - **errors**: Comprehensive error types with HTTP status codes
//! - **validation**: Validation result types
//!
//! ## Usage
//!
//! ```rust
//! use cv_screen_domain::{
//!     identifiers::JobId,
//!     shortlist::InterviewStatus,
//!     analysis::ScoreWeights,
//! };
//!
//! // Create a new job ID
//! let id = JobId::new();
//!
//! // Default scoring weights sum to 1.0
//! let weights = ScoreWeights::default();
//! assert!(weights.validate().is_ok());
//!
//! // Interview status transitions are checked
//! assert!(InterviewStatus::Pending.can_transition_to(InterviewStatus::Scheduled));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core domain modules
pub mod identifiers;
pub mod job;
pub mod candidate;
pub mod shortlist;
pub mod analysis;
pub mod skills;
pub mod errors;
pub mod validation;

// Re-export commonly used types
pub use identifiers::*;
pub use errors::{AppError, AppResult};
pub use validation::{ValidationResult, ValidationIssue, IssueSeverity};

// Re-export key domain types
pub use analysis::{CvAnalysis, ScoreBreakdown, ScoreWeights};
pub use candidate::{Candidate, CandidateStatus};
pub use job::{Job, JobSummary};
pub use shortlist::{InterviewStatus, ShortlistEntry};
