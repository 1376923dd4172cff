//! Input validation framework.
//!
//! Request types validate themselves into a domain `ValidationResult`;
//! services call `ensure_valid` before acting.

use crate::{ApplicationError, ApplicationResult};
use cv_screen_domain::validation::ValidationResult;
use serde::Deserialize;

/// Types that can validate themselves.
pub trait Validatable {
    /// Run all validation rules.
    fn validate_all(&self) -> ValidationResult;
}

/// Turn a validation result into an application error when invalid.
pub trait EnsureValid {
    /// Fail with `ValidationFailed` when any error was collected.
    fn ensure_valid(&self) -> ApplicationResult<()>;
}

impl EnsureValid for ValidationResult {
    fn ensure_valid(&self) -> ApplicationResult<()> {
        if self.valid {
            Ok(())
        } else {
            Err(ApplicationError::ValidationFailed(self.error_summary()))
        }
    }
}

/// Request to ingest a single CV for a job.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestCvRequest {
    /// Candidate name
    pub name: String,
    /// Extracted CV text
    pub cv_text: String,
}

impl Validatable for IngestCvRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        if self.cv_text.trim().is_empty() {
            result.add_error("cv_text", "must not be empty");
        }
        if self.name.trim().is_empty() {
            result.add_error("name", "must not be empty");
        }
        if self.name.chars().count() > 200 {
            result.add_error("name", "must be at most 200 characters");
        }
        result
    }
}

/// Request to shortlist a job's candidates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShortlistRequest {
    /// Score threshold override; the configured default applies when absent
    pub threshold: Option<f64>,
}

impl Validatable for ShortlistRequest {
    fn validate_all(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        if let Some(threshold) = self.threshold {
            if !(0.0..=1.0).contains(&threshold) {
                result.add_error("threshold", "must be within [0, 1]");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_request_requires_cv_text() {
        let request = IngestCvRequest {
            name: "Ada".to_string(),
            cv_text: "   ".to_string(),
        };
        let result = request.validate_all();
        assert!(!result.valid);
        assert!(result.ensure_valid().is_err());
    }

    #[test]
    fn test_ingest_request_requires_name() {
        let request = IngestCvRequest {
            name: "  ".to_string(),
            cv_text: "Ten years of Rust".to_string(),
        };
        assert!(!request.validate_all().valid);
    }

    #[test]
    fn test_ingest_request_valid() {
        let request = IngestCvRequest {
            name: "Ada".to_string(),
            cv_text: "Ten years of Rust".to_string(),
        };
        assert!(request.validate_all().ensure_valid().is_ok());
    }

    #[test]
    fn test_shortlist_request_threshold_range() {
        assert!(ShortlistRequest { threshold: None }.validate_all().valid);
        assert!(ShortlistRequest { threshold: Some(0.9) }.validate_all().valid);
        assert!(!ShortlistRequest { threshold: Some(1.2) }.validate_all().valid);
    }
}
