//! Validation result types for the CV-Screen domain.
//!
//! This module provides structures for representing validation results,
//! including errors, warnings, and informational messages.

use serde::{Deserialize, Serialize};

/// Result of a validation operation
///
/// Contains a boolean indicating overall validity and lists of issues
/// categorized by severity (errors, warnings).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the validation passed (no errors)
    pub valid: bool,

    /// List of validation errors (block operation)
    pub errors: Vec<ValidationIssue>,

    /// List of validation warnings (don't block operation)
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new successful validation result
    pub fn success() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a new failed validation result with a single error
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![ValidationIssue {
                path: path.into(),
                message: message.into(),
                severity: IssueSeverity::Error,
            }],
            warnings: Vec::new(),
        }
    }

    /// Add an error to this validation result
    pub fn add_error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.errors.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
            severity: IssueSeverity::Error,
        });
    }

    /// Add a warning to this validation result
    pub fn add_warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
            severity: IssueSeverity::Warning,
        });
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.valid = self.errors.is_empty();
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Format all errors as a single human-readable string.
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|issue| format!("{}: {}", issue.path, issue.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Individual validation issue
///
/// Represents a single validation problem with its location (path),
/// description (message), and severity level.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Path to the field or location that failed validation
    pub path: String,

    /// Human-readable description of the problem
    pub message: String,

    /// Severity of the issue
    pub severity: IssueSeverity,
}

/// Severity level of a validation issue
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    /// Blocks the operation
    Error,
    /// Does not block the operation
    Warning,
    /// Informational only
    Info,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_result() {
        let result = ValidationResult::success();
        assert!(result.valid);
        assert!(!result.has_errors());
    }

    #[test]
    fn test_add_error_invalidates() {
        let mut result = ValidationResult::success();
        result.add_error("title", "must not be empty");
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let mut result = ValidationResult::success();
        result.add_warning("description", "unusually short");
        assert!(result.valid);
    }

    #[test]
    fn test_merge() {
        let mut a = ValidationResult::success();
        let b = ValidationResult::error("file", "missing column");
        a.merge(b);
        assert!(!a.valid);
        assert_eq!(a.error_summary(), "file: missing column");
    }
}
