//! Job posting types for the CV-Screen domain.

use crate::identifiers::JobId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A job posting that candidates are screened against.
///
/// Jobs are imported in bulk from CSV files or created individually. The
/// `requirements` text defaults to the description when the source file has
/// no dedicated requirements column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique identifier
    pub id: JobId,
    /// Job title
    pub title: String,
    /// Full job description text
    pub description: String,
    /// Requirements text (falls back to the description on import)
    pub requirements: String,
    /// LLM-produced summary, populated on demand
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<JobSummary>,
    /// When the job was imported
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Create a new job with a fresh ID and the current timestamp.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        requirements: impl Into<String>,
    ) -> Self {
        Self {
            id: JobId::new(),
            title: title.into(),
            description: description.into(),
            requirements: requirements.into(),
            summary: None,
            created_at: Utc::now(),
        }
    }

    /// Whether the job has been summarized yet.
    pub fn is_summarized(&self) -> bool {
        self.summary.is_some()
    }
}

/// Structured summary of a job description.
///
/// Mirrors the JSON contract the summarization prompt asks the model for:
/// a prose summary plus itemized requirements and responsibilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    /// Short prose summary of the role
    pub summary: String,
    /// Main requirements extracted from the description
    #[serde(default)]
    pub key_requirements: Vec<String>,
    /// Main responsibilities extracted from the description
    #[serde(default)]
    pub key_responsibilities: Vec<String>,
}

impl JobSummary {
    /// Fallback summary used when the model reply cannot be parsed.
    /// The raw reply is preserved as the prose summary.
    pub fn from_raw_text(text: impl Into<String>) -> Self {
        Self {
            summary: text.into(),
            key_requirements: Vec::new(),
            key_responsibilities: Vec::new(),
        }
    }
}
