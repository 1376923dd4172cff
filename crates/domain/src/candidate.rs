//! Candidate types for the CV-Screen domain.

use crate::analysis::CvAnalysis;
use crate::identifiers::{CandidateId, JobId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate ingested for a specific job.
///
/// The CV text is stored in full; the match score is denormalized out of the
/// analysis so candidates can be filtered and ranked without deserializing
/// the analysis payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique identifier
    pub id: CandidateId,
    /// The job this candidate was screened against
    pub job_id: JobId,
    /// Candidate name (derived from the uploaded filename when not given)
    pub name: String,
    /// Extracted CV text
    pub cv_text: String,
    /// Analysis result, absent until the CV has been analyzed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<CvAnalysis>,
    /// Match score in [0, 1], 0.0 until analyzed
    pub match_score: f64,
    /// Analysis lifecycle status
    pub status: CandidateStatus,
    /// When the candidate was ingested
    pub created_at: DateTime<Utc>,
}

impl Candidate {
    /// Create a new unanalyzed candidate.
    pub fn new(job_id: JobId, name: impl Into<String>, cv_text: impl Into<String>) -> Self {
        Self {
            id: CandidateId::new(),
            job_id,
            name: name.into(),
            cv_text: cv_text.into(),
            analysis: None,
            match_score: 0.0,
            status: CandidateStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Attach an analysis result, denormalizing its match score.
    pub fn with_analysis(mut self, analysis: CvAnalysis) -> Self {
        self.match_score = analysis.match_score;
        self.analysis = Some(analysis);
        self.status = CandidateStatus::Analyzed;
        self
    }

    /// Whether the candidate has a completed analysis.
    pub fn is_analyzed(&self) -> bool {
        matches!(self.status, CandidateStatus::Analyzed)
    }
}

/// Candidate analysis lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    /// Ingested, analysis not yet run
    Pending,
    /// Analysis completed
    Analyzed,
    /// Analysis ran but failed; a fallback zero-score analysis is stored
    Failed,
}

impl CandidateStatus {
    /// Display name for UI rendering
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Analyzed => "Analyzed",
            Self::Failed => "Failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{CvAnalysis, ScoreBreakdown};

    fn sample_analysis(score: f64) -> CvAnalysis {
        CvAnalysis {
            match_score: score,
            breakdown: ScoreBreakdown::uniform(score),
            strengths: vec!["strength".to_string()],
            weaknesses: vec![],
            key_skills: vec!["Rust".to_string()],
            recommendation: "Proceed".to_string(),
        }
    }

    #[test]
    fn test_new_candidate_is_pending() {
        let candidate = Candidate::new(JobId::new(), "Ada", "CV text");
        assert_eq!(candidate.status, CandidateStatus::Pending);
        assert_eq!(candidate.match_score, 0.0);
        assert!(!candidate.is_analyzed());
    }

    #[test]
    fn test_with_analysis_denormalizes_score() {
        let candidate =
            Candidate::new(JobId::new(), "Ada", "CV text").with_analysis(sample_analysis(0.85));
        assert!(candidate.is_analyzed());
        assert_eq!(candidate.match_score, 0.85);
        assert!(candidate.analysis.is_some());
    }
}
