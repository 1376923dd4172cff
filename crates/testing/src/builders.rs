//! Fluent builder pattern for constructing test data.
//!
//! This module provides builder structs for creating domain entities
//! with a fluent API for customization.

use chrono::{DateTime, Utc};
use cv_screen_domain::{
    analysis::{CvAnalysis, ScoreBreakdown},
    candidate::{Candidate, CandidateStatus},
    identifiers::*,
    job::{Job, JobSummary},
    shortlist::{InterviewStatus, ShortlistEntry},
};

use crate::fixtures::{SAMPLE_CV_TEXT, SAMPLE_JOB_DESCRIPTION};

/// Builder for creating Job test instances
#[derive(Clone)]
pub struct JobBuilder {
    id: JobId,
    title: String,
    description: String,
    requirements: Option<String>,
    summary: Option<JobSummary>,
}

impl JobBuilder {
    pub fn new() -> Self {
        Self {
            id: JobId::new(),
            title: "Backend Engineer".to_string(),
            description: SAMPLE_JOB_DESCRIPTION.to_string(),
            requirements: None,
            summary: None,
        }
    }

    pub fn with_id(mut self, id: JobId) -> Self {
        self.id = id;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.requirements = Some(requirements.into());
        self
    }

    pub fn with_summary(mut self, summary: JobSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn build(self) -> Job {
        let requirements = self
            .requirements
            .unwrap_or_else(|| self.description.clone());
        let mut job = Job::new(self.title, self.description, requirements);
        job.id = self.id;
        job.summary = self.summary;
        job
    }
}

impl Default for JobBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating Candidate test instances
#[derive(Clone)]
pub struct CandidateBuilder {
    id: CandidateId,
    job_id: JobId,
    name: String,
    cv_text: String,
    match_score: Option<f64>,
    status: Option<CandidateStatus>,
    created_at: Option<DateTime<Utc>>,
}

impl CandidateBuilder {
    pub fn new(job_id: JobId) -> Self {
        Self {
            id: CandidateId::new(),
            job_id,
            name: "Test Candidate".to_string(),
            cv_text: SAMPLE_CV_TEXT.to_string(),
            match_score: None,
            status: None,
            created_at: None,
        }
    }

    pub fn with_id(mut self, id: CandidateId) -> Self {
        self.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_cv_text(mut self, cv_text: impl Into<String>) -> Self {
        self.cv_text = cv_text.into();
        self
    }

    /// Attach an analysis with the given match score.
    pub fn analyzed(mut self, match_score: f64) -> Self {
        self.match_score = Some(match_score);
        self
    }

    pub fn with_status(mut self, status: CandidateStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn build(self) -> Candidate {
        let mut candidate = Candidate::new(self.job_id, self.name, self.cv_text);
        candidate.id = self.id;
        if let Some(score) = self.match_score {
            candidate = candidate.with_analysis(CvAnalysis {
                match_score: score,
                breakdown: ScoreBreakdown::uniform(score),
                strengths: vec!["relevant experience".to_string()],
                weaknesses: vec![],
                key_skills: vec!["Rust".to_string()],
                recommendation: "Proceed to interview".to_string(),
            });
        }
        if let Some(status) = self.status {
            candidate.status = status;
        }
        if let Some(created_at) = self.created_at {
            candidate.created_at = created_at;
        }
        candidate
    }
}

/// Builder for creating ShortlistEntry test instances
#[derive(Clone)]
pub struct ShortlistEntryBuilder {
    candidate_id: CandidateId,
    job_id: JobId,
    interview_date: Option<DateTime<Utc>>,
    status: InterviewStatus,
}

impl ShortlistEntryBuilder {
    pub fn new(candidate_id: CandidateId, job_id: JobId) -> Self {
        Self {
            candidate_id,
            job_id,
            interview_date: None,
            status: InterviewStatus::Pending,
        }
    }

    pub fn scheduled_at(mut self, slot: DateTime<Utc>) -> Self {
        self.interview_date = Some(slot);
        self.status = InterviewStatus::Scheduled;
        self
    }

    pub fn with_status(mut self, status: InterviewStatus) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> ShortlistEntry {
        let mut entry = ShortlistEntry::new(self.candidate_id, self.job_id);
        entry.interview_date = self.interview_date;
        entry.status = self.status;
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_builder() {
        let job = JobBuilder::new().with_title("Data Engineer").build();
        assert_eq!(job.title, "Data Engineer");
        assert_eq!(job.requirements, job.description);
    }

    #[test]
    fn test_candidate_builder_analyzed() {
        let candidate = CandidateBuilder::new(JobId::new()).analyzed(0.9).build();
        assert!(candidate.is_analyzed());
        assert_eq!(candidate.match_score, 0.9);
    }

    #[test]
    fn test_shortlist_builder() {
        let entry = ShortlistEntryBuilder::new(CandidateId::new(), JobId::new()).build();
        assert_eq!(entry.status, InterviewStatus::Pending);
        assert!(entry.interview_date.is_none());
    }
}
