//! Mock implementations for repositories and external services.
//!
//! Provides in-memory port implementations for testing without database,
//! queue, or model dependencies.

use async_trait::async_trait;
use cv_screen_application::services::{
    CandidateRepositoryPort, EventPublisher, JobRepositoryPort, Pagination, ServiceEvent,
    ShortlistRepositoryPort,
};
use cv_screen_application::{ApplicationError, LlmPort};
use cv_screen_domain::{
    analysis::CvAnalysis,
    candidate::{Candidate, CandidateStatus},
    identifiers::*,
    job::{Job, JobSummary},
    shortlist::{InterviewStatus, ShortlistEntry},
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Arc;

/// Scripted model port.
///
/// Replies are served in order; the last reply repeats once the script is
/// exhausted. Every received prompt is recorded for assertions.
pub struct MockLlm {
    replies: RwLock<VecDeque<String>>,
    last_reply: RwLock<Option<String>>,
    pub prompts: Arc<RwLock<Vec<String>>>,
    fail_with: RwLock<Option<String>>,
}

impl MockLlm {
    /// Mock that always returns `reply`.
    pub fn always(reply: impl Into<String>) -> Self {
        let reply = reply.into();
        Self {
            replies: RwLock::new(VecDeque::new()),
            last_reply: RwLock::new(Some(reply)),
            prompts: Arc::new(RwLock::new(Vec::new())),
            fail_with: RwLock::new(None),
        }
    }

    /// Mock that serves `replies` in order, repeating the final one.
    pub fn scripted(replies: Vec<String>) -> Self {
        Self {
            replies: RwLock::new(replies.into()),
            last_reply: RwLock::new(None),
            prompts: Arc::new(RwLock::new(Vec::new())),
            fail_with: RwLock::new(None),
        }
    }

    /// Mock whose every call fails as unavailable.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            replies: RwLock::new(VecDeque::new()),
            last_reply: RwLock::new(None),
            prompts: Arc::new(RwLock::new(Vec::new())),
            fail_with: RwLock::new(Some(message.into())),
        }
    }

    /// Number of calls received.
    pub fn call_count(&self) -> usize {
        self.prompts.read().len()
    }
}

#[async_trait]
impl LlmPort for MockLlm {
    async fn complete(&self, prompt: &str) -> Result<String, ApplicationError> {
        self.prompts.write().push(prompt.to_string());

        if let Some(message) = self.fail_with.read().clone() {
            return Err(ApplicationError::ServiceUnavailable(message));
        }

        if let Some(reply) = self.replies.write().pop_front() {
            *self.last_reply.write() = Some(reply.clone());
            return Ok(reply);
        }

        self.last_reply
            .read()
            .clone()
            .ok_or_else(|| ApplicationError::Internal("MockLlm script exhausted".to_string()))
    }
}

/// Mock event publisher recording every published event.
pub struct MockEventPublisher {
    pub published_events: Arc<RwLock<Vec<ServiceEvent>>>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self {
            published_events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn event_count(&self) -> usize {
        self.published_events.read().len()
    }

    pub fn events(&self) -> Vec<ServiceEvent> {
        self.published_events.read().clone()
    }
}

impl Default for MockEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: ServiceEvent) -> Result<(), ApplicationError> {
        self.published_events.write().push(event);
        Ok(())
    }
}

/// In-memory job repository
pub struct InMemoryJobRepository {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
        }
    }

    /// Seed the repository with a job.
    pub fn seed(&self, job: Job) {
        self.jobs.write().insert(job.id, job);
    }
}

impl Default for InMemoryJobRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobRepositoryPort for InMemoryJobRepository {
    async fn insert(&self, job: &Job) -> Result<(), ApplicationError> {
        self.jobs.write().insert(job.id, job.clone());
        Ok(())
    }

    async fn insert_many(&self, jobs: &[Job]) -> Result<usize, ApplicationError> {
        let mut guard = self.jobs.write();
        for job in jobs {
            guard.insert(job.id, job.clone());
        }
        Ok(jobs.len())
    }

    async fn get(&self, id: JobId) -> Result<Option<Job>, ApplicationError> {
        Ok(self.jobs.read().get(&id).cloned())
    }

    async fn list(&self, pagination: &Pagination) -> Result<(Vec<Job>, u64), ApplicationError> {
        let mut jobs: Vec<Job> = self.jobs.read().values().cloned().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = jobs.len() as u64;
        let items = jobs
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();
        Ok((items, total))
    }

    async fn list_all(&self) -> Result<Vec<Job>, ApplicationError> {
        let mut jobs: Vec<Job> = self.jobs.read().values().cloned().collect();
        jobs.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(jobs)
    }

    async fn set_summary(&self, id: JobId, summary: &JobSummary) -> Result<(), ApplicationError> {
        let mut jobs = self.jobs.write();
        let job = jobs
            .get_mut(&id)
            .ok_or_else(|| ApplicationError::NotFound(format!("Job not found: {id}")))?;
        job.summary = Some(summary.clone());
        Ok(())
    }

    async fn delete(&self, id: JobId) -> Result<bool, ApplicationError> {
        Ok(self.jobs.write().remove(&id).is_some())
    }

    async fn delete_all(&self) -> Result<u64, ApplicationError> {
        let mut jobs = self.jobs.write();
        let removed = jobs.len() as u64;
        jobs.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<u64, ApplicationError> {
        Ok(self.jobs.read().len() as u64)
    }
}

/// In-memory candidate repository
pub struct InMemoryCandidateRepository {
    candidates: RwLock<HashMap<CandidateId, Candidate>>,
}

impl InMemoryCandidateRepository {
    pub fn new() -> Self {
        Self {
            candidates: RwLock::new(HashMap::new()),
        }
    }

    /// Seed the repository with a candidate.
    pub fn seed(&self, candidate: Candidate) {
        self.candidates.write().insert(candidate.id, candidate);
    }
}

impl Default for InMemoryCandidateRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CandidateRepositoryPort for InMemoryCandidateRepository {
    async fn insert(&self, candidate: &Candidate) -> Result<(), ApplicationError> {
        self.candidates
            .write()
            .insert(candidate.id, candidate.clone());
        Ok(())
    }

    async fn get(&self, id: CandidateId) -> Result<Option<Candidate>, ApplicationError> {
        Ok(self.candidates.read().get(&id).cloned())
    }

    async fn list_for_job(
        &self,
        job_id: JobId,
        pagination: &Pagination,
    ) -> Result<(Vec<Candidate>, u64), ApplicationError> {
        let mut candidates: Vec<Candidate> = self
            .candidates
            .read()
            .values()
            .filter(|c| c.job_id == job_id)
            .cloned()
            .collect();
        candidates.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let total = candidates.len() as u64;
        let items = candidates
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .collect();
        Ok((items, total))
    }

    async fn list_all_for_job(&self, job_id: JobId) -> Result<Vec<Candidate>, ApplicationError> {
        Ok(self
            .candidates
            .read()
            .values()
            .filter(|c| c.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn list_above_score(
        &self,
        job_id: JobId,
        threshold: f64,
    ) -> Result<Vec<Candidate>, ApplicationError> {
        Ok(self
            .candidates
            .read()
            .values()
            .filter(|c| c.job_id == job_id && c.match_score >= threshold)
            .cloned()
            .collect())
    }

    async fn update_analysis(
        &self,
        id: CandidateId,
        analysis: &CvAnalysis,
        status: CandidateStatus,
    ) -> Result<(), ApplicationError> {
        let mut candidates = self.candidates.write();
        let candidate = candidates
            .get_mut(&id)
            .ok_or_else(|| ApplicationError::NotFound(format!("Candidate not found: {id}")))?;
        candidate.match_score = analysis.match_score;
        candidate.analysis = Some(analysis.clone());
        candidate.status = status;
        Ok(())
    }

    async fn delete(&self, id: CandidateId) -> Result<bool, ApplicationError> {
        Ok(self.candidates.write().remove(&id).is_some())
    }

    async fn delete_many(&self, ids: &[CandidateId]) -> Result<u64, ApplicationError> {
        let mut candidates = self.candidates.write();
        let mut removed = 0;
        for id in ids {
            if candidates.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn delete_for_job(&self, job_id: JobId) -> Result<u64, ApplicationError> {
        let mut candidates = self.candidates.write();
        let before = candidates.len();
        candidates.retain(|_, c| c.job_id != job_id);
        Ok((before - candidates.len()) as u64)
    }

    async fn delete_all(&self) -> Result<u64, ApplicationError> {
        let mut candidates = self.candidates.write();
        let removed = candidates.len() as u64;
        candidates.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<u64, ApplicationError> {
        Ok(self.candidates.read().len() as u64)
    }
}

/// In-memory shortlist repository
pub struct InMemoryShortlistRepository {
    entries: RwLock<HashMap<ShortlistEntryId, ShortlistEntry>>,
}

impl InMemoryShortlistRepository {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Seed the repository with an entry.
    pub fn seed(&self, entry: ShortlistEntry) {
        self.entries.write().insert(entry.id, entry);
    }
}

impl Default for InMemoryShortlistRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShortlistRepositoryPort for InMemoryShortlistRepository {
    async fn insert(&self, entry: &ShortlistEntry) -> Result<(), ApplicationError> {
        self.entries.write().insert(entry.id, entry.clone());
        Ok(())
    }

    async fn exists(
        &self,
        candidate_id: CandidateId,
        job_id: JobId,
    ) -> Result<bool, ApplicationError> {
        Ok(self
            .entries
            .read()
            .values()
            .any(|e| e.candidate_id == candidate_id && e.job_id == job_id))
    }

    async fn list_for_job(&self, job_id: JobId) -> Result<Vec<ShortlistEntry>, ApplicationError> {
        Ok(self
            .entries
            .read()
            .values()
            .filter(|e| e.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn list_unscheduled(
        &self,
        job_id: JobId,
    ) -> Result<Vec<ShortlistEntry>, ApplicationError> {
        Ok(self
            .entries
            .read()
            .values()
            .filter(|e| {
                e.job_id == job_id
                    && e.status == InterviewStatus::Pending
                    && e.interview_date.is_none()
            })
            .cloned()
            .collect())
    }

    async fn list_scheduled(
        &self,
        job_id: JobId,
    ) -> Result<Vec<ShortlistEntry>, ApplicationError> {
        let mut entries: Vec<ShortlistEntry> = self
            .entries
            .read()
            .values()
            .filter(|e| e.job_id == job_id && e.status == InterviewStatus::Scheduled)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.interview_date);
        Ok(entries)
    }

    async fn update(&self, entry: &ShortlistEntry) -> Result<(), ApplicationError> {
        let mut entries = self.entries.write();
        if !entries.contains_key(&entry.id) {
            return Err(ApplicationError::NotFound(format!(
                "Shortlist entry not found: {}",
                entry.id
            )));
        }
        entries.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn delete_for_job(&self, job_id: JobId) -> Result<u64, ApplicationError> {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| e.job_id != job_id);
        Ok((before - entries.len()) as u64)
    }

    async fn delete_all(&self) -> Result<u64, ApplicationError> {
        let mut entries = self.entries.write();
        let removed = entries.len() as u64;
        entries.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<u64, ApplicationError> {
        Ok(self.entries.read().len() as u64)
    }
}
