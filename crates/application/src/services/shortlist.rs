//! Shortlist Service
//!
//! Business logic for shortlisting candidates and scheduling interviews.

use super::{CandidateRepositoryPort, EventPublisher, JobRepositoryPort, ServiceConfig, ServiceContext, ServiceEvent};
use crate::validation::{EnsureValid, ShortlistRequest, Validatable};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use chrono::Utc;
use cv_screen_common::datetime::interview_slots;
use cv_screen_domain::identifiers::{CandidateId, JobId};
use cv_screen_domain::shortlist::ShortlistEntry;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Shortlist repository trait (to be implemented by infrastructure)
#[async_trait]
pub trait ShortlistRepositoryPort: Send + Sync {
    /// Insert an entry
    async fn insert(&self, entry: &ShortlistEntry) -> Result<(), ApplicationError>;
    /// Whether an entry exists for this candidate and job
    async fn exists(&self, candidate_id: CandidateId, job_id: JobId) -> Result<bool, ApplicationError>;
    /// List every entry for a job
    async fn list_for_job(&self, job_id: JobId) -> Result<Vec<ShortlistEntry>, ApplicationError>;
    /// List a job's pending entries without an interview slot
    async fn list_unscheduled(&self, job_id: JobId) -> Result<Vec<ShortlistEntry>, ApplicationError>;
    /// List a job's scheduled entries ordered by interview date
    async fn list_scheduled(&self, job_id: JobId) -> Result<Vec<ShortlistEntry>, ApplicationError>;
    /// Persist an updated entry
    async fn update(&self, entry: &ShortlistEntry) -> Result<(), ApplicationError>;
    /// Delete every entry for a job
    async fn delete_for_job(&self, job_id: JobId) -> Result<u64, ApplicationError>;
    /// Delete every entry
    async fn delete_all(&self) -> Result<u64, ApplicationError>;
    /// Total number of entries
    async fn count(&self) -> Result<u64, ApplicationError>;
}

/// Shortlist service implementation
pub struct ShortlistService {
    repository: Arc<dyn ShortlistRepositoryPort>,
    candidates: Arc<dyn CandidateRepositoryPort>,
    jobs: Arc<dyn JobRepositoryPort>,
    event_publisher: Arc<dyn EventPublisher>,
    config: ServiceConfig,
}

impl ShortlistService {
    /// Wire a shortlist service from its dependencies.
    pub fn new(
        repository: Arc<dyn ShortlistRepositoryPort>,
        candidates: Arc<dyn CandidateRepositoryPort>,
        jobs: Arc<dyn JobRepositoryPort>,
        event_publisher: Arc<dyn EventPublisher>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repository,
            candidates,
            jobs,
            event_publisher,
            config,
        }
    }

    /// Shortlist a job's candidates whose match score meets the threshold.
    ///
    /// Candidates already on the shortlist are skipped; the returned count
    /// covers newly created entries only.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn shortlist_job(
        &self,
        ctx: &ServiceContext,
        job_id: JobId,
        threshold: Option<f64>,
    ) -> ApplicationResult<usize> {
        if self.jobs.get(job_id).await?.is_none() {
            return Err(ApplicationError::NotFound(format!("Job not found: {job_id}")));
        }

        let request = ShortlistRequest { threshold };
        request.validate_all().ensure_valid()?;
        let threshold = threshold.unwrap_or(self.config.shortlist_threshold);

        let qualified = self.candidates.list_above_score(job_id, threshold).await?;
        let mut created = 0;

        for candidate in qualified {
            if self.repository.exists(candidate.id, job_id).await? {
                continue;
            }

            let entry = ShortlistEntry::new(candidate.id, job_id);
            self.repository.insert(&entry).await?;
            created += 1;

            self.event_publisher
                .publish(ServiceEvent::CandidateShortlisted {
                    candidate_id: candidate.id.to_string(),
                    job_id: job_id.to_string(),
                })
                .await?;
        }

        info!(job_id = %job_id, created, threshold, "Candidates shortlisted");
        Ok(created)
    }

    /// Shortlist candidates for every job, returning the total created.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn shortlist_all(&self, ctx: &ServiceContext) -> ApplicationResult<usize> {
        let jobs = self.jobs.list_all().await?;
        let mut total = 0;

        for job in jobs {
            match self.shortlist_job(ctx, job.id, None).await {
                Ok(count) => total += count,
                Err(e) => warn!(job_id = %job.id, error = %e, "Skipping job during bulk shortlist"),
            }
        }

        Ok(total)
    }

    /// List every shortlist entry for a job.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn list_for_job(
        &self,
        ctx: &ServiceContext,
        job_id: JobId,
    ) -> ApplicationResult<Vec<ShortlistEntry>> {
        if self.jobs.get(job_id).await?.is_none() {
            return Err(ApplicationError::NotFound(format!("Job not found: {job_id}")));
        }
        self.repository.list_for_job(job_id).await
    }

    /// Assign interview slots to a job's pending shortlist entries.
    ///
    /// Slots start at 09:00 UTC the day after the call and advance in
    /// one-hour steps, one per entry.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn schedule_interviews(
        &self,
        ctx: &ServiceContext,
        job_id: JobId,
    ) -> ApplicationResult<usize> {
        if self.jobs.get(job_id).await?.is_none() {
            return Err(ApplicationError::NotFound(format!("Job not found: {job_id}")));
        }

        let pending = self.repository.list_unscheduled(job_id).await?;
        if pending.is_empty() {
            return Ok(0);
        }

        let mut slots = interview_slots(Utc::now());
        let mut scheduled = 0;

        for mut entry in pending {
            let Some(slot) = slots.next() else { break };
            if !entry.schedule(slot) {
                warn!(entry_id = %entry.id, "Entry no longer schedulable, skipping");
                continue;
            }
            self.repository.update(&entry).await?;
            scheduled += 1;
        }

        info!(job_id = %job_id, scheduled, "Interviews scheduled");

        self.event_publisher
            .publish(ServiceEvent::InterviewsScheduled {
                job_id: job_id.to_string(),
                count: scheduled,
            })
            .await?;

        Ok(scheduled)
    }

    /// List a job's scheduled interviews ordered by date.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn scheduled_interviews(
        &self,
        ctx: &ServiceContext,
        job_id: JobId,
    ) -> ApplicationResult<Vec<ShortlistEntry>> {
        if self.jobs.get(job_id).await?.is_none() {
            return Err(ApplicationError::NotFound(format!("Job not found: {job_id}")));
        }
        self.repository.list_scheduled(job_id).await
    }

    /// Total number of shortlist entries.
    pub async fn count(&self, _ctx: &ServiceContext) -> ApplicationResult<u64> {
        self.repository.count().await
    }
}
