//! Candidate Service
//!
//! Business logic for candidate ingestion, analysis, listing, and deletion.

use super::{EventPublisher, JobRepositoryPort, PaginatedResult, Pagination, ServiceConfig, ServiceContext, ServiceEvent};
use crate::analysis::AnalysisEngine;
use crate::validation::{EnsureValid, IngestCvRequest, Validatable};
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use cv_screen_domain::analysis::CvAnalysis;
use cv_screen_domain::candidate::{Candidate, CandidateStatus};
use cv_screen_domain::identifiers::{CandidateId, JobId};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Candidate repository trait (to be implemented by infrastructure)
#[async_trait]
pub trait CandidateRepositoryPort: Send + Sync {
    /// Insert a candidate
    async fn insert(&self, candidate: &Candidate) -> Result<(), ApplicationError>;
    /// Fetch a candidate by id
    async fn get(&self, id: CandidateId) -> Result<Option<Candidate>, ApplicationError>;
    /// List a job's candidates with pagination, highest score first
    async fn list_for_job(
        &self,
        job_id: JobId,
        pagination: &Pagination,
    ) -> Result<(Vec<Candidate>, u64), ApplicationError>;
    /// List every candidate for a job
    async fn list_all_for_job(&self, job_id: JobId) -> Result<Vec<Candidate>, ApplicationError>;
    /// List a job's candidates with a match score at or above `threshold`
    async fn list_above_score(
        &self,
        job_id: JobId,
        threshold: f64,
    ) -> Result<Vec<Candidate>, ApplicationError>;
    /// Replace a candidate's analysis, score, and status
    async fn update_analysis(
        &self,
        id: CandidateId,
        analysis: &CvAnalysis,
        status: CandidateStatus,
    ) -> Result<(), ApplicationError>;
    /// Delete a candidate, returning whether it existed
    async fn delete(&self, id: CandidateId) -> Result<bool, ApplicationError>;
    /// Delete candidates by id, returning how many were removed
    async fn delete_many(&self, ids: &[CandidateId]) -> Result<u64, ApplicationError>;
    /// Delete every candidate for a job
    async fn delete_for_job(&self, job_id: JobId) -> Result<u64, ApplicationError>;
    /// Delete every candidate
    async fn delete_all(&self) -> Result<u64, ApplicationError>;
    /// Total number of candidates
    async fn count(&self) -> Result<u64, ApplicationError>;
}

/// Candidate service implementation
pub struct CandidateService {
    repository: Arc<dyn CandidateRepositoryPort>,
    jobs: Arc<dyn JobRepositoryPort>,
    engine: Arc<AnalysisEngine>,
    event_publisher: Arc<dyn EventPublisher>,
    config: ServiceConfig,
}

impl CandidateService {
    /// Wire a candidate service from its dependencies.
    pub fn new(
        repository: Arc<dyn CandidateRepositoryPort>,
        jobs: Arc<dyn JobRepositoryPort>,
        engine: Arc<AnalysisEngine>,
        event_publisher: Arc<dyn EventPublisher>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repository,
            jobs,
            engine,
            event_publisher,
            config,
        }
    }

    /// Ingest a CV for a job: analyze it and store the candidate.
    ///
    /// A model transport failure does not lose the upload; the candidate is
    /// stored with a zero-score fallback analysis and `Failed` status so it
    /// can be re-analyzed later.
    #[instrument(skip(self, ctx, cv_text), fields(correlation_id = %ctx.correlation_id))]
    pub async fn ingest(
        &self,
        ctx: &ServiceContext,
        job_id: JobId,
        name: &str,
        cv_text: &str,
    ) -> ApplicationResult<Candidate> {
        let job = self
            .jobs
            .get(job_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("Job not found: {job_id}")))?;

        let request = IngestCvRequest {
            name: name.to_string(),
            cv_text: cv_text.to_string(),
        };
        request.validate_all().ensure_valid()?;

        let cv_text = cv_text.trim();
        let candidate = Candidate::new(job_id, name, cv_text);
        let candidate = match self.engine.analyze(cv_text, &job.description).await {
            Ok(analysis) => candidate.with_analysis(analysis),
            Err(e) => {
                warn!(error = %e, "Analysis failed, storing candidate with fallback");
                let mut candidate = candidate
                    .with_analysis(CvAnalysis::fallback(format!("Error during analysis: {e}")));
                candidate.status = CandidateStatus::Failed;
                candidate
            }
        };

        self.repository.insert(&candidate).await?;

        info!(
            candidate_id = %candidate.id,
            job_id = %job_id,
            match_score = candidate.match_score,
            "Candidate ingested"
        );

        self.event_publisher
            .publish(ServiceEvent::CandidateAnalyzed {
                candidate_id: candidate.id.to_string(),
                job_id: job_id.to_string(),
                match_score: candidate.match_score,
            })
            .await?;

        Ok(candidate)
    }

    /// Ingest a CV against every job, returning how many candidates were created.
    #[instrument(skip(self, ctx, cv_text), fields(correlation_id = %ctx.correlation_id))]
    pub async fn ingest_for_all_jobs(
        &self,
        ctx: &ServiceContext,
        name: &str,
        cv_text: &str,
    ) -> ApplicationResult<usize> {
        let jobs = self.jobs.list_all().await?;
        let mut created = 0;

        for job in jobs {
            match self.ingest(ctx, job.id, name, cv_text).await {
                Ok(_) => created += 1,
                // Keep going: one bad job must not sink the rest of the batch.
                Err(e) => warn!(job_id = %job.id, error = %e, "Skipping job during bulk ingest"),
            }
        }

        Ok(created)
    }

    /// Get a candidate by id.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn get(
        &self,
        ctx: &ServiceContext,
        id: CandidateId,
    ) -> ApplicationResult<Option<Candidate>> {
        debug!(candidate_id = %id, "Fetching candidate");
        self.repository.get(id).await
    }

    /// List a job's candidates with pagination, highest score first.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn list_for_job(
        &self,
        ctx: &ServiceContext,
        job_id: JobId,
        pagination: Pagination,
    ) -> ApplicationResult<PaginatedResult<Candidate>> {
        if self.jobs.get(job_id).await?.is_none() {
            return Err(ApplicationError::NotFound(format!("Job not found: {job_id}")));
        }

        let pagination = Pagination::new(
            pagination.page.max(1),
            pagination.page_size.min(self.config.max_page_size),
        );

        let (items, total) = self.repository.list_for_job(job_id, &pagination).await?;
        Ok(PaginatedResult::new(items, total, &pagination))
    }

    /// Re-analyze every candidate of a job against its current description.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn reanalyze_job(&self, ctx: &ServiceContext, job_id: JobId) -> ApplicationResult<usize> {
        let job = self
            .jobs
            .get(job_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("Job not found: {job_id}")))?;

        let candidates = self.repository.list_all_for_job(job_id).await?;
        let mut reanalyzed = 0;

        for candidate in &candidates {
            let (analysis, status) = match self.engine.analyze(&candidate.cv_text, &job.description).await {
                Ok(analysis) => (analysis, CandidateStatus::Analyzed),
                Err(e) => {
                    warn!(candidate_id = %candidate.id, error = %e, "Re-analysis failed");
                    (
                        CvAnalysis::fallback(format!("Error during analysis: {e}")),
                        CandidateStatus::Failed,
                    )
                }
            };

            self.repository
                .update_analysis(candidate.id, &analysis, status)
                .await?;

            self.event_publisher
                .publish(ServiceEvent::CandidateAnalyzed {
                    candidate_id: candidate.id.to_string(),
                    job_id: job_id.to_string(),
                    match_score: analysis.match_score,
                })
                .await?;

            reanalyzed += 1;
        }

        info!(job_id = %job_id, reanalyzed, "Candidates re-analyzed");
        Ok(reanalyzed)
    }

    /// Delete a candidate.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn delete(&self, ctx: &ServiceContext, id: CandidateId) -> ApplicationResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ApplicationError::NotFound(format!(
                "Candidate not found: {id}"
            )));
        }

        self.event_publisher
            .publish(ServiceEvent::CandidatesDeleted { count: 1 })
            .await?;

        Ok(())
    }

    /// Delete candidates by id list.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id, ids = ids.len()))]
    pub async fn delete_many(
        &self,
        ctx: &ServiceContext,
        ids: &[CandidateId],
    ) -> ApplicationResult<u64> {
        if ids.is_empty() {
            return Err(ApplicationError::ValidationFailed(
                "No candidates specified".to_string(),
            ));
        }

        let removed = self.repository.delete_many(ids).await?;

        self.event_publisher
            .publish(ServiceEvent::CandidatesDeleted { count: removed })
            .await?;

        Ok(removed)
    }

    /// Delete every candidate for a job.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn delete_for_job(&self, ctx: &ServiceContext, job_id: JobId) -> ApplicationResult<u64> {
        let removed = self.repository.delete_for_job(job_id).await?;

        if removed > 0 {
            self.event_publisher
                .publish(ServiceEvent::CandidatesDeleted { count: removed })
                .await?;
        }

        Ok(removed)
    }

    /// Total number of candidates.
    pub async fn count(&self, _ctx: &ServiceContext) -> ApplicationResult<u64> {
        self.repository.count().await
    }
}
