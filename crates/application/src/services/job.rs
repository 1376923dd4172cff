//! Job Service
//!
//! Business logic for job management: CSV import, listing, deletion with
//! cascade, and LLM summarization.

use super::{EventPublisher, PaginatedResult, Pagination, ServiceConfig, ServiceContext, ServiceEvent};
use super::{CandidateRepositoryPort, ShortlistRepositoryPort};
use crate::analysis::JobSummarizer;
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use cv_screen_common::text::clean_imported_text;
use cv_screen_domain::identifiers::JobId;
use cv_screen_domain::job::{Job, JobSummary};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Required CSV column: job title
const COLUMN_TITLE: &str = "Job Title";
/// Required CSV column: job description
const COLUMN_DESCRIPTION: &str = "Job Description";
/// Optional CSV column: requirements (falls back to the description)
const COLUMN_REQUIREMENTS: &str = "Requirements";

/// Job repository trait (to be implemented by infrastructure)
#[async_trait]
pub trait JobRepositoryPort: Send + Sync {
    /// Insert a job
    async fn insert(&self, job: &Job) -> Result<(), ApplicationError>;
    /// Insert a batch of jobs
    async fn insert_many(&self, jobs: &[Job]) -> Result<usize, ApplicationError>;
    /// Fetch a job by id
    async fn get(&self, id: JobId) -> Result<Option<Job>, ApplicationError>;
    /// List jobs with pagination, newest first
    async fn list(&self, pagination: &Pagination) -> Result<(Vec<Job>, u64), ApplicationError>;
    /// List every job
    async fn list_all(&self) -> Result<Vec<Job>, ApplicationError>;
    /// Store a summary for a job
    async fn set_summary(&self, id: JobId, summary: &JobSummary) -> Result<(), ApplicationError>;
    /// Delete a job, returning whether it existed
    async fn delete(&self, id: JobId) -> Result<bool, ApplicationError>;
    /// Delete every job, returning how many were removed
    async fn delete_all(&self) -> Result<u64, ApplicationError>;
    /// Total number of jobs
    async fn count(&self) -> Result<u64, ApplicationError>;
}

/// Outcome of a CSV import
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    /// Number of jobs created
    pub jobs_created: usize,
    /// Number of rows skipped (empty descriptions)
    pub rows_skipped: usize,
}

/// Job service implementation
pub struct JobService {
    repository: Arc<dyn JobRepositoryPort>,
    candidates: Arc<dyn CandidateRepositoryPort>,
    shortlist: Arc<dyn ShortlistRepositoryPort>,
    summarizer: JobSummarizer,
    event_publisher: Arc<dyn EventPublisher>,
    config: ServiceConfig,
}

impl JobService {
    /// Wire a job service from its dependencies.
    pub fn new(
        repository: Arc<dyn JobRepositoryPort>,
        candidates: Arc<dyn CandidateRepositoryPort>,
        shortlist: Arc<dyn ShortlistRepositoryPort>,
        summarizer: JobSummarizer,
        event_publisher: Arc<dyn EventPublisher>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repository,
            candidates,
            shortlist,
            summarizer,
            event_publisher,
            config,
        }
    }

    /// Import jobs from CSV bytes.
    ///
    /// The file must carry `Job Title` and `Job Description` columns;
    /// `Requirements` is optional and falls back to the description. Rows
    /// with an empty description are skipped, mirroring how upstream job
    /// exports pad their sheets.
    #[instrument(skip(self, ctx, data), fields(correlation_id = %ctx.correlation_id, bytes = data.len()))]
    pub async fn import_csv(&self, ctx: &ServiceContext, data: &[u8]) -> ApplicationResult<ImportOutcome> {
        let mut reader = csv::Reader::from_reader(data);

        let headers = reader
            .headers()
            .map_err(|e| ApplicationError::InvalidInput(format!("Unreadable CSV: {e}")))?
            .clone();

        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let (title_idx, description_idx) = match (find(COLUMN_TITLE), find(COLUMN_DESCRIPTION)) {
            (Some(title), Some(description)) => (title, description),
            (title, description) => {
                let mut missing = Vec::new();
                if title.is_none() {
                    missing.push(COLUMN_TITLE);
                }
                if description.is_none() {
                    missing.push(COLUMN_DESCRIPTION);
                }
                return Err(ApplicationError::ValidationFailed(format!(
                    "Missing required columns: {}",
                    missing.join(", ")
                )));
            }
        };
        let requirements_idx = find(COLUMN_REQUIREMENTS);

        let mut jobs = Vec::new();
        let mut outcome = ImportOutcome::default();

        for record in reader.records() {
            let record =
                record.map_err(|e| ApplicationError::InvalidInput(format!("Unreadable CSV: {e}")))?;

            let description = clean_imported_text(record.get(description_idx).unwrap_or(""));
            if description.is_empty() {
                outcome.rows_skipped += 1;
                continue;
            }

            let raw_title = record.get(title_idx).unwrap_or("").trim();
            let title = if raw_title.is_empty() {
                "Untitled Job".to_string()
            } else {
                clean_imported_text(raw_title)
            };

            let requirements = requirements_idx
                .and_then(|idx| record.get(idx))
                .map(clean_imported_text)
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| description.clone());

            jobs.push(Job::new(title, description, requirements));
        }

        if jobs.is_empty() {
            return Err(ApplicationError::ValidationFailed(
                "Import produced no jobs".to_string(),
            ));
        }

        outcome.jobs_created = self.repository.insert_many(&jobs).await?;

        info!(
            jobs_created = outcome.jobs_created,
            rows_skipped = outcome.rows_skipped,
            "Jobs imported"
        );

        self.event_publisher
            .publish(ServiceEvent::JobsImported {
                count: outcome.jobs_created,
            })
            .await?;

        Ok(outcome)
    }

    /// Get a job by id.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn get(&self, ctx: &ServiceContext, id: JobId) -> ApplicationResult<Option<Job>> {
        debug!(job_id = %id, "Fetching job");
        self.repository.get(id).await
    }

    /// Fetch a job, failing when it does not exist.
    pub async fn get_required(&self, ctx: &ServiceContext, id: JobId) -> ApplicationResult<Job> {
        self.get(ctx, id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("Job not found: {id}")))
    }

    /// List jobs with pagination, newest first.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn list(
        &self,
        ctx: &ServiceContext,
        pagination: Pagination,
    ) -> ApplicationResult<PaginatedResult<Job>> {
        let pagination = Pagination::new(
            pagination.page.max(1),
            pagination.page_size.min(self.config.max_page_size),
        );

        let (items, total) = self.repository.list(&pagination).await?;
        Ok(PaginatedResult::new(items, total, &pagination))
    }

    /// List every job.
    pub async fn list_all(&self, _ctx: &ServiceContext) -> ApplicationResult<Vec<Job>> {
        self.repository.list_all().await
    }

    /// Summarize a job description, storing and returning the summary.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn summarize(&self, ctx: &ServiceContext, id: JobId) -> ApplicationResult<JobSummary> {
        let job = self.get_required(ctx, id).await?;

        let summary = self.summarizer.summarize(&job.description).await?;
        self.repository.set_summary(id, &summary).await?;

        info!(job_id = %id, "Job summarized");

        self.event_publisher
            .publish(ServiceEvent::JobSummarized {
                job_id: id.to_string(),
            })
            .await?;

        Ok(summary)
    }

    /// Delete a job along with its candidates and shortlist entries.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn delete(&self, ctx: &ServiceContext, id: JobId) -> ApplicationResult<()> {
        if self.repository.get(id).await?.is_none() {
            return Err(ApplicationError::NotFound(format!("Job not found: {id}")));
        }

        // Dependents first so a failure cannot orphan them.
        self.shortlist.delete_for_job(id).await?;
        self.candidates.delete_for_job(id).await?;
        self.repository.delete(id).await?;

        info!(job_id = %id, "Job deleted");

        self.event_publisher
            .publish(ServiceEvent::JobDeleted {
                job_id: id.to_string(),
            })
            .await?;

        Ok(())
    }

    /// Delete every job, candidate, and shortlist entry.
    #[instrument(skip(self, ctx), fields(correlation_id = %ctx.correlation_id))]
    pub async fn delete_all(&self, ctx: &ServiceContext) -> ApplicationResult<u64> {
        self.shortlist.delete_all().await?;
        let candidates_removed = self.candidates.delete_all().await?;
        let jobs_removed = self.repository.delete_all().await?;

        if candidates_removed > 0 {
            self.event_publisher
                .publish(ServiceEvent::CandidatesDeleted {
                    count: candidates_removed,
                })
                .await?;
        }

        warn!(jobs_removed, "All jobs deleted");
        Ok(jobs_removed)
    }

    /// Total number of jobs.
    pub async fn count(&self, _ctx: &ServiceContext) -> ApplicationResult<u64> {
        self.repository.count().await
    }
}
