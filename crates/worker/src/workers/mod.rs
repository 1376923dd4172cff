//! Worker implementations

pub mod analysis;
pub mod cleanup;
pub mod shortlist;

use crate::config::WorkerConfig;
use crate::queue::job::{Job, JobType};
use anyhow::{Context as _, Result};
use async_trait::async_trait;
use cv_screen_application::analysis::{AnalysisConfig, AnalysisEngine, JobSummarizer};
use cv_screen_application::services::{
    CandidateRepositoryPort, JobRepositoryPort, JobService, NoOpEventPublisher, ServiceConfig,
    ShortlistService,
};
use cv_screen_infrastructure::database::{DatabaseConfig, DatabasePool};
use cv_screen_infrastructure::llm::{OllamaClient, OllamaConfig};
use cv_screen_infrastructure::repositories::{
    PgCandidateRepository, PgJobRepository, PgShortlistRepository,
};
use cv_screen_infrastructure::storage::DocumentStorage;
use std::sync::Arc;
use std::time::Duration;

/// Worker trait for processing jobs
#[async_trait]
pub trait Worker: Send + Sync {
    /// Process a job
    async fn process(&self, job: &Job) -> Result<()>;

    /// Get the worker name
    fn name(&self) -> &str;
}

/// Shared handles the job handlers work through.
#[derive(Clone)]
pub struct WorkerContext {
    /// Job repository
    pub jobs: Arc<dyn JobRepositoryPort>,
    /// Candidate repository
    pub candidates: Arc<dyn CandidateRepositoryPort>,
    /// Job service (summarization)
    pub job_service: Arc<JobService>,
    /// Shortlist service (shortlisting and scheduling)
    pub shortlist_service: Arc<ShortlistService>,
    /// Analysis engine
    pub engine: Arc<AnalysisEngine>,
    /// Archive of raw uploads, when configured
    pub storage: Option<Arc<dyn DocumentStorage>>,
    /// Number of CVs analyzed concurrently within one batch job
    pub batch_size: usize,
}

impl WorkerContext {
    /// Connect repositories and services from worker configuration.
    pub async fn connect(
        config: &WorkerConfig,
        storage: Option<Arc<dyn DocumentStorage>>,
    ) -> Result<Self> {
        let database_url = config
            .database_url
            .clone()
            .context("database_url is required to run workers")?;

        let pool = DatabasePool::new(&DatabaseConfig {
            url: database_url,
            ..DatabaseConfig::default()
        })
        .await?;

        let jobs: Arc<dyn JobRepositoryPort> = Arc::new(PgJobRepository::new(pool.pool().clone()));
        let candidates: Arc<dyn CandidateRepositoryPort> =
            Arc::new(PgCandidateRepository::new(pool.pool().clone()));
        let shortlist = Arc::new(PgShortlistRepository::new(pool.pool().clone()));

        let llm = Arc::new(OllamaClient::new(OllamaConfig {
            endpoint: config.llm.endpoint.clone(),
            model: config.llm.model.clone(),
            timeout: Duration::from_secs(config.llm.timeout_seconds),
        })?);

        let analysis_config = AnalysisConfig::default();
        let engine = Arc::new(AnalysisEngine::new(llm.clone(), analysis_config.clone()));
        let summarizer = JobSummarizer::new(llm, analysis_config.max_text_length);

        let events = Arc::new(NoOpEventPublisher);
        let service_config = ServiceConfig::default();

        let job_service = Arc::new(JobService::new(
            jobs.clone(),
            candidates.clone(),
            shortlist.clone(),
            summarizer,
            events.clone(),
            service_config.clone(),
        ));

        let shortlist_service = Arc::new(ShortlistService::new(
            shortlist,
            candidates.clone(),
            jobs.clone(),
            events,
            service_config,
        ));

        Ok(Self {
            jobs,
            candidates,
            job_service,
            shortlist_service,
            engine,
            storage,
            batch_size: config.llm.batch_size.max(1),
        })
    }
}

/// Job handler that routes jobs to appropriate workers
pub struct JobHandler {
    ctx: WorkerContext,
}

impl JobHandler {
    /// Create a new job handler
    pub fn new(ctx: WorkerContext) -> Self {
        Self { ctx }
    }

    /// Handle a job by routing to the appropriate worker
    pub async fn handle(&self, job: &Job) -> Result<()> {
        match &job.job_type {
            JobType::AnalyzeCandidate(_) | JobType::AnalyzeJobCandidates(_) => {
                let worker = analysis::AnalysisWorker::new(self.ctx.clone());
                worker.process(job).await
            }
            JobType::SummarizeJob(_) => {
                let worker = analysis::SummaryWorker::new(self.ctx.clone());
                worker.process(job).await
            }
            JobType::ShortlistJob(_) | JobType::ScheduleInterviews(_) => {
                let worker = shortlist::ShortlistWorker::new(self.ctx.clone());
                worker.process(job).await
            }
            JobType::CleanupUploads(_) => {
                let worker = cleanup::CleanupWorker::new(self.ctx.clone());
                worker.process(job).await
            }
        }
    }
}
