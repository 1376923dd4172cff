//! Application state and dependency injection.
//!
//! This module defines the shared application state that is passed
//! to all route handlers via Axum's state extraction.

use crate::config::ApiConfig;
use cv_screen_application::analysis::{AnalysisConfig, AnalysisEngine, JobSummarizer, LlmPort};
use cv_screen_application::services::{
    CandidateRepositoryPort, CandidateService, EventPublisher, JobRepositoryPort, JobService,
    ServiceConfig, ShortlistRepositoryPort, ShortlistService,
};
use cv_screen_common::config::AppConfig;
use cv_screen_infrastructure::database::DatabasePool;
use cv_screen_infrastructure::llm::{OllamaClient, OllamaConfig};
use cv_screen_infrastructure::repositories::{
    PgCandidateRepository, PgJobRepository, PgShortlistRepository,
};
use std::sync::Arc;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// API configuration
    pub config: Arc<ApiConfig>,

    /// Job service
    pub job_service: Arc<JobService>,

    /// Candidate service
    pub candidate_service: Arc<CandidateService>,

    /// Shortlist service
    pub shortlist_service: Arc<ShortlistService>,
}

/// Repository and port handles used to wire the services.
pub struct StateParts {
    /// Job repository
    pub jobs: Arc<dyn JobRepositoryPort>,
    /// Candidate repository
    pub candidates: Arc<dyn CandidateRepositoryPort>,
    /// Shortlist repository
    pub shortlist: Arc<dyn ShortlistRepositoryPort>,
    /// Model port
    pub llm: Arc<dyn LlmPort>,
    /// Event publisher
    pub events: Arc<dyn EventPublisher>,
    /// Service configuration
    pub service_config: ServiceConfig,
    /// Analysis configuration
    pub analysis_config: AnalysisConfig,
}

impl AppState {
    /// Assemble application state from explicit parts.
    ///
    /// Tests pass in-memory repositories and a scripted model; production
    /// wiring goes through [`AppState::with_postgres`].
    pub fn from_parts(config: ApiConfig, parts: StateParts) -> Self {
        let engine = Arc::new(AnalysisEngine::new(
            parts.llm.clone(),
            parts.analysis_config.clone(),
        ));
        let summarizer = JobSummarizer::new(parts.llm, parts.analysis_config.max_text_length);

        let job_service = Arc::new(JobService::new(
            parts.jobs.clone(),
            parts.candidates.clone(),
            parts.shortlist.clone(),
            summarizer,
            parts.events.clone(),
            parts.service_config.clone(),
        ));

        let candidate_service = Arc::new(CandidateService::new(
            parts.candidates.clone(),
            parts.jobs.clone(),
            engine,
            parts.events.clone(),
            parts.service_config.clone(),
        ));

        let shortlist_service = Arc::new(ShortlistService::new(
            parts.shortlist,
            parts.candidates,
            parts.jobs,
            parts.events,
            parts.service_config,
        ));

        Self {
            config: Arc::new(config),
            job_service,
            candidate_service,
            shortlist_service,
        }
    }

    /// Production wiring: PostgreSQL repositories and the Ollama client.
    pub fn with_postgres(
        config: ApiConfig,
        app_config: &AppConfig,
        pool: &DatabasePool,
        events: Arc<dyn EventPublisher>,
    ) -> anyhow::Result<Self> {
        let llm = Arc::new(OllamaClient::new(OllamaConfig {
            endpoint: app_config.llm.endpoint.clone(),
            model: app_config.llm.model.clone(),
            timeout: app_config.llm_timeout(),
        })?);

        let analysis_config = AnalysisConfig {
            max_text_length: app_config.llm.max_text_length,
            ..AnalysisConfig::default()
        };
        analysis_config.validate()?;

        let service_config = ServiceConfig {
            shortlist_threshold: app_config.llm.shortlist_threshold,
            ..ServiceConfig::default()
        };

        let parts = StateParts {
            jobs: Arc::new(PgJobRepository::new(pool.pool().clone())),
            candidates: Arc::new(PgCandidateRepository::new(pool.pool().clone())),
            shortlist: Arc::new(PgShortlistRepository::new(pool.pool().clone())),
            llm,
            events,
            service_config,
            analysis_config,
        };

        Ok(Self::from_parts(config, parts))
    }
}
