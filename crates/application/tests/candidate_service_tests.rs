//! Tests for the candidate service
//!
//! Covers ingestion, analysis fallbacks, re-analysis, and deletion.

use cv_screen_application::analysis::{AnalysisConfig, AnalysisEngine};
use cv_screen_application::services::{
    CandidateService, Pagination, ServiceConfig, ServiceContext, ServiceEvent,
};
use cv_screen_application::ApplicationError;
use cv_screen_domain::candidate::CandidateStatus;
use cv_screen_domain::identifiers::CandidateId;
use cv_screen_testing::builders::*;
use cv_screen_testing::fixtures::*;
use cv_screen_testing::mocks::*;
use std::sync::Arc;

struct Harness {
    jobs: Arc<InMemoryJobRepository>,
    candidates: Arc<InMemoryCandidateRepository>,
    events: Arc<MockEventPublisher>,
    service: CandidateService,
}

fn harness(llm: MockLlm) -> Harness {
    let jobs = Arc::new(InMemoryJobRepository::new());
    let candidates = Arc::new(InMemoryCandidateRepository::new());
    let events = Arc::new(MockEventPublisher::new());
    let engine = Arc::new(AnalysisEngine::new(Arc::new(llm), AnalysisConfig::default()));

    let service = CandidateService::new(
        candidates.clone(),
        jobs.clone(),
        engine,
        events.clone(),
        ServiceConfig::default(),
    );

    Harness {
        jobs,
        candidates,
        events,
        service,
    }
}

fn ctx() -> ServiceContext {
    ServiceContext::new("test-correlation")
}

#[tokio::test]
async fn test_ingest_analyzes_and_stores() {
    let h = harness(MockLlm::always(analysis_reply(0.9)));
    let job = JobBuilder::new().build();
    h.jobs.seed(job.clone());

    let candidate = h
        .service
        .ingest(&ctx(), job.id, "Ada Lovelace", SAMPLE_CV_TEXT)
        .await
        .unwrap();

    assert!(candidate.is_analyzed());
    assert!((candidate.match_score - 0.9).abs() < 1e-9);

    let stored = h.service.get(&ctx(), candidate.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Ada Lovelace");
}

#[tokio::test]
async fn test_ingest_parses_fenced_reply() {
    let h = harness(MockLlm::always(fenced_analysis_reply(0.8)));
    let job = JobBuilder::new().build();
    h.jobs.seed(job.clone());

    let candidate = h
        .service
        .ingest(&ctx(), job.id, "Ada", SAMPLE_CV_TEXT)
        .await
        .unwrap();

    assert!((candidate.match_score - 0.8).abs() < 1e-9);
}

#[tokio::test]
async fn test_ingest_stores_fallback_on_prose_reply() {
    let h = harness(MockLlm::always(prose_reply()));
    let job = JobBuilder::new().build();
    h.jobs.seed(job.clone());

    let candidate = h
        .service
        .ingest(&ctx(), job.id, "Ada", SAMPLE_CV_TEXT)
        .await
        .unwrap();

    // Unparseable reply degrades to a zero-score analysis, but the
    // candidate itself is preserved.
    assert_eq!(candidate.match_score, 0.0);
    assert_eq!(candidate.status, CandidateStatus::Analyzed);
}

#[tokio::test]
async fn test_ingest_survives_model_outage() {
    let h = harness(MockLlm::unavailable("connection refused"));
    let job = JobBuilder::new().build();
    h.jobs.seed(job.clone());

    let candidate = h
        .service
        .ingest(&ctx(), job.id, "Ada", SAMPLE_CV_TEXT)
        .await
        .unwrap();

    assert_eq!(candidate.status, CandidateStatus::Failed);
    assert_eq!(candidate.match_score, 0.0);
}

#[tokio::test]
async fn test_ingest_rejects_empty_cv() {
    let h = harness(MockLlm::always(analysis_reply(0.9)));
    let job = JobBuilder::new().build();
    h.jobs.seed(job.clone());

    let err = h
        .service
        .ingest(&ctx(), job.id, "Ada", "   \n  ")
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::ValidationFailed(_)));
}

#[tokio::test]
async fn test_ingest_unknown_job_is_not_found() {
    let h = harness(MockLlm::always(analysis_reply(0.9)));
    let ghost = JobBuilder::new().build();

    let err = h
        .service
        .ingest(&ctx(), ghost.id, "Ada", SAMPLE_CV_TEXT)
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn test_ingest_for_all_jobs() {
    let h = harness(MockLlm::always(analysis_reply(0.7)));
    for _ in 0..3 {
        h.jobs.seed(JobBuilder::new().build());
    }

    let created = h
        .service
        .ingest_for_all_jobs(&ctx(), "Ada", SAMPLE_CV_TEXT)
        .await
        .unwrap();

    assert_eq!(created, 3);

    use cv_screen_application::services::CandidateRepositoryPort;
    assert_eq!(h.candidates.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_list_for_job_orders_by_score() {
    let h = harness(MockLlm::always(analysis_reply(0.7)));
    let job = JobBuilder::new().build();
    h.jobs.seed(job.clone());

    h.candidates
        .seed(CandidateBuilder::new(job.id).with_name("low").analyzed(0.3).build());
    h.candidates
        .seed(CandidateBuilder::new(job.id).with_name("high").analyzed(0.95).build());

    let page = h
        .service
        .list_for_job(&ctx(), job.id, Pagination::default())
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.items[0].name, "high");
    assert_eq!(page.items[1].name, "low");
}

#[tokio::test]
async fn test_reanalyze_job_updates_scores() {
    let h = harness(MockLlm::always(analysis_reply(0.95)));
    let job = JobBuilder::new().build();
    h.jobs.seed(job.clone());

    let stale = CandidateBuilder::new(job.id).analyzed(0.2).build();
    h.candidates.seed(stale.clone());

    let reanalyzed = h.service.reanalyze_job(&ctx(), job.id).await.unwrap();
    assert_eq!(reanalyzed, 1);

    let refreshed = h.service.get(&ctx(), stale.id).await.unwrap().unwrap();
    assert!((refreshed.match_score - 0.95).abs() < 1e-9);
}

#[tokio::test]
async fn test_delete_many_requires_ids() {
    let h = harness(MockLlm::always(analysis_reply(0.7)));

    let err = h.service.delete_many(&ctx(), &[]).await.unwrap_err();
    assert!(matches!(err, ApplicationError::ValidationFailed(_)));
}

#[tokio::test]
async fn test_delete_many_counts_existing_only() {
    let h = harness(MockLlm::always(analysis_reply(0.7)));
    let job = JobBuilder::new().build();
    h.jobs.seed(job.clone());

    let kept = CandidateBuilder::new(job.id).build();
    h.candidates.seed(kept.clone());

    let removed = h
        .service
        .delete_many(&ctx(), &[kept.id, CandidateId::new()])
        .await
        .unwrap();
    assert_eq!(removed, 1);
}

#[tokio::test]
async fn test_ingest_publishes_analyzed_event() {
    let h = harness(MockLlm::always(analysis_reply(0.9)));
    let job = JobBuilder::new().build();
    h.jobs.seed(job.clone());

    h.service
        .ingest(&ctx(), job.id, "Ada", SAMPLE_CV_TEXT)
        .await
        .unwrap();

    let events = h.events.events();
    assert!(matches!(
        events.as_slice(),
        [ServiceEvent::CandidateAnalyzed { .. }]
    ));
}
