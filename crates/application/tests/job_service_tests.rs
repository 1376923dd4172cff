//! Tests for the job service
//!
//! Covers CSV import, cascade deletion, and summarization.

use cv_screen_application::analysis::JobSummarizer;
use cv_screen_application::services::{JobService, Pagination, ServiceConfig, ServiceContext};
use cv_screen_application::ApplicationError;
use cv_screen_testing::builders::*;
use cv_screen_testing::fixtures::*;
use cv_screen_testing::mocks::*;
use std::sync::Arc;

struct Harness {
    jobs: Arc<InMemoryJobRepository>,
    candidates: Arc<InMemoryCandidateRepository>,
    shortlist: Arc<InMemoryShortlistRepository>,
    events: Arc<MockEventPublisher>,
    service: JobService,
}

fn harness(llm: MockLlm) -> Harness {
    let jobs = Arc::new(InMemoryJobRepository::new());
    let candidates = Arc::new(InMemoryCandidateRepository::new());
    let shortlist = Arc::new(InMemoryShortlistRepository::new());
    let events = Arc::new(MockEventPublisher::new());
    let summarizer = JobSummarizer::new(Arc::new(llm), 4000);

    let service = JobService::new(
        jobs.clone(),
        candidates.clone(),
        shortlist.clone(),
        summarizer,
        events.clone(),
        ServiceConfig::default(),
    );

    Harness {
        jobs,
        candidates,
        shortlist,
        events,
        service,
    }
}

fn ctx() -> ServiceContext {
    ServiceContext::new("test-correlation")
}

#[tokio::test]
async fn test_import_csv_creates_jobs_and_skips_empty_rows() {
    let h = harness(MockLlm::always(summary_reply()));

    let outcome = h
        .service
        .import_csv(&ctx(), jobs_csv().as_bytes())
        .await
        .expect("import should succeed");

    assert_eq!(outcome.jobs_created, 2);
    assert_eq!(outcome.rows_skipped, 1);

    let listed = h.service.list(&ctx(), Pagination::default()).await.unwrap();
    assert_eq!(listed.total, 2);
}

#[tokio::test]
async fn test_import_csv_cleans_text_and_defaults_requirements() {
    let h = harness(MockLlm::always(summary_reply()));

    h.service
        .import_csv(&ctx(), jobs_csv().as_bytes())
        .await
        .unwrap();

    let jobs = h.service.list_all(&ctx()).await.unwrap();
    let data_engineer = jobs
        .iter()
        .find(|j| j.title == "Data Engineer")
        .expect("imported job present");

    // Triple quotes stripped, and the empty requirements column fell back
    // to the description.
    assert_eq!(data_engineer.description, "Maintain pipelines");
    assert_eq!(data_engineer.requirements, data_engineer.description);
}

#[tokio::test]
async fn test_import_csv_rejects_missing_columns() {
    let h = harness(MockLlm::always(summary_reply()));

    let err = h
        .service
        .import_csv(&ctx(), b"Title,Text\nBackend,Build things\n")
        .await
        .unwrap_err();

    match err {
        ApplicationError::ValidationFailed(message) => {
            assert!(message.contains("Job Title"));
            assert!(message.contains("Job Description"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_import_csv_rejects_empty_import() {
    let h = harness(MockLlm::always(summary_reply()));

    let err = h
        .service
        .import_csv(&ctx(), b"Job Title,Job Description\nGhost Role,\n")
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::ValidationFailed(_)));
}

#[tokio::test]
async fn test_summarize_stores_summary() {
    let h = harness(MockLlm::always(summary_reply()));
    let job = JobBuilder::new().build();
    h.jobs.seed(job.clone());

    let summary = h.service.summarize(&ctx(), job.id).await.unwrap();
    assert!(summary.summary.contains("Backend"));

    let stored = h.service.get(&ctx(), job.id).await.unwrap().unwrap();
    assert!(stored.is_summarized());
}

#[tokio::test]
async fn test_summarize_unknown_job_is_not_found() {
    let h = harness(MockLlm::always(summary_reply()));
    let missing = JobBuilder::new().build();

    let err = h.service.summarize(&ctx(), missing.id).await.unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_cascades_to_candidates_and_shortlist() {
    let h = harness(MockLlm::always(summary_reply()));
    let job = JobBuilder::new().build();
    h.jobs.seed(job.clone());

    let candidate = CandidateBuilder::new(job.id).analyzed(0.9).build();
    h.candidates.seed(candidate.clone());
    h.shortlist
        .seed(ShortlistEntryBuilder::new(candidate.id, job.id).build());

    h.service.delete(&ctx(), job.id).await.unwrap();

    use cv_screen_application::services::{CandidateRepositoryPort, JobRepositoryPort, ShortlistRepositoryPort};
    assert_eq!(h.jobs.count().await.unwrap(), 0);
    assert_eq!(h.candidates.count().await.unwrap(), 0);
    assert_eq!(h.shortlist.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_all_empties_everything() {
    let h = harness(MockLlm::always(summary_reply()));
    for _ in 0..3 {
        let job = JobBuilder::new().build();
        h.jobs.seed(job.clone());
        h.candidates
            .seed(CandidateBuilder::new(job.id).analyzed(0.5).build());
    }

    let removed = h.service.delete_all(&ctx()).await.unwrap();
    assert_eq!(removed, 3);

    use cv_screen_application::services::CandidateRepositoryPort;
    assert_eq!(h.candidates.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_import_publishes_event() {
    let h = harness(MockLlm::always(summary_reply()));

    h.service
        .import_csv(&ctx(), jobs_csv().as_bytes())
        .await
        .unwrap();

    assert_eq!(h.events.event_count(), 1);
}
