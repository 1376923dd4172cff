//! Tests for the shortlist service
//!
//! Covers threshold shortlisting, deduplication, and interview scheduling.

use chrono::Timelike;
use cv_screen_application::services::{ServiceConfig, ServiceContext, ShortlistService};
use cv_screen_application::ApplicationError;
use cv_screen_domain::shortlist::InterviewStatus;
use cv_screen_testing::builders::*;
use cv_screen_testing::mocks::*;
use std::sync::Arc;

struct Harness {
    jobs: Arc<InMemoryJobRepository>,
    candidates: Arc<InMemoryCandidateRepository>,
    shortlist: Arc<InMemoryShortlistRepository>,
    service: ShortlistService,
}

fn harness() -> Harness {
    let jobs = Arc::new(InMemoryJobRepository::new());
    let candidates = Arc::new(InMemoryCandidateRepository::new());
    let shortlist = Arc::new(InMemoryShortlistRepository::new());
    let events = Arc::new(MockEventPublisher::new());

    let service = ShortlistService::new(
        shortlist.clone(),
        candidates.clone(),
        jobs.clone(),
        events,
        ServiceConfig::default(),
    );

    Harness {
        jobs,
        candidates,
        shortlist,
        service,
    }
}

fn ctx() -> ServiceContext {
    ServiceContext::new("test-correlation")
}

#[tokio::test]
async fn test_shortlist_applies_default_threshold() {
    let h = harness();
    let job = JobBuilder::new().build();
    h.jobs.seed(job.clone());

    h.candidates
        .seed(CandidateBuilder::new(job.id).analyzed(0.85).build());
    h.candidates
        .seed(CandidateBuilder::new(job.id).analyzed(0.80).build());
    h.candidates
        .seed(CandidateBuilder::new(job.id).analyzed(0.79).build());

    // Default threshold is 0.8, inclusive.
    let created = h.service.shortlist_job(&ctx(), job.id, None).await.unwrap();
    assert_eq!(created, 2);
}

#[tokio::test]
async fn test_shortlist_is_idempotent() {
    let h = harness();
    let job = JobBuilder::new().build();
    h.jobs.seed(job.clone());
    h.candidates
        .seed(CandidateBuilder::new(job.id).analyzed(0.9).build());

    assert_eq!(h.service.shortlist_job(&ctx(), job.id, None).await.unwrap(), 1);
    assert_eq!(h.service.shortlist_job(&ctx(), job.id, None).await.unwrap(), 0);

    let entries = h.service.list_for_job(&ctx(), job.id).await.unwrap();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn test_shortlist_threshold_override() {
    let h = harness();
    let job = JobBuilder::new().build();
    h.jobs.seed(job.clone());
    h.candidates
        .seed(CandidateBuilder::new(job.id).analyzed(0.5).build());

    assert_eq!(
        h.service
            .shortlist_job(&ctx(), job.id, Some(0.4))
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn test_shortlist_rejects_bad_threshold() {
    let h = harness();
    let job = JobBuilder::new().build();
    h.jobs.seed(job.clone());

    let err = h
        .service
        .shortlist_job(&ctx(), job.id, Some(1.5))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::ValidationFailed(_)));
}

#[tokio::test]
async fn test_shortlist_all_covers_every_job() {
    let h = harness();
    for _ in 0..2 {
        let job = JobBuilder::new().build();
        h.jobs.seed(job.clone());
        h.candidates
            .seed(CandidateBuilder::new(job.id).analyzed(0.9).build());
    }

    assert_eq!(h.service.shortlist_all(&ctx()).await.unwrap(), 2);
}

#[tokio::test]
async fn test_schedule_assigns_hourly_slots_from_nine() {
    let h = harness();
    let job = JobBuilder::new().build();
    h.jobs.seed(job.clone());

    for _ in 0..3 {
        let candidate = CandidateBuilder::new(job.id).analyzed(0.9).build();
        h.candidates.seed(candidate.clone());
        h.shortlist
            .seed(ShortlistEntryBuilder::new(candidate.id, job.id).build());
    }

    let scheduled = h.service.schedule_interviews(&ctx(), job.id).await.unwrap();
    assert_eq!(scheduled, 3);

    let interviews = h.service.scheduled_interviews(&ctx(), job.id).await.unwrap();
    assert_eq!(interviews.len(), 3);

    let hours: Vec<u32> = interviews
        .iter()
        .map(|e| e.interview_date.unwrap().hour())
        .collect();
    assert_eq!(hours, vec![9, 10, 11]);

    assert!(interviews
        .iter()
        .all(|e| e.status == InterviewStatus::Scheduled));
}

#[tokio::test]
async fn test_schedule_skips_already_scheduled() {
    let h = harness();
    let job = JobBuilder::new().build();
    h.jobs.seed(job.clone());

    let candidate = CandidateBuilder::new(job.id).analyzed(0.9).build();
    h.candidates.seed(candidate.clone());
    h.shortlist.seed(
        ShortlistEntryBuilder::new(candidate.id, job.id)
            .scheduled_at(chrono::Utc::now())
            .build(),
    );

    assert_eq!(h.service.schedule_interviews(&ctx(), job.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_operations_on_unknown_job_are_not_found() {
    let h = harness();
    let ghost = JobBuilder::new().build();

    assert!(matches!(
        h.service.shortlist_job(&ctx(), ghost.id, None).await,
        Err(ApplicationError::NotFound(_))
    ));
    assert!(matches!(
        h.service.schedule_interviews(&ctx(), ghost.id).await,
        Err(ApplicationError::NotFound(_))
    ));
    assert!(matches!(
        h.service.list_for_job(&ctx(), ghost.id).await,
        Err(ApplicationError::NotFound(_))
    ));
}
