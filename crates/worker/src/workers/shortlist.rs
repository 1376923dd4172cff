//! Shortlisting and interview scheduling worker.

use super::{Worker, WorkerContext};
use crate::queue::job::{Job, JobType};
use anyhow::Result;
use async_trait::async_trait;
use cv_screen_application::services::ServiceContext;
use cv_screen_domain::identifiers::JobId;
use tracing::{info, warn};

/// Worker for shortlist and scheduling jobs
pub struct ShortlistWorker {
    ctx: WorkerContext,
}

impl ShortlistWorker {
    /// Create a new shortlist worker
    pub fn new(ctx: WorkerContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Worker for ShortlistWorker {
    async fn process(&self, job: &Job) -> Result<()> {
        let service_ctx = ServiceContext::new(job.id.to_string());

        match &job.job_type {
            JobType::ShortlistJob(payload) => {
                let created = self
                    .ctx
                    .shortlist_service
                    .shortlist_job(
                        &service_ctx,
                        JobId::from_uuid(payload.job_id),
                        payload.threshold,
                    )
                    .await?;
                info!(created, "Shortlist job finished");
                Ok(())
            }
            JobType::ScheduleInterviews(payload) => {
                let scheduled = self
                    .ctx
                    .shortlist_service
                    .schedule_interviews(&service_ctx, JobId::from_uuid(payload.job_id))
                    .await?;
                info!(scheduled, "Interview scheduling finished");
                Ok(())
            }
            other => {
                warn!(job_type = ?other, "Shortlist worker received unexpected job");
                Ok(())
            }
        }
    }

    fn name(&self) -> &str {
        "shortlist"
    }
}
