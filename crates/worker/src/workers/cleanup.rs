//! Cleanup worker: removes stale archived uploads.

use super::{Worker, WorkerContext};
use crate::queue::job::{Job, JobType};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::{info, warn};

/// Prefix the document archive stores uploads under.
const ARCHIVE_PREFIX: &str = "cv-documents/";

/// Worker for cleanup jobs
pub struct CleanupWorker {
    ctx: WorkerContext,
}

impl CleanupWorker {
    /// Create a new cleanup worker
    pub fn new(ctx: WorkerContext) -> Self {
        Self { ctx }
    }

    async fn cleanup_uploads(&self, older_than_days: u32) -> Result<()> {
        let Some(storage) = &self.ctx.storage else {
            warn!("No document storage configured, skipping cleanup");
            return Ok(());
        };

        let cutoff = Utc::now() - Duration::days(i64::from(older_than_days));
        let objects = storage.list(ARCHIVE_PREFIX, 1000).await?;

        let mut removed = 0;
        for object in objects {
            let stale = object
                .last_modified
                .map(|modified| modified < cutoff)
                .unwrap_or(false);
            if stale && storage.delete(&object.key).await? {
                removed += 1;
            }
        }

        info!(removed, older_than_days, "Upload archive cleaned");
        Ok(())
    }
}

#[async_trait]
impl Worker for CleanupWorker {
    async fn process(&self, job: &Job) -> Result<()> {
        match &job.job_type {
            JobType::CleanupUploads(payload) => {
                self.cleanup_uploads(payload.older_than_days).await
            }
            other => {
                warn!(job_type = ?other, "Cleanup worker received unexpected job");
                Ok(())
            }
        }
    }

    fn name(&self) -> &str {
        "cleanup"
    }
}
