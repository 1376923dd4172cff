//! Analysis workers: per-candidate scoring, batch re-analysis, and job
//! summarization.

use super::{Worker, WorkerContext};
use crate::queue::job::{Job, JobType};
use anyhow::{anyhow, Context as _, Result};
use async_trait::async_trait;
use cv_screen_application::services::ServiceContext;
use cv_screen_domain::analysis::CvAnalysis;
use cv_screen_domain::candidate::CandidateStatus;
use cv_screen_domain::identifiers::{CandidateId, JobId};
use futures::stream::{self, StreamExt};
use tracing::{info, instrument, warn};

/// Worker for CV analysis jobs
pub struct AnalysisWorker {
    ctx: WorkerContext,
}

impl AnalysisWorker {
    /// Create a new analysis worker
    pub fn new(ctx: WorkerContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self), fields(candidate_id = %candidate_id))]
    async fn analyze_candidate(&self, candidate_id: CandidateId, job_id: JobId) -> Result<()> {
        let candidate = self
            .ctx
            .candidates
            .get(candidate_id)
            .await?
            .with_context(|| format!("Candidate not found: {candidate_id}"))?;

        let job = self
            .ctx
            .jobs
            .get(job_id)
            .await?
            .with_context(|| format!("Job not found: {job_id}"))?;

        let (analysis, status) = match self
            .ctx
            .engine
            .analyze(&candidate.cv_text, &job.description)
            .await
        {
            Ok(analysis) => (analysis, CandidateStatus::Analyzed),
            Err(e) if e.is_retryable() => return Err(anyhow!(e)),
            Err(e) => (
                CvAnalysis::fallback(format!("Error during analysis: {e}")),
                CandidateStatus::Failed,
            ),
        };

        self.ctx
            .candidates
            .update_analysis(candidate_id, &analysis, status)
            .await?;

        info!(match_score = analysis.match_score, "Candidate analyzed");
        Ok(())
    }

    #[instrument(skip(self), fields(job_id = %job_id))]
    async fn analyze_job_candidates(&self, job_id: JobId) -> Result<()> {
        let job = self
            .ctx
            .jobs
            .get(job_id)
            .await?
            .with_context(|| format!("Job not found: {job_id}"))?;

        let candidates = self.ctx.candidates.list_all_for_job(job_id).await?;
        let total = candidates.len();

        // Analyses are independent; run a bounded batch of model calls.
        let results: Vec<Result<()>> = stream::iter(candidates)
            .map(|candidate| {
                let engine = self.ctx.engine.clone();
                let repository = self.ctx.candidates.clone();
                let description = job.description.clone();
                async move {
                    let (analysis, status) =
                        match engine.analyze(&candidate.cv_text, &description).await {
                            Ok(analysis) => (analysis, CandidateStatus::Analyzed),
                            Err(e) if e.is_retryable() => return Err(anyhow!(e)),
                            Err(e) => (
                                CvAnalysis::fallback(format!("Error during analysis: {e}")),
                                CandidateStatus::Failed,
                            ),
                        };
                    repository
                        .update_analysis(candidate.id, &analysis, status)
                        .await?;
                    Ok(())
                }
            })
            .buffer_unordered(self.ctx.batch_size)
            .collect()
            .await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(total, failed, "Job candidates re-analyzed");

        if failed > 0 {
            // Surface the batch failure so the job retries the stragglers.
            return Err(anyhow!("{failed} of {total} analyses failed"));
        }
        Ok(())
    }
}

#[async_trait]
impl Worker for AnalysisWorker {
    async fn process(&self, job: &Job) -> Result<()> {
        match &job.job_type {
            JobType::AnalyzeCandidate(payload) => {
                self.analyze_candidate(
                    CandidateId::from_uuid(payload.candidate_id),
                    JobId::from_uuid(payload.job_id),
                )
                .await
            }
            JobType::AnalyzeJobCandidates(payload) => {
                self.analyze_job_candidates(JobId::from_uuid(payload.job_id))
                    .await
            }
            other => {
                warn!(job_type = ?other, "Analysis worker received unexpected job");
                Ok(())
            }
        }
    }

    fn name(&self) -> &str {
        "analysis"
    }
}

/// Worker for job summarization
pub struct SummaryWorker {
    ctx: WorkerContext,
}

impl SummaryWorker {
    /// Create a new summary worker
    pub fn new(ctx: WorkerContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Worker for SummaryWorker {
    async fn process(&self, job: &Job) -> Result<()> {
        match &job.job_type {
            JobType::SummarizeJob(payload) => {
                let service_ctx = ServiceContext::new(job.id.to_string());
                self.ctx
                    .job_service
                    .summarize(&service_ctx, JobId::from_uuid(payload.job_id))
                    .await?;
                Ok(())
            }
            other => {
                warn!(job_type = ?other, "Summary worker received unexpected job");
                Ok(())
            }
        }
    }

    fn name(&self) -> &str {
        "summary"
    }
}
