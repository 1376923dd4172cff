//! Job consumer - fetch and process jobs from Redis

use super::job::{Job, JobPriority};
use crate::config::WorkerConfig;
use crate::metrics::WorkerMetrics;
use crate::workers::JobHandler;
use anyhow::{Context, Result};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Job consumer for fetching and processing jobs
#[derive(Clone)]
pub struct JobConsumer {
    redis: ConnectionManager,
    prefix: String,
    pool_size: usize,
}

impl JobConsumer {
    /// Create a new job consumer
    pub async fn new(redis_url: &str, prefix: impl Into<String>, pool_size: usize) -> Result<Self> {
        let client = redis::Client::open(redis_url).context("Failed to create Redis client")?;
        let redis = ConnectionManager::new(client)
            .await
            .context("Failed to connect to Redis")?;

        Ok(Self {
            redis,
            prefix: prefix.into(),
            pool_size,
        })
    }

    /// Start the consumer worker pool
    pub async fn start(
        &self,
        config: WorkerConfig,
        handler: Arc<JobHandler>,
        metrics: WorkerMetrics,
    ) -> Result<Vec<JoinHandle<()>>> {
        let mut handles = Vec::new();

        info!(pool_size = self.pool_size, "Starting worker pool");

        for worker_id in 0..self.pool_size {
            let consumer = self.clone();
            let config = config.clone();
            let handler = handler.clone();
            let metrics = metrics.clone();

            let handle = tokio::spawn(async move {
                if let Err(e) = consumer
                    .worker_loop(worker_id, config, handler, metrics)
                    .await
                {
                    error!(worker_id, error = %e, "Worker loop error");
                }
            });

            handles.push(handle);
        }

        // Start delayed job promoter
        let consumer = self.clone();
        let handle = tokio::spawn(async move {
            if let Err(e) = consumer.delayed_job_promoter().await {
                error!(error = %e, "Delayed job promoter error");
            }
        });
        handles.push(handle);

        Ok(handles)
    }

    /// Worker loop - continuously fetch and process jobs
    async fn worker_loop(
        &self,
        worker_id: usize,
        config: WorkerConfig,
        handler: Arc<JobHandler>,
        metrics: WorkerMetrics,
    ) -> Result<()> {
        let mut redis = self.redis.clone();

        loop {
            match self.fetch_job(&mut redis, &config).await {
                Ok(Some(mut job)) => {
                    debug!(
                        worker_id,
                        job_id = %job.id,
                        "Processing job"
                    );

                    metrics.increment_jobs_processed();
                    let start = std::time::Instant::now();

                    job.mark_processing();

                    let result = handler.handle(&job).await;

                    let duration = start.elapsed();
                    metrics.record_job_duration(duration);

                    match result {
                        Ok(_) => {
                            job.mark_completed();
                            metrics.increment_jobs_succeeded();
                            info!(
                                worker_id,
                                job_id = %job.id,
                                duration_ms = duration.as_millis(),
                                "Job completed successfully"
                            );
                        }
                        Err(e) => {
                            error!(
                                worker_id,
                                job_id = %job.id,
                                error = %e,
                                "Job failed"
                            );

                            if job.should_retry() {
                                job.increment_retry();
                                let backoff = config.retry.calculate_backoff(job.retry_count);
                                warn!(
                                    worker_id,
                                    job_id = %job.id,
                                    retry_count = job.retry_count,
                                    backoff_secs = backoff.as_secs(),
                                    "Retrying job"
                                );

                                self.requeue_job(&mut redis, &job, backoff).await?;
                                metrics.increment_jobs_retried();
                            } else {
                                job.mark_failed(e.to_string());
                                self.move_to_dlq(&mut redis, &job).await?;
                                metrics.increment_jobs_failed();
                            }
                        }
                    }
                }
                Ok(None) => {
                    // No job available within the blocking timeout.
                }
                Err(e) => {
                    error!(worker_id, error = %e, "Failed to fetch job");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }
    }

    /// Fetch a job from the queue with priority
    async fn fetch_job(
        &self,
        redis: &mut ConnectionManager,
        config: &WorkerConfig,
    ) -> Result<Option<Job>> {
        let queues: Vec<String> = JobPriority::ordered()
            .iter()
            .map(|priority| priority.queue_name(&self.prefix))
            .collect();

        // BRPOP blocks until a job is available or the timeout elapses.
        let result: Option<(String, String)> = redis
            .brpop(&queues, config.queue.blocking_timeout as f64)
            .await
            .ok()
            .flatten();

        if let Some((_, job_json)) = result {
            let job: Job =
                serde_json::from_str(&job_json).context("Failed to deserialize job")?;
            Ok(Some(job))
        } else {
            Ok(None)
        }
    }

    /// Re-enqueue a job with delay
    async fn requeue_job(
        &self,
        redis: &mut ConnectionManager,
        job: &Job,
        delay: Duration,
    ) -> Result<()> {
        let delayed_key = format!("{}:jobs:delayed", self.prefix);
        let score = chrono::Utc::now().timestamp() + delay.as_secs() as i64;
        let job_json = serde_json::to_string(job).context("Failed to serialize job")?;

        redis
            .zadd::<_, _, _, ()>(&delayed_key, &job_json, score)
            .await
            .context("Failed to requeue job")?;

        Ok(())
    }

    /// Move a job to the dead letter queue
    async fn move_to_dlq(&self, redis: &mut ConnectionManager, job: &Job) -> Result<()> {
        let dlq_key = format!("{}:jobs:dlq", self.prefix);
        let job_json = serde_json::to_string(job).context("Failed to serialize job")?;

        redis
            .lpush::<_, _, ()>(&dlq_key, &job_json)
            .await
            .context("Failed to move job to dead letter queue")?;

        warn!(job_id = %job.id, "Job moved to dead letter queue");
        Ok(())
    }

    /// Promote due delayed jobs onto their priority queues.
    async fn delayed_job_promoter(&self) -> Result<()> {
        let mut redis = self.redis.clone();
        let delayed_key = format!("{}:jobs:delayed", self.prefix);

        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;

            let now = chrono::Utc::now().timestamp();
            let due: Vec<String> = redis
                .zrangebyscore_limit(&delayed_key, 0, now, 0, 100)
                .await
                .unwrap_or_default();

            for job_json in due {
                let Ok(job) = serde_json::from_str::<Job>(&job_json) else {
                    warn!("Dropping undeserializable delayed job");
                    redis.zrem::<_, _, ()>(&delayed_key, &job_json).await.ok();
                    continue;
                };

                let queue_name = job.priority.queue_name(&self.prefix);
                redis
                    .lpush::<_, _, ()>(&queue_name, &job_json)
                    .await
                    .context("Failed to promote delayed job")?;
                redis
                    .zrem::<_, _, ()>(&delayed_key, &job_json)
                    .await
                    .context("Failed to remove promoted job")?;

                debug!(job_id = %job.id, "Delayed job promoted");
            }
        }
    }
}
