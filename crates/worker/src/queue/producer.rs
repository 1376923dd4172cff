//! Job producer - enqueue jobs to Redis

use super::job::{Job, JobPriority, JobType};
use anyhow::{Context, Result};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{debug, info};

/// Job producer for enqueueing jobs
#[derive(Clone)]
pub struct JobProducer {
    redis: ConnectionManager,
    prefix: String,
}

impl JobProducer {
    /// Create a new job producer
    pub async fn new(redis_url: &str, prefix: impl Into<String>) -> Result<Self> {
        let client = redis::Client::open(redis_url).context("Failed to create Redis client")?;
        let redis = ConnectionManager::new(client)
            .await
            .context("Failed to connect to Redis")?;

        Ok(Self {
            redis,
            prefix: prefix.into(),
        })
    }

    /// Enqueue a job with default priority (Normal)
    pub async fn enqueue(&mut self, job_type: JobType) -> Result<Job> {
        self.enqueue_with_priority(job_type, JobPriority::Normal)
            .await
    }

    /// Enqueue a job with specific priority
    pub async fn enqueue_with_priority(
        &mut self,
        job_type: JobType,
        priority: JobPriority,
    ) -> Result<Job> {
        let job = Job::new(job_type, priority);
        self.push_job(&job).await?;

        debug!(
            job_id = %job.id,
            priority = ?job.priority,
            "Job enqueued"
        );

        Ok(job)
    }

    /// Enqueue a delayed job
    pub async fn enqueue_delayed(
        &mut self,
        job_type: JobType,
        priority: JobPriority,
        delay: chrono::Duration,
    ) -> Result<Job> {
        let job = Job::new_delayed(job_type, priority, delay);

        let job_json = serde_json::to_string(&job).context("Failed to serialize job")?;

        // Delayed jobs sit in a sorted set scored by their scheduled time.
        let delayed_key = format!("{}:jobs:delayed", self.prefix);
        let score = job.scheduled_at.timestamp();

        self.redis
            .zadd::<_, _, _, ()>(&delayed_key, &job_json, score)
            .await
            .context("Failed to add delayed job")?;

        debug!(
            job_id = %job.id,
            delay_seconds = delay.num_seconds(),
            "Delayed job enqueued"
        );

        Ok(job)
    }

    /// Enqueue multiple jobs in batch
    pub async fn enqueue_batch(&mut self, jobs: Vec<(JobType, JobPriority)>) -> Result<Vec<Job>> {
        let created_jobs: Vec<Job> = jobs
            .into_iter()
            .map(|(job_type, priority)| Job::new(job_type, priority))
            .collect();

        let mut pipe = redis::pipe();
        for job in &created_jobs {
            let queue_name = job.priority.queue_name(&self.prefix);
            let job_json = serde_json::to_string(job).context("Failed to serialize job")?;
            pipe.lpush::<_, _>(&queue_name, &job_json);
        }

        pipe.query_async::<_, ()>(&mut self.redis)
            .await
            .context("Failed to enqueue batch jobs")?;

        info!(count = created_jobs.len(), "Batch jobs enqueued");

        Ok(created_jobs)
    }

    /// Push a job to the appropriate queue
    async fn push_job(&mut self, job: &Job) -> Result<()> {
        let queue_name = job.priority.queue_name(&self.prefix);
        let job_json = serde_json::to_string(job).context("Failed to serialize job")?;

        self.redis
            .lpush::<_, _, ()>(&queue_name, &job_json)
            .await
            .context("Failed to push job to queue")?;

        Ok(())
    }

    /// Get the number of jobs in a queue
    pub async fn queue_size(&mut self, priority: JobPriority) -> Result<usize> {
        let queue_name = priority.queue_name(&self.prefix);
        let size: usize = self
            .redis
            .llen(&queue_name)
            .await
            .context("Failed to get queue size")?;
        Ok(size)
    }

    /// Clear all jobs from a queue (use with caution!)
    pub async fn clear_queue(&mut self, priority: JobPriority) -> Result<()> {
        let queue_name = priority.queue_name(&self.prefix);
        self.redis
            .del::<_, ()>(&queue_name)
            .await
            .context("Failed to clear queue")?;
        info!(priority = ?priority, "Queue cleared");
        Ok(())
    }
}
