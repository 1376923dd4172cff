//! CV-Screen Worker
//!
//! Background job processing for the CV-Screen platform.
//!
//! This crate provides:
//! - Redis-based job queue with priority handling
//! - Workers for CV analysis, summarization, shortlisting, and cleanup
//! - Job scheduling with cron-like functionality
//! - Retry policies and dead letter queue
//! - Metrics and monitoring

pub mod config;
pub mod metrics;
pub mod queue;
pub mod scheduler;
pub mod workers;

pub use config::WorkerConfig;
pub use metrics::WorkerMetrics;
pub use queue::{JobConsumer, JobProducer};
pub use workers::{JobHandler, WorkerContext};

use anyhow::Result;
use cv_screen_infrastructure::storage::DocumentStorage;
use scheduler::Scheduler;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// Worker pool for processing background jobs
pub struct WorkerPool {
    config: WorkerConfig,
    producer: JobProducer,
    consumer: JobConsumer,
    handler: Arc<JobHandler>,
    metrics: WorkerMetrics,
    shutdown_tx: mpsc::Sender<()>,
    shutdown_rx: mpsc::Receiver<()>,
}

impl WorkerPool {
    /// Create a new worker pool
    pub async fn new(
        config: WorkerConfig,
        storage: Option<Arc<dyn DocumentStorage>>,
    ) -> Result<Self> {
        let producer = JobProducer::new(&config.redis_url, config.queue.prefix.clone()).await?;
        let consumer = JobConsumer::new(
            &config.redis_url,
            config.queue.prefix.clone(),
            config.pool_size,
        )
        .await?;

        let ctx = WorkerContext::connect(&config, storage).await?;
        let handler = Arc::new(JobHandler::new(ctx));

        let metrics = WorkerMetrics::new();
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        Ok(Self {
            config,
            producer,
            consumer,
            handler,
            metrics,
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Start the worker pool
    pub async fn start(&mut self) -> Result<()> {
        info!(
            pool_size = self.config.pool_size,
            scheduler_enabled = self.config.scheduler.enabled,
            "Starting worker pool"
        );

        let worker_handles = self
            .consumer
            .start(
                self.config.clone(),
                self.handler.clone(),
                self.metrics.clone(),
            )
            .await?;

        let scheduler_handle = if self.config.scheduler.enabled {
            let scheduler = Scheduler::new(self.config.clone(), self.producer.clone());
            Some(scheduler.start())
        } else {
            None
        };

        // Wait for shutdown signal
        self.shutdown_rx.recv().await;

        info!("Shutting down worker pool");

        if let Some(handle) = scheduler_handle {
            handle.abort();
        }

        for handle in worker_handles {
            handle.abort();
        }

        Ok(())
    }

    /// Get a handle to send shutdown signal
    pub fn shutdown_handle(&self) -> mpsc::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Get the job producer for enqueuing jobs
    pub fn producer(&self) -> &JobProducer {
        &self.producer
    }

    /// Get metrics
    pub fn metrics(&self) -> &WorkerMetrics {
        &self.metrics
    }
}
