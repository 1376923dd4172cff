//! Worker metrics and monitoring

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;

/// Worker metrics
#[derive(Clone)]
pub struct WorkerMetrics {
    inner: Arc<RwLock<MetricsInner>>,
}

#[derive(Default)]
struct MetricsInner {
    /// Total number of jobs processed
    jobs_processed: u64,
    /// Number of successfully completed jobs
    jobs_succeeded: u64,
    /// Number of failed jobs
    jobs_failed: u64,
    /// Number of retried jobs
    jobs_retried: u64,
    /// Job durations
    durations: Vec<Duration>,
}

impl WorkerMetrics {
    /// Create new metrics
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MetricsInner::default())),
        }
    }

    /// Increment jobs processed counter
    pub fn increment_jobs_processed(&self) {
        self.inner.write().jobs_processed += 1;
    }

    /// Increment jobs succeeded counter
    pub fn increment_jobs_succeeded(&self) {
        self.inner.write().jobs_succeeded += 1;
    }

    /// Increment jobs failed counter
    pub fn increment_jobs_failed(&self) {
        self.inner.write().jobs_failed += 1;
    }

    /// Increment jobs retried counter
    pub fn increment_jobs_retried(&self) {
        self.inner.write().jobs_retried += 1;
    }

    /// Record a job duration
    pub fn record_job_duration(&self, duration: Duration) {
        self.inner.write().durations.push(duration);
    }

    /// Snapshot of the current counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        let inner = self.inner.read();
        let average_duration = if inner.durations.is_empty() {
            None
        } else {
            let total: Duration = inner.durations.iter().sum();
            Some(total / inner.durations.len() as u32)
        };

        MetricsSnapshot {
            jobs_processed: inner.jobs_processed,
            jobs_succeeded: inner.jobs_succeeded,
            jobs_failed: inner.jobs_failed,
            jobs_retried: inner.jobs_retried,
            success_rate: if inner.jobs_processed == 0 {
                0.0
            } else {
                inner.jobs_succeeded as f64 / inner.jobs_processed as f64
            },
            average_duration,
        }
    }
}

impl Default for WorkerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time view of the worker counters
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    /// Total number of jobs processed
    pub jobs_processed: u64,
    /// Number of successfully completed jobs
    pub jobs_succeeded: u64,
    /// Number of failed jobs
    pub jobs_failed: u64,
    /// Number of retried jobs
    pub jobs_retried: u64,
    /// Fraction of processed jobs that succeeded
    pub success_rate: f64,
    /// Mean job duration
    pub average_duration: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_and_rate() {
        let metrics = WorkerMetrics::new();
        metrics.increment_jobs_processed();
        metrics.increment_jobs_processed();
        metrics.increment_jobs_succeeded();
        metrics.increment_jobs_failed();
        metrics.record_job_duration(Duration::from_millis(100));
        metrics.record_job_duration(Duration::from_millis(300));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.jobs_processed, 2);
        assert_eq!(snapshot.jobs_succeeded, 1);
        assert_eq!(snapshot.jobs_failed, 1);
        assert!((snapshot.success_rate - 0.5).abs() < 1e-9);
        assert_eq!(snapshot.average_duration, Some(Duration::from_millis(200)));
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = WorkerMetrics::new().snapshot();
        assert_eq!(snapshot.success_rate, 0.0);
        assert!(snapshot.average_duration.is_none());
    }
}
