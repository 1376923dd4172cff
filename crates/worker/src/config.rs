//! Worker configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Worker pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Number of worker threads in the pool
    pub pool_size: usize,

    /// Redis connection URL
    pub redis_url: String,

    /// Database connection URL
    pub database_url: Option<String>,

    /// Queue settings
    #[serde(default)]
    pub queue: QueueConfig,

    /// Retry policy
    #[serde(default)]
    pub retry: RetryConfig,

    /// Scheduler settings
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    /// Model settings
    #[serde(default)]
    pub llm: WorkerLlmConfig,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            pool_size: num_cpus::get(),
            redis_url: "redis://localhost:6379".to_string(),
            database_url: None,
            queue: QueueConfig::default(),
            retry: RetryConfig::default(),
            scheduler: SchedulerConfig::default(),
            llm: WorkerLlmConfig::default(),
        }
    }
}

/// Queue configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Prefix for queue keys in Redis
    pub prefix: String,

    /// Blocking timeout when waiting for jobs (seconds)
    pub blocking_timeout: u64,

    /// Maximum number of retries for a job
    pub max_retries: u32,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            prefix: "cv-screen".to_string(),
            blocking_timeout: 5,
            max_retries: 3,
        }
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Initial backoff duration (seconds)
    pub initial_backoff: u64,

    /// Maximum backoff duration (seconds)
    pub max_backoff: u64,

    /// Backoff multiplier per attempt
    pub multiplier: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_backoff: 5,
            max_backoff: 300,
            multiplier: 2,
        }
    }
}

impl RetryConfig {
    /// Exponential backoff for the given retry attempt (1-indexed).
    pub fn calculate_backoff(&self, retry_count: u32) -> Duration {
        let exponent = retry_count.saturating_sub(1).min(16);
        let backoff = self
            .initial_backoff
            .saturating_mul(u64::from(self.multiplier).saturating_pow(exponent));
        Duration::from_secs(backoff.min(self.max_backoff))
    }
}

/// Scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Whether the scheduler is running
    pub enabled: bool,

    /// Tick interval in seconds
    pub tick_interval: u64,

    /// Age in days after which archived uploads are cleaned up
    pub cleanup_older_than_days: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_interval: 30,
            cleanup_older_than_days: 90,
        }
    }
}

/// Model settings used by analysis jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerLlmConfig {
    /// Chat endpoint base URL
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Number of CVs analyzed concurrently within one batch job
    pub batch_size: usize,
}

impl Default for WorkerLlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:11434".to_string(),
            model: "llama3:latest".to_string(),
            timeout_seconds: 120,
            batch_size: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_growth_and_cap() {
        let retry = RetryConfig::default();
        assert_eq!(retry.calculate_backoff(1), Duration::from_secs(5));
        assert_eq!(retry.calculate_backoff(2), Duration::from_secs(10));
        assert_eq!(retry.calculate_backoff(3), Duration::from_secs(20));
        // Far past the cap
        assert_eq!(retry.calculate_backoff(12), Duration::from_secs(300));
    }

    #[test]
    fn test_defaults() {
        let config = WorkerConfig::default();
        assert_eq!(config.queue.prefix, "cv-screen");
        assert_eq!(config.queue.max_retries, 3);
        assert_eq!(config.llm.batch_size, 5);
    }
}
