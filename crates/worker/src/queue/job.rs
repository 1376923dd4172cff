//! Job types and definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Job priority levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JobPriority {
    /// High priority - processed first
    High = 3,
    /// Normal priority (default)
    Normal = 2,
    /// Low priority - processed last
    Low = 1,
}

impl Default for JobPriority {
    fn default() -> Self {
        Self::Normal
    }
}

impl JobPriority {
    /// Get the queue name for this priority
    pub fn queue_name(&self, prefix: &str) -> String {
        match self {
            Self::High => format!("{}:jobs:high", prefix),
            Self::Normal => format!("{}:jobs:normal", prefix),
            Self::Low => format!("{}:jobs:low", prefix),
        }
    }

    /// All priorities, highest first
    pub fn ordered() -> &'static [JobPriority] {
        &[Self::High, Self::Normal, Self::Low]
    }
}

/// Job status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Job is queued and waiting to be processed
    Queued,
    /// Job is currently being processed
    Processing,
    /// Job completed successfully
    Completed,
    /// Job failed
    Failed,
    /// Job was retried
    Retried,
}

/// Job type enumeration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum JobType {
    /// Analyze one candidate against its job
    AnalyzeCandidate(AnalyzeCandidateJob),
    /// Re-analyze every candidate of a job
    AnalyzeJobCandidates(AnalyzeJobCandidatesJob),
    /// Summarize a job description
    SummarizeJob(SummarizeJobJob),
    /// Shortlist a job's candidates
    ShortlistJob(ShortlistJobJob),
    /// Schedule interviews for a job's shortlist
    ScheduleInterviews(ScheduleInterviewsJob),
    /// Clean up old archived uploads
    CleanupUploads(CleanupUploadsJob),
}

/// Job wrapper with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier
    pub id: Uuid,
    /// Job type and payload
    pub job_type: JobType,
    /// Job priority
    pub priority: JobPriority,
    /// Job status
    pub status: JobStatus,
    /// Number of retry attempts
    pub retry_count: u32,
    /// Maximum retry attempts
    pub max_retries: u32,
    /// When the job was created
    pub created_at: DateTime<Utc>,
    /// When the job was scheduled to run
    pub scheduled_at: DateTime<Utc>,
    /// When the job started processing
    pub started_at: Option<DateTime<Utc>>,
    /// When the job completed
    pub completed_at: Option<DateTime<Utc>>,
    /// Error message if failed
    pub error: Option<String>,
}

impl Job {
    /// Create a new job
    pub fn new(job_type: JobType, priority: JobPriority) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            job_type,
            priority,
            status: JobStatus::Queued,
            retry_count: 0,
            max_retries: 3,
            created_at: now,
            scheduled_at: now,
            started_at: None,
            completed_at: None,
            error: None,
        }
    }

    /// Create a delayed job
    pub fn new_delayed(job_type: JobType, priority: JobPriority, delay: chrono::Duration) -> Self {
        let mut job = Self::new(job_type, priority);
        job.scheduled_at = job.created_at + delay;
        job
    }

    /// Mark job as processing
    pub fn mark_processing(&mut self) {
        self.status = JobStatus::Processing;
        self.started_at = Some(Utc::now());
    }

    /// Mark job as completed
    pub fn mark_completed(&mut self) {
        self.status = JobStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    /// Mark job as failed
    pub fn mark_failed(&mut self, error: String) {
        self.status = JobStatus::Failed;
        self.completed_at = Some(Utc::now());
        self.error = Some(error);
    }

    /// Check if job should be retried
    pub fn should_retry(&self) -> bool {
        self.retry_count < self.max_retries
    }

    /// Increment retry count
    pub fn increment_retry(&mut self) {
        self.retry_count += 1;
        self.status = JobStatus::Retried;
    }
}

// Job type definitions

/// Analyze one candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeCandidateJob {
    pub candidate_id: Uuid,
    pub job_id: Uuid,
}

/// Re-analyze every candidate of a job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeJobCandidatesJob {
    pub job_id: Uuid,
}

/// Summarize a job description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeJobJob {
    pub job_id: Uuid,
}

/// Shortlist a job's candidates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortlistJobJob {
    pub job_id: Uuid,
    pub threshold: Option<f64>,
}

/// Schedule interviews for a job's shortlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInterviewsJob {
    pub job_id: Uuid,
}

/// Clean up archived uploads older than the given age
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupUploadsJob {
    pub older_than_days: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_creation() {
        let job = Job::new(
            JobType::AnalyzeCandidate(AnalyzeCandidateJob {
                candidate_id: Uuid::new_v4(),
                job_id: Uuid::new_v4(),
            }),
            JobPriority::High,
        );

        assert_eq!(job.status, JobStatus::Queued);
        assert_eq!(job.priority, JobPriority::High);
        assert_eq!(job.retry_count, 0);
    }

    #[test]
    fn test_job_lifecycle() {
        let mut job = Job::new(
            JobType::ShortlistJob(ShortlistJobJob {
                job_id: Uuid::new_v4(),
                threshold: None,
            }),
            JobPriority::Normal,
        );

        job.mark_processing();
        assert_eq!(job.status, JobStatus::Processing);
        assert!(job.started_at.is_some());

        job.mark_completed();
        assert_eq!(job.status, JobStatus::Completed);
        assert!(job.completed_at.is_some());
    }

    #[test]
    fn test_job_retry() {
        let mut job = Job::new(
            JobType::CleanupUploads(CleanupUploadsJob { older_than_days: 90 }),
            JobPriority::Low,
        );

        assert!(job.should_retry());

        job.increment_retry();
        assert_eq!(job.retry_count, 1);
        assert!(job.should_retry());

        job.increment_retry();
        job.increment_retry();
        assert_eq!(job.retry_count, 3);
        assert!(!job.should_retry());
    }

    #[test]
    fn test_priority_queue_name() {
        assert_eq!(JobPriority::High.queue_name("test"), "test:jobs:high");
        assert_eq!(JobPriority::Normal.queue_name("test"), "test:jobs:normal");
        assert_eq!(JobPriority::Low.queue_name("test"), "test:jobs:low");
    }

    #[test]
    fn test_delayed_job_scheduling() {
        let job = Job::new_delayed(
            JobType::SummarizeJob(SummarizeJobJob {
                job_id: Uuid::new_v4(),
            }),
            JobPriority::Normal,
            chrono::Duration::minutes(5),
        );
        assert!(job.scheduled_at > job.created_at);
    }

    #[test]
    fn test_job_serialization_round_trip() {
        let job = Job::new(
            JobType::AnalyzeJobCandidates(AnalyzeJobCandidatesJob {
                job_id: Uuid::new_v4(),
            }),
            JobPriority::Normal,
        );
        let json = serde_json::to_string(&job).unwrap();
        let parsed: Job = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, job.id);
        assert!(matches!(parsed.job_type, JobType::AnalyzeJobCandidates(_)));
    }
}
