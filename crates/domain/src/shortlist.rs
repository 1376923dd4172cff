//! Shortlist and interview lifecycle types.

use crate::identifiers::{CandidateId, JobId, ShortlistEntryId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Interview lifecycle status for a shortlist entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    /// Shortlisted, no interview slot assigned yet
    Pending,
    /// An interview slot has been assigned
    Scheduled,
    /// The interview took place
    Completed,
    /// The interview was cancelled
    Cancelled,
}

impl InterviewStatus {
    /// Whether a transition to `target` is allowed.
    pub fn can_transition_to(&self, target: InterviewStatus) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Scheduled)
                | (Self::Pending, Self::Cancelled)
                | (Self::Scheduled, Self::Completed)
                | (Self::Scheduled, Self::Cancelled)
        )
    }

    /// Statuses that still need an interview slot.
    pub fn needs_slot(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Display name for UI rendering
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Scheduled => "Scheduled",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// A candidate shortlisted for a job.
///
/// At most one entry exists per (candidate, job) pair; shortlisting is
/// idempotent and deduplicates against existing entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortlistEntry {
    /// Unique identifier
    pub id: ShortlistEntryId,
    /// The shortlisted candidate
    pub candidate_id: CandidateId,
    /// The job the candidate was shortlisted for
    pub job_id: JobId,
    /// Assigned interview slot, absent while pending
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_date: Option<DateTime<Utc>>,
    /// Interview lifecycle status
    pub status: InterviewStatus,
    /// When the entry was created
    pub created_at: DateTime<Utc>,
}

impl ShortlistEntry {
    /// Create a new pending entry.
    pub fn new(candidate_id: CandidateId, job_id: JobId) -> Self {
        Self {
            id: ShortlistEntryId::new(),
            candidate_id,
            job_id,
            interview_date: None,
            status: InterviewStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Assign an interview slot and move to `Scheduled`.
    ///
    /// Returns `false` without modifying the entry when the transition is
    /// not allowed from the current status.
    pub fn schedule(&mut self, slot: DateTime<Utc>) -> bool {
        if !self.status.can_transition_to(InterviewStatus::Scheduled) {
            return false;
        }
        self.interview_date = Some(slot);
        self.status = InterviewStatus::Scheduled;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_transitions() {
        assert!(InterviewStatus::Pending.can_transition_to(InterviewStatus::Scheduled));
        assert!(InterviewStatus::Pending.can_transition_to(InterviewStatus::Cancelled));
        assert!(InterviewStatus::Scheduled.can_transition_to(InterviewStatus::Completed));
        assert!(InterviewStatus::Scheduled.can_transition_to(InterviewStatus::Cancelled));

        assert!(!InterviewStatus::Pending.can_transition_to(InterviewStatus::Completed));
        assert!(!InterviewStatus::Completed.can_transition_to(InterviewStatus::Scheduled));
        assert!(!InterviewStatus::Cancelled.can_transition_to(InterviewStatus::Scheduled));
    }

    #[test]
    fn test_schedule_assigns_slot() {
        let mut entry = ShortlistEntry::new(CandidateId::new(), JobId::new());
        let slot = Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap();

        assert!(entry.schedule(slot));
        assert_eq!(entry.status, InterviewStatus::Scheduled);
        assert_eq!(entry.interview_date, Some(slot));
    }

    #[test]
    fn test_schedule_rejected_when_not_pending() {
        let mut entry = ShortlistEntry::new(CandidateId::new(), JobId::new());
        let slot = Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap();
        entry.schedule(slot).then_some(()).unwrap();

        // Already scheduled, a second schedule must not move the slot
        let other = Utc.with_ymd_and_hms(2025, 3, 5, 9, 0, 0).unwrap();
        assert!(!entry.schedule(other));
        assert_eq!(entry.interview_date, Some(slot));
    }
}
