//! Shortlist repository implementation.

use async_trait::async_trait;
use cv_screen_application::services::ShortlistRepositoryPort;
use cv_screen_application::ApplicationError;
use cv_screen_domain::identifiers::{CandidateId, JobId, ShortlistEntryId};
use cv_screen_domain::shortlist::{InterviewStatus, ShortlistEntry};
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use super::db_err;

/// PostgreSQL implementation of the shortlist repository port.
pub struct PgShortlistRepository {
    pool: PgPool,
}

impl PgShortlistRepository {
    /// Create a new PostgreSQL shortlist repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn status_to_str(status: InterviewStatus) -> &'static str {
        match status {
            InterviewStatus::Pending => "pending",
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
        }
    }

    fn parse_status(raw: &str) -> Result<InterviewStatus, ApplicationError> {
        match raw {
            "pending" => Ok(InterviewStatus::Pending),
            "scheduled" => Ok(InterviewStatus::Scheduled),
            "completed" => Ok(InterviewStatus::Completed),
            "cancelled" => Ok(InterviewStatus::Cancelled),
            other => Err(ApplicationError::Internal(format!(
                "Unknown interview status in database: {other}"
            ))),
        }
    }

    fn row_to_entry(row: sqlx::postgres::PgRow) -> Result<ShortlistEntry, ApplicationError> {
        let status: String = row.get("status");
        Ok(ShortlistEntry {
            id: ShortlistEntryId::from(row.get::<Uuid, _>("id")),
            candidate_id: CandidateId::from(row.get::<Uuid, _>("candidate_id")),
            job_id: JobId::from(row.get::<Uuid, _>("job_id")),
            interview_date: row.get("interview_date"),
            status: Self::parse_status(&status)?,
            created_at: row.get("created_at"),
        })
    }
}

#[async_trait]
impl ShortlistRepositoryPort for PgShortlistRepository {
    #[instrument(skip(self, entry), fields(entry_id = %entry.id))]
    async fn insert(&self, entry: &ShortlistEntry) -> Result<(), ApplicationError> {
        sqlx::query(
            r#"
            INSERT INTO shortlist_entries (id, candidate_id, job_id, interview_date, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.id.into_uuid())
        .bind(entry.candidate_id.into_uuid())
        .bind(entry.job_id.into_uuid())
        .bind(entry.interview_date)
        .bind(Self::status_to_str(entry.status))
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn exists(
        &self,
        candidate_id: CandidateId,
        job_id: JobId,
    ) -> Result<bool, ApplicationError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM shortlist_entries
                WHERE candidate_id = $1 AND job_id = $2
            )
            "#,
        )
        .bind(candidate_id.into_uuid())
        .bind(job_id.into_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(exists)
    }

    async fn list_for_job(&self, job_id: JobId) -> Result<Vec<ShortlistEntry>, ApplicationError> {
        let rows = sqlx::query(
            r#"
            SELECT id, candidate_id, job_id, interview_date, status, created_at
            FROM shortlist_entries
            WHERE job_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(job_id.into_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(Self::row_to_entry).collect()
    }

    async fn list_unscheduled(
        &self,
        job_id: JobId,
    ) -> Result<Vec<ShortlistEntry>, ApplicationError> {
        let rows = sqlx::query(
            r#"
            SELECT id, candidate_id, job_id, interview_date, status, created_at
            FROM shortlist_entries
            WHERE job_id = $1 AND status = 'pending' AND interview_date IS NULL
            ORDER BY created_at ASC
            "#,
        )
        .bind(job_id.into_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(Self::row_to_entry).collect()
    }

    async fn list_scheduled(
        &self,
        job_id: JobId,
    ) -> Result<Vec<ShortlistEntry>, ApplicationError> {
        let rows = sqlx::query(
            r#"
            SELECT id, candidate_id, job_id, interview_date, status, created_at
            FROM shortlist_entries
            WHERE job_id = $1 AND status = 'scheduled'
            ORDER BY interview_date ASC
            "#,
        )
        .bind(job_id.into_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(Self::row_to_entry).collect()
    }

    #[instrument(skip(self, entry), fields(entry_id = %entry.id))]
    async fn update(&self, entry: &ShortlistEntry) -> Result<(), ApplicationError> {
        let result = sqlx::query(
            r#"
            UPDATE shortlist_entries
            SET interview_date = $2, status = $3
            WHERE id = $1
            "#,
        )
        .bind(entry.id.into_uuid())
        .bind(entry.interview_date)
        .bind(Self::status_to_str(entry.status))
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(ApplicationError::NotFound(format!(
                "Shortlist entry not found: {}",
                entry.id
            )));
        }
        Ok(())
    }

    async fn delete_for_job(&self, job_id: JobId) -> Result<u64, ApplicationError> {
        let result = sqlx::query("DELETE FROM shortlist_entries WHERE job_id = $1")
            .bind(job_id.into_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected())
    }

    async fn delete_all(&self) -> Result<u64, ApplicationError> {
        let result = sqlx::query("DELETE FROM shortlist_entries")
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<u64, ApplicationError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shortlist_entries")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(total as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            InterviewStatus::Pending,
            InterviewStatus::Scheduled,
            InterviewStatus::Completed,
            InterviewStatus::Cancelled,
        ] {
            let raw = PgShortlistRepository::status_to_str(status);
            assert_eq!(PgShortlistRepository::parse_status(raw).unwrap(), status);
        }
    }
}
