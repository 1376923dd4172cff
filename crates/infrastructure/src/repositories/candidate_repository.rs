//! Candidate repository implementation.

use async_trait::async_trait;
use cv_screen_application::services::{CandidateRepositoryPort, Pagination};
use cv_screen_application::ApplicationError;
use cv_screen_domain::analysis::CvAnalysis;
use cv_screen_domain::candidate::{Candidate, CandidateStatus};
use cv_screen_domain::identifiers::{CandidateId, JobId};
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use super::{db_err, json_err};

/// PostgreSQL implementation of the candidate repository port.
pub struct PgCandidateRepository {
    pool: PgPool,
}

impl PgCandidateRepository {
    /// Create a new PostgreSQL candidate repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn status_to_str(status: CandidateStatus) -> &'static str {
        match status {
            CandidateStatus::Pending => "pending",
            CandidateStatus::Analyzed => "analyzed",
            CandidateStatus::Failed => "failed",
        }
    }

    fn parse_status(raw: &str) -> Result<CandidateStatus, ApplicationError> {
        match raw {
            "pending" => Ok(CandidateStatus::Pending),
            "analyzed" => Ok(CandidateStatus::Analyzed),
            "failed" => Ok(CandidateStatus::Failed),
            other => Err(ApplicationError::Internal(format!(
                "Unknown candidate status in database: {other}"
            ))),
        }
    }

    fn row_to_candidate(row: sqlx::postgres::PgRow) -> Result<Candidate, ApplicationError> {
        let analysis: Option<serde_json::Value> = row.get("analysis");
        let status: String = row.get("status");

        Ok(Candidate {
            id: CandidateId::from(row.get::<Uuid, _>("id")),
            job_id: JobId::from(row.get::<Uuid, _>("job_id")),
            name: row.get("name"),
            cv_text: row.get("cv_text"),
            analysis: analysis
                .map(serde_json::from_value)
                .transpose()
                .map_err(json_err)?,
            match_score: row.get("match_score"),
            status: Self::parse_status(&status)?,
            created_at: row.get("created_at"),
        })
    }
}

#[async_trait]
impl CandidateRepositoryPort for PgCandidateRepository {
    #[instrument(skip(self, candidate), fields(candidate_id = %candidate.id))]
    async fn insert(&self, candidate: &Candidate) -> Result<(), ApplicationError> {
        let analysis = candidate
            .analysis
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(json_err)?;

        sqlx::query(
            r#"
            INSERT INTO candidates (id, job_id, name, cv_text, analysis, match_score, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(candidate.id.into_uuid())
        .bind(candidate.job_id.into_uuid())
        .bind(&candidate.name)
        .bind(&candidate.cv_text)
        .bind(analysis)
        .bind(candidate.match_score)
        .bind(Self::status_to_str(candidate.status))
        .bind(candidate.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    async fn get(&self, id: CandidateId) -> Result<Option<Candidate>, ApplicationError> {
        let row = sqlx::query(
            r#"
            SELECT id, job_id, name, cv_text, analysis, match_score, status, created_at
            FROM candidates
            WHERE id = $1
            "#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(Self::row_to_candidate).transpose()
    }

    async fn list_for_job(
        &self,
        job_id: JobId,
        pagination: &Pagination,
    ) -> Result<(Vec<Candidate>, u64), ApplicationError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM candidates WHERE job_id = $1")
            .bind(job_id.into_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        let rows = sqlx::query(
            r#"
            SELECT id, job_id, name, cv_text, analysis, match_score, status, created_at
            FROM candidates
            WHERE job_id = $1
            ORDER BY match_score DESC, created_at ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(job_id.into_uuid())
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let candidates = rows
            .into_iter()
            .map(Self::row_to_candidate)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((candidates, total as u64))
    }

    async fn list_all_for_job(&self, job_id: JobId) -> Result<Vec<Candidate>, ApplicationError> {
        let rows = sqlx::query(
            r#"
            SELECT id, job_id, name, cv_text, analysis, match_score, status, created_at
            FROM candidates
            WHERE job_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(job_id.into_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(Self::row_to_candidate).collect()
    }

    async fn list_above_score(
        &self,
        job_id: JobId,
        threshold: f64,
    ) -> Result<Vec<Candidate>, ApplicationError> {
        let rows = sqlx::query(
            r#"
            SELECT id, job_id, name, cv_text, analysis, match_score, status, created_at
            FROM candidates
            WHERE job_id = $1 AND match_score >= $2
            ORDER BY match_score DESC
            "#,
        )
        .bind(job_id.into_uuid())
        .bind(threshold)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(Self::row_to_candidate).collect()
    }

    #[instrument(skip(self, analysis))]
    async fn update_analysis(
        &self,
        id: CandidateId,
        analysis: &CvAnalysis,
        status: CandidateStatus,
    ) -> Result<(), ApplicationError> {
        let payload = serde_json::to_value(analysis).map_err(json_err)?;

        let result = sqlx::query(
            r#"
            UPDATE candidates
            SET analysis = $2, match_score = $3, status = $4
            WHERE id = $1
            "#,
        )
        .bind(id.into_uuid())
        .bind(payload)
        .bind(analysis.match_score)
        .bind(Self::status_to_str(status))
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(ApplicationError::NotFound(format!(
                "Candidate not found: {id}"
            )));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: CandidateId) -> Result<bool, ApplicationError> {
        let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: &[CandidateId]) -> Result<u64, ApplicationError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| id.into_uuid()).collect();

        let result = sqlx::query("DELETE FROM candidates WHERE id = ANY($1)")
            .bind(&uuids)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected())
    }

    async fn delete_for_job(&self, job_id: JobId) -> Result<u64, ApplicationError> {
        let result = sqlx::query("DELETE FROM candidates WHERE job_id = $1")
            .bind(job_id.into_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected())
    }

    async fn delete_all(&self) -> Result<u64, ApplicationError> {
        let result = sqlx::query("DELETE FROM candidates")
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<u64, ApplicationError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM candidates")
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
            CandidateStatus::Pending,
            CandidateStatus::Analyzed,
            CandidateStatus::Failed,
        ] {
            let raw = PgCandidateRepository::status_to_str(status);
            assert_eq!(PgCandidateRepository::parse_status(raw).unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_is_internal_error() {
        assert!(PgCandidateRepository::parse_status("unknown").is_err());
    }
}
