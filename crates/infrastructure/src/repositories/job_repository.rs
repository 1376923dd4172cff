//! Job repository implementation.

use async_trait::async_trait;
use cv_screen_application::services::{JobRepositoryPort, Pagination};
use cv_screen_application::ApplicationError;
use cv_screen_domain::identifiers::JobId;
use cv_screen_domain::job::{Job, JobSummary};
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use super::{db_err, json_err};

/// PostgreSQL implementation of the job repository port.
pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    /// Create a new PostgreSQL job repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_job(row: sqlx::postgres::PgRow) -> Result<Job, ApplicationError> {
        let summary: Option<serde_json::Value> = row.get("summary");
        Ok(Job {
            id: JobId::from(row.get::<Uuid, _>("id")),
            title: row.get("title"),
            description: row.get("description"),
            requirements: row.get("requirements"),
            summary: summary
                .map(serde_json::from_value)
                .transpose()
                .map_err(json_err)?,
            created_at: row.get("created_at"),
        })
    }
}

#[async_trait]
impl JobRepositoryPort for PgJobRepository {
    #[instrument(skip(self, job), fields(job_id = %job.id))]
    async fn insert(&self, job: &Job) -> Result<(), ApplicationError> {
        let summary = job
            .summary
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(json_err)?;

        sqlx::query(
            r#"
            INSERT INTO jobs (id, title, description, requirements, summary, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(job.id.into_uuid())
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(summary)
        .bind(job.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(())
    }

    #[instrument(skip(self, jobs), fields(count = jobs.len()))]
    async fn insert_many(&self, jobs: &[Job]) -> Result<usize, ApplicationError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        for job in jobs {
            let summary = job
                .summary
                .as_ref()
                .map(serde_json::to_value)
                .transpose()
                .map_err(json_err)?;

            sqlx::query(
                r#"
                INSERT INTO jobs (id, title, description, requirements, summary, created_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(job.id.into_uuid())
            .bind(&job.title)
            .bind(&job.description)
            .bind(&job.requirements)
            .bind(summary)
            .bind(job.created_at)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)?;
        Ok(jobs.len())
    }

    async fn get(&self, id: JobId) -> Result<Option<Job>, ApplicationError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, requirements, summary, created_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(Self::row_to_job).transpose()
    }

    async fn list(&self, pagination: &Pagination) -> Result<(Vec<Job>, u64), ApplicationError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        let rows = sqlx::query(
            r#"
            SELECT id, title, description, requirements, summary, created_at
            FROM jobs
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        let jobs = rows
            .into_iter()
            .map(Self::row_to_job)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((jobs, total as u64))
    }

    async fn list_all(&self) -> Result<Vec<Job>, ApplicationError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, requirements, summary, created_at
            FROM jobs
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(Self::row_to_job).collect()
    }

    #[instrument(skip(self, summary))]
    async fn set_summary(&self, id: JobId, summary: &JobSummary) -> Result<(), ApplicationError> {
        let payload = serde_json::to_value(summary).map_err(json_err)?;

        let result = sqlx::query("UPDATE jobs SET summary = $2 WHERE id = $1")
            .bind(id.into_uuid())
            .bind(payload)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(ApplicationError::NotFound(format!("Job not found: {id}")));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: JobId) -> Result<bool, ApplicationError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id.into_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<u64, ApplicationError> {
        let result = sqlx::query("DELETE FROM jobs")
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<u64, ApplicationError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(total as u64)
    }
}
