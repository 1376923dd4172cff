//! Job endpoints.

use crate::{
    error::{ApiError, ApiResult},
    extractors::Pagination,
    responses::{ApiResponse, NoContent, PaginatedResponse},
    state::AppState,
};
use axum::{
    extract::{Multipart, Path, State},
    routing::{get, post},
    Json, Router,
};
use cv_screen_application::services::ServiceContext;
use cv_screen_domain::identifiers::JobId;
use cv_screen_domain::job::{Job, JobSummary};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Job list item (summary)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JobListItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub summarized: bool,
    pub created_at: String,
}

impl From<Job> for JobListItem {
    fn from(job: Job) -> Self {
        Self {
            id: job.id.to_string(),
            title: job.title,
            description: job.description,
            summarized: job.summary.is_some(),
            created_at: job.created_at.to_rfc3339(),
        }
    }
}

/// Job detail response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JobDetail {
    pub id: String,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub summary: Option<JobSummaryResponse>,
    pub created_at: String,
}

/// Job summary payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JobSummaryResponse {
    pub summary: String,
    pub key_requirements: Vec<String>,
    pub key_responsibilities: Vec<String>,
}

impl From<JobSummary> for JobSummaryResponse {
    fn from(summary: JobSummary) -> Self {
        Self {
            summary: summary.summary,
            key_requirements: summary.key_requirements,
            key_responsibilities: summary.key_responsibilities,
        }
    }
}

impl From<Job> for JobDetail {
    fn from(job: Job) -> Self {
        Self {
            id: job.id.to_string(),
            title: job.title,
            description: job.description,
            requirements: job.requirements,
            summary: job.summary.map(Into::into),
            created_at: job.created_at.to_rfc3339(),
        }
    }
}

/// Import outcome response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImportResponse {
    pub jobs_created: usize,
    pub rows_skipped: usize,
}

/// Job routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(list_jobs).delete(delete_all_jobs))
        .route("/jobs/import", post(import_jobs))
        .route("/jobs/:id", get(get_job).delete(delete_job))
        .route("/jobs/:id/summarize", post(summarize_job))
}

pub(crate) fn request_ctx() -> ServiceContext {
    ServiceContext::new(Uuid::new_v4().to_string())
}

pub(crate) fn parse_job_id(raw: &str) -> ApiResult<JobId> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid job id: {raw}")))
}

/// Read the first `file` field of a multipart upload as bytes.
async fn read_file_field(multipart: &mut Multipart) -> ApiResult<Vec<u8>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Unreadable upload: {e}")))?;
            return Ok(data.to_vec());
        }
    }
    Err(ApiError::BadRequest("No file provided".to_string()))
}

/// Import jobs
///
/// Import job postings from an uploaded CSV file.
#[utoipa::path(
    post,
    path = "/jobs/import",
    tag = "jobs",
    responses(
        (status = 200, description = "Jobs imported", body = ImportResponse),
        (status = 400, description = "No file or malformed upload"),
        (status = 422, description = "Missing required columns"),
    )
)]
async fn import_jobs(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ApiResponse<ImportResponse>>> {
    let ctx = request_ctx();
    let data = read_file_field(&mut multipart).await?;

    let outcome = state.job_service.import_csv(&ctx, &data).await?;

    let response = ImportResponse {
        jobs_created: outcome.jobs_created,
        rows_skipped: outcome.rows_skipped,
    };

    Ok(Json(ApiResponse::success_with_message(
        response,
        format!("Successfully imported {} jobs", outcome.jobs_created),
    )))
}

/// List jobs
///
/// Returns a paginated list of jobs, newest first.
#[utoipa::path(
    get,
    path = "/jobs",
    tag = "jobs",
    params(
        ("page" = Option<u32>, Query, description = "Page number (1-indexed)"),
        ("per_page" = Option<u32>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "List of jobs", body = PaginatedResponse<JobListItem>)
    )
)]
async fn list_jobs(
    State(state): State<AppState>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<JobListItem>>> {
    let ctx = request_ctx();

    let result = state
        .job_service
        .list(&ctx, pagination.into_service())
        .await?;

    Ok(Json(PaginatedResponse::from_result(result, Into::into)))
}

/// Get job by ID
#[utoipa::path(
    get,
    path = "/jobs/{id}",
    tag = "jobs",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job details", body = JobDetail),
        (status = 404, description = "Job not found"),
    )
)]
async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<JobDetail>>> {
    let ctx = request_ctx();
    let id = parse_job_id(&id)?;

    let job = state
        .job_service
        .get(&ctx, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(ApiResponse::success(job.into())))
}

/// Summarize job
///
/// Produce and store a structured summary of the job description.
#[utoipa::path(
    post,
    path = "/jobs/{id}/summarize",
    tag = "jobs",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Job summarized", body = JobSummaryResponse),
        (status = 404, description = "Job not found"),
        (status = 503, description = "Model endpoint unavailable"),
    )
)]
async fn summarize_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<JobSummaryResponse>>> {
    let ctx = request_ctx();
    let id = parse_job_id(&id)?;

    let summary = state.job_service.summarize(&ctx, id).await?;

    Ok(Json(ApiResponse::success(summary.into())))
}

/// Delete job
///
/// Delete a job and its associated candidates and shortlist entries.
#[utoipa::path(
    delete,
    path = "/jobs/{id}",
    tag = "jobs",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 404, description = "Job not found"),
    )
)]
async fn delete_job(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<NoContent> {
    let ctx = request_ctx();
    let id = parse_job_id(&id)?;

    state.job_service.delete(&ctx, id).await?;

    Ok(NoContent)
}

/// Delete all jobs
///
/// Delete every job along with all candidates and shortlist entries.
#[utoipa::path(
    delete,
    path = "/jobs",
    tag = "jobs",
    responses(
        (status = 200, description = "All jobs deleted"),
    )
)]
async fn delete_all_jobs(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<u64>>> {
    let ctx = request_ctx();

    let removed = state.job_service.delete_all(&ctx).await?;

    Ok(Json(ApiResponse::success_with_message(
        removed,
        "All jobs deleted successfully",
    )))
}
