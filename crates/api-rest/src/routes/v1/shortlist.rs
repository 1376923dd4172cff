//! Shortlist, interview scheduling, and pipeline endpoints.

use super::jobs::{parse_job_id, request_ctx};
use crate::{
    error::{ApiError, ApiResult},
    responses::ApiResponse,
    state::AppState,
};
use axum::{
    extract::{Multipart, Path, State},
    routing::{get, post},
    Json, Router,
};
use cv_screen_application::services::ServiceContext;
use cv_screen_common::datetime::format_interview_slot;
use cv_screen_domain::shortlist::ShortlistEntry;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Shortlist request body
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct ShortlistApiRequest {
    /// Score threshold override; the configured default applies when absent
    #[validate(range(min = 0.0, max = 1.0))]
    pub threshold: Option<f64>,
}

/// Shortlist entry response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShortlistEntryResponse {
    pub id: String,
    pub candidate_id: String,
    pub candidate_name: String,
    pub interview_date: Option<String>,
    pub status: String,
}

/// Pipeline outcome
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProcessAllResponse {
    pub jobs_created: usize,
    pub cvs_processed: usize,
    pub candidates_shortlisted: usize,
}

/// Shortlist routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/jobs/:id/shortlist",
            get(list_shortlist).post(shortlist_job),
        )
        .route("/shortlist-all", post(shortlist_all))
        .route(
            "/jobs/:id/interviews",
            get(list_interviews).post(schedule_interviews),
        )
        .route("/process-all", post(process_all))
}

/// Resolve candidate names for shortlist entries.
async fn entry_responses(
    state: &AppState,
    ctx: &ServiceContext,
    entries: Vec<ShortlistEntry>,
) -> ApiResult<Vec<ShortlistEntryResponse>> {
    let mut responses = Vec::with_capacity(entries.len());

    for entry in entries {
        let candidate_name = state
            .candidate_service
            .get(ctx, entry.candidate_id)
            .await?
            .map(|candidate| candidate.name)
            .unwrap_or_else(|| "Unknown".to_string());

        responses.push(ShortlistEntryResponse {
            id: entry.id.to_string(),
            candidate_id: entry.candidate_id.to_string(),
            candidate_name,
            interview_date: entry.interview_date.map(format_interview_slot),
            status: entry.status.display_name().to_string(),
        });
    }

    Ok(responses)
}

/// Shortlist candidates for a job
///
/// Create shortlist entries for candidates whose match score meets the
/// threshold. Idempotent: already-shortlisted candidates are skipped.
#[utoipa::path(
    post,
    path = "/jobs/{id}/shortlist",
    tag = "shortlist",
    params(("id" = String, Path, description = "Job ID")),
    request_body = ShortlistApiRequest,
    responses(
        (status = 200, description = "Candidates shortlisted"),
        (status = 404, description = "Job not found"),
    )
)]
async fn shortlist_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<ShortlistApiRequest>>,
) -> ApiResult<Json<ApiResponse<usize>>> {
    let ctx = request_ctx();
    let job_id = parse_job_id(&id)?;

    let request = body.map(|Json(request)| request).unwrap_or_default();
    request
        .validate()
        .map_err(|e| ApiError::Validation(format!("Validation failed: {e}")))?;

    let created = state
        .shortlist_service
        .shortlist_job(&ctx, job_id, request.threshold)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        created,
        format!("Successfully shortlisted {created} candidates"),
    )))
}

/// Shortlist candidates for every job
#[utoipa::path(
    post,
    path = "/shortlist-all",
    tag = "shortlist",
    responses(
        (status = 200, description = "Candidates shortlisted across all jobs"),
    )
)]
async fn shortlist_all(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<usize>>> {
    let ctx = request_ctx();

    let total = state.shortlist_service.shortlist_all(&ctx).await?;

    Ok(Json(ApiResponse::success_with_message(
        total,
        format!("Successfully shortlisted {total} candidates across all jobs"),
    )))
}

/// List a job's shortlist
#[utoipa::path(
    get,
    path = "/jobs/{id}/shortlist",
    tag = "shortlist",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Shortlist entries", body = Vec<ShortlistEntryResponse>),
        (status = 404, description = "Job not found"),
    )
)]
async fn list_shortlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<ShortlistEntryResponse>>>> {
    let ctx = request_ctx();
    let job_id = parse_job_id(&id)?;

    let entries = state.shortlist_service.list_for_job(&ctx, job_id).await?;
    let responses = entry_responses(&state, &ctx, entries).await?;

    Ok(Json(ApiResponse::success(responses)))
}

/// Schedule interviews
///
/// Assign hourly interview slots, starting 09:00 UTC the next day, to the
/// job's pending shortlist entries.
#[utoipa::path(
    post,
    path = "/jobs/{id}/interviews",
    tag = "shortlist",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Interviews scheduled"),
        (status = 404, description = "Job not found"),
    )
)]
async fn schedule_interviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<usize>>> {
    let ctx = request_ctx();
    let job_id = parse_job_id(&id)?;

    let scheduled = state
        .shortlist_service
        .schedule_interviews(&ctx, job_id)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        scheduled,
        format!("Successfully scheduled {scheduled} interviews"),
    )))
}

/// List scheduled interviews
#[utoipa::path(
    get,
    path = "/jobs/{id}/interviews",
    tag = "shortlist",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Scheduled interviews", body = Vec<ShortlistEntryResponse>),
        (status = 404, description = "Job not found"),
    )
)]
async fn list_interviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<ShortlistEntryResponse>>>> {
    let ctx = request_ctx();
    let job_id = parse_job_id(&id)?;

    let entries = state
        .shortlist_service
        .scheduled_interviews(&ctx, job_id)
        .await?;
    let responses = entry_responses(&state, &ctx, entries).await?;

    Ok(Json(ApiResponse::success(responses)))
}

/// Run the whole pipeline
///
/// Import jobs from the `file` CSV field, analyze every `files` CV against
/// every job, then shortlist across all jobs.
#[utoipa::path(
    post,
    path = "/process-all",
    tag = "shortlist",
    responses(
        (status = 200, description = "Pipeline completed", body = ProcessAllResponse),
        (status = 400, description = "Missing or malformed uploads"),
    )
)]
async fn process_all(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ApiResponse<ProcessAllResponse>>> {
    let ctx = request_ctx();

    let mut jobs_csv: Option<Vec<u8>> = None;
    let mut cvs: Vec<(String, String)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Unreadable upload: {e}")))?;
                jobs_csv = Some(data.to_vec());
            }
            Some("files") => {
                let name = field
                    .file_name()
                    .map(|filename| {
                        filename
                            .rsplit_once('.')
                            .map(|(stem, _)| stem.to_string())
                            .unwrap_or_else(|| filename.to_string())
                    })
                    .unwrap_or_else(|| "Unknown Candidate".to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Unreadable upload: {e}")))?;
                let text = String::from_utf8(data.to_vec()).map_err(|_| {
                    ApiError::BadRequest(format!("CV '{name}' is not valid UTF-8 text"))
                })?;
                cvs.push((name, text));
            }
            _ => {}
        }
    }

    let jobs_csv =
        jobs_csv.ok_or_else(|| ApiError::BadRequest("No jobs file provided".to_string()))?;

    let import = state.job_service.import_csv(&ctx, &jobs_csv).await?;

    let mut cvs_processed = 0;
    for (name, text) in &cvs {
        cvs_processed += state
            .candidate_service
            .ingest_for_all_jobs(&ctx, name, text)
            .await?;
    }

    let candidates_shortlisted = state.shortlist_service.shortlist_all(&ctx).await?;

    let response = ProcessAllResponse {
        jobs_created: import.jobs_created,
        cvs_processed,
        candidates_shortlisted,
    };

    Ok(Json(ApiResponse::success_with_message(
        response,
        "Successfully processed all data",
    )))
}
