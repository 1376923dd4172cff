//! Candidate endpoints.

use super::jobs::{parse_job_id, request_ctx};
use crate::{
    error::{ApiError, ApiResult},
    extractors::{Pagination, ValidatedJson},
    responses::{ApiResponse, NoContent, PaginatedResponse},
    state::AppState,
};
use axum::{
    extract::{Multipart, Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use cv_screen_domain::analysis::CvAnalysis;
use cv_screen_domain::candidate::Candidate;
use cv_screen_domain::identifiers::CandidateId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Candidate list item (summary)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CandidateListItem {
    pub id: String,
    pub name: String,
    pub match_score: f64,
    pub status: String,
    pub created_at: String,
}

impl From<Candidate> for CandidateListItem {
    fn from(candidate: Candidate) -> Self {
        Self {
            id: candidate.id.to_string(),
            name: candidate.name,
            match_score: candidate.match_score,
            status: candidate.status.display_name().to_string(),
            created_at: candidate.created_at.to_rfc3339(),
        }
    }
}

/// Candidate detail: CV text plus the full analysis
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CandidateDetail {
    pub id: String,
    pub job_id: String,
    pub name: String,
    pub cv_text: String,
    #[schema(value_type = Object)]
    pub analysis: Option<CvAnalysis>,
    pub match_score: f64,
    pub status: String,
}

impl From<Candidate> for CandidateDetail {
    fn from(candidate: Candidate) -> Self {
        Self {
            id: candidate.id.to_string(),
            job_id: candidate.job_id.to_string(),
            name: candidate.name,
            cv_text: candidate.cv_text,
            analysis: candidate.analysis,
            match_score: candidate.match_score,
            status: candidate.status.display_name().to_string(),
        }
    }
}

/// Bulk delete request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteCandidatesApiRequest {
    #[validate(length(min = 1))]
    pub candidate_ids: Vec<String>,
}

/// Bulk ingestion outcome
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IngestOutcome {
    pub processed: usize,
    pub failed: usize,
}

/// Candidate routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/jobs/:id/candidates",
            get(list_candidates)
                .post(import_cvs)
                .delete(delete_job_candidates),
        )
        .route("/jobs/:id/candidates/reanalyze", post(reanalyze_candidates))
        .route("/candidates/import-all", post(import_cvs_all_jobs))
        .route(
            "/candidates/:id",
            get(get_candidate).delete(delete_candidate),
        )
        .route("/candidates", delete(delete_candidates))
}

fn parse_candidate_id(raw: &str) -> ApiResult<CandidateId> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid candidate id: {raw}")))
}

/// An uploaded CV: candidate name (from the filename) and extracted text.
struct UploadedCv {
    name: String,
    text: String,
}

/// Collect the `files` fields of a multipart upload as UTF-8 CV texts.
async fn read_cv_fields(multipart: &mut Multipart) -> ApiResult<Vec<UploadedCv>> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("files") {
            continue;
        }

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

        let text = String::from_utf8(data.to_vec())
            .map_err(|_| ApiError::BadRequest(format!("CV '{name}' is not valid UTF-8 text")))?;

        uploads.push(UploadedCv { name, text });
    }

    if uploads.is_empty() {
        return Err(ApiError::BadRequest("No files provided".to_string()));
    }

    Ok(uploads)
}

/// Import CVs for a job
///
/// Upload one or more CV text files; each is analyzed against the job and
/// stored as a candidate.
#[utoipa::path(
    post,
    path = "/jobs/{id}/candidates",
    tag = "candidates",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "CVs processed", body = IngestOutcome),
        (status = 400, description = "No files or malformed upload"),
        (status = 404, description = "Job not found"),
    )
)]
async fn import_cvs(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Json<ApiResponse<IngestOutcome>>> {
    let ctx = request_ctx();
    let job_id = parse_job_id(&id)?;
    let uploads = read_cv_fields(&mut multipart).await?;

    let mut outcome = IngestOutcome {
        processed: 0,
        failed: 0,
    };

    for upload in uploads {
        match state
            .candidate_service
            .ingest(&ctx, job_id, &upload.name, &upload.text)
            .await
        {
            Ok(_) => outcome.processed += 1,
            Err(e @ cv_screen_application::ApplicationError::NotFound(_)) => {
                return Err(e.into());
            }
            Err(e) => {
                tracing::warn!(error = %e, candidate = %upload.name, "Skipping CV");
                outcome.failed += 1;
            }
        }
    }

    let message = format!("Successfully processed {} CVs", outcome.processed);
    Ok(Json(ApiResponse::success_with_message(outcome, message)))
}

/// Import CVs against all jobs
///
/// Upload CV text files and analyze each against every job.
#[utoipa::path(
    post,
    path = "/candidates/import-all",
    tag = "candidates",
    responses(
        (status = 200, description = "CVs processed", body = IngestOutcome),
        (status = 400, description = "No files or malformed upload"),
    )
)]
async fn import_cvs_all_jobs(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ApiResponse<IngestOutcome>>> {
    let ctx = request_ctx();
    let uploads = read_cv_fields(&mut multipart).await?;

    let mut outcome = IngestOutcome {
        processed: 0,
        failed: 0,
    };

    for upload in uploads {
        match state
            .candidate_service
            .ingest_for_all_jobs(&ctx, &upload.name, &upload.text)
            .await
        {
            Ok(created) => outcome.processed += created,
            Err(e) => {
                tracing::warn!(error = %e, candidate = %upload.name, "Skipping CV");
                outcome.failed += 1;
            }
        }
    }

    let message = format!("Successfully processed {} CVs", outcome.processed);
    Ok(Json(ApiResponse::success_with_message(outcome, message)))
}

/// List candidates for a job
///
/// Returns a paginated list ordered by match score, best first.
#[utoipa::path(
    get,
    path = "/jobs/{id}/candidates",
    tag = "candidates",
    params(
        ("id" = String, Path, description = "Job ID"),
        ("page" = Option<u32>, Query, description = "Page number (1-indexed)"),
        ("per_page" = Option<u32>, Query, description = "Items per page"),
    ),
    responses(
        (status = 200, description = "Candidates", body = PaginatedResponse<CandidateListItem>),
        (status = 404, description = "Job not found"),
    )
)]
async fn list_candidates(
    State(state): State<AppState>,
    Path(id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<CandidateListItem>>> {
    let ctx = request_ctx();
    let job_id = parse_job_id(&id)?;

    let result = state
        .candidate_service
        .list_for_job(&ctx, job_id, pagination.into_service())
        .await?;

    Ok(Json(PaginatedResponse::from_result(result, Into::into)))
}

/// Get candidate
///
/// Returns the candidate's CV text and full analysis.
#[utoipa::path(
    get,
    path = "/candidates/{id}",
    tag = "candidates",
    params(("id" = String, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Candidate details", body = CandidateDetail),
        (status = 404, description = "Candidate not found"),
    )
)]
async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<CandidateDetail>>> {
    let ctx = request_ctx();
    let id = parse_candidate_id(&id)?;

    let candidate = state
        .candidate_service
        .get(&ctx, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(ApiResponse::success(candidate.into())))
}

/// Re-analyze candidates
///
/// Re-run analysis for every candidate of a job against its current
/// description.
#[utoipa::path(
    post,
    path = "/jobs/{id}/candidates/reanalyze",
    tag = "candidates",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Candidates re-analyzed"),
        (status = 404, description = "Job not found"),
    )
)]
async fn reanalyze_candidates(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<usize>>> {
    let ctx = request_ctx();
    let job_id = parse_job_id(&id)?;

    let reanalyzed = state.candidate_service.reanalyze_job(&ctx, job_id).await?;

    Ok(Json(ApiResponse::success_with_message(
        reanalyzed,
        format!("Successfully reanalyzed {reanalyzed} candidates"),
    )))
}

/// Delete candidate
#[utoipa::path(
    delete,
    path = "/candidates/{id}",
    tag = "candidates",
    params(("id" = String, Path, description = "Candidate ID")),
    responses(
        (status = 204, description = "Candidate deleted"),
        (status = 404, description = "Candidate not found"),
    )
)]
async fn delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<NoContent> {
    let ctx = request_ctx();
    let id = parse_candidate_id(&id)?;

    state.candidate_service.delete(&ctx, id).await?;

    Ok(NoContent)
}

/// Delete candidates in bulk
#[utoipa::path(
    delete,
    path = "/candidates",
    tag = "candidates",
    request_body = DeleteCandidatesApiRequest,
    responses(
        (status = 200, description = "Candidates deleted"),
        (status = 400, description = "No candidates specified or invalid ids"),
    )
)]
async fn delete_candidates(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<DeleteCandidatesApiRequest>,
) -> ApiResult<Json<ApiResponse<u64>>> {
    let ctx = request_ctx();

    let ids = req
        .candidate_ids
        .iter()
        .map(|raw| parse_candidate_id(raw))
        .collect::<ApiResult<Vec<_>>>()?;

    let removed = state.candidate_service.delete_many(&ctx, &ids).await?;

    Ok(Json(ApiResponse::success_with_message(
        removed,
        format!("{removed} candidates deleted successfully"),
    )))
}

/// Delete all candidates for a job
#[utoipa::path(
    delete,
    path = "/jobs/{id}/candidates",
    tag = "candidates",
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Candidates deleted"),
    )
)]
async fn delete_job_candidates(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<u64>>> {
    let ctx = request_ctx();
    let job_id = parse_job_id(&id)?;

    let removed = state
        .candidate_service
        .delete_for_job(&ctx, job_id)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        removed,
        "All candidates deleted successfully",
    )))
}
