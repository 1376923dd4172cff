//! Integration tests for the REST API
//!
//! Drives the full router over in-memory repositories and a scripted model:
//! page routes, health probes, and the jobs/candidates/shortlist flow.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use cv_screen_api_rest::state::StateParts;
use cv_screen_api_rest::{create_app, ApiConfig, AppState};
use cv_screen_application::analysis::AnalysisConfig;
use cv_screen_application::services::ServiceConfig;
use cv_screen_testing::fixtures::*;
use cv_screen_testing::mocks::*;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "cvscreen-test-boundary";

fn test_app(llm: MockLlm) -> Router {
    let config = ApiConfig {
        enable_swagger: false,
        ..ApiConfig::default()
    };

    let parts = StateParts {
        jobs: Arc::new(InMemoryJobRepository::new()),
        candidates: Arc::new(InMemoryCandidateRepository::new()),
        shortlist: Arc::new(InMemoryShortlistRepository::new()),
        llm: Arc::new(llm),
        events: Arc::new(MockEventPublisher::new()),
        service_config: ServiceConfig::default(),
        analysis_config: AnalysisConfig::default(),
    };

    let state = AppState::from_parts(config.clone(), parts);
    create_app(&config, state)
}

fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> Body {
    let mut body = String::new();
    for (name, filename, content) in parts {
        body.push_str(&format!("--{BOUNDARY}\r\n"));
        match filename {
            Some(filename) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )),
            None => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{name}\"\r\n"
            )),
        }
        body.push_str("Content-Type: text/plain\r\n\r\n");
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    Body::from(body)
}

fn multipart_request(uri: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(body)
        .expect("request builds")
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response is JSON")
}

async fn text_body(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).expect("response is UTF-8")
}

async fn import_jobs(app: &Router) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(multipart_request(
            "/api/v1/jobs/import",
            multipart_body(&[("file", Some("jobs.csv"), &jobs_csv())]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    json_body(response).await
}

async fn first_job_id(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/jobs")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    body["items"][0]["id"]
        .as_str()
        .expect("job id present")
        .to_string()
}

#[tokio::test]
async fn test_home_route_resolves_dashboard() {
    let app = test_app(MockLlm::always(analysis_reply(0.9)));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = text_body(response).await;
    assert!(html.contains("Dashboard"));
    assert!(html.contains("0 jobs"));
}

#[tokio::test]
async fn test_cv_analysis_route_resolves_upload_view() {
    let app = test_app(MockLlm::always(analysis_reply(0.9)));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/cv-analysis")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = text_body(response).await;
    assert!(html.contains("CV Analysis"));
    assert!(html.contains("multipart/form-data"));
}

#[tokio::test]
async fn test_unknown_page_is_not_matched() {
    let app = test_app(MockLlm::always(analysis_reply(0.9)));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/no-such-page")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app(MockLlm::always(analysis_reply(0.9)));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_import_jobs_and_list() {
    let app = test_app(MockLlm::always(analysis_reply(0.9)));

    let body = import_jobs(&app).await;
    assert_eq!(body["data"]["jobs_created"], 2);
    assert_eq!(body["data"]["rows_skipped"], 1);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/jobs")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["pagination"]["total"], 2);
}

#[tokio::test]
async fn test_import_jobs_requires_file() {
    let app = test_app(MockLlm::always(analysis_reply(0.9)));

    let response = app
        .oneshot(multipart_request(
            "/api/v1/jobs/import",
            multipart_body(&[("other", None, "not a file")]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_import_jobs_missing_columns_is_unprocessable() {
    let app = test_app(MockLlm::always(analysis_reply(0.9)));

    let response = app
        .oneshot(multipart_request(
            "/api/v1/jobs/import",
            multipart_body(&[("file", Some("jobs.csv"), "Title,Text\nBackend,Build\n")]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_cv_upload_creates_analyzed_candidates() {
    let app = test_app(MockLlm::always(analysis_reply(0.9)));
    import_jobs(&app).await;
    let job_id = first_job_id(&app).await;

    let response = app
        .clone()
        .oneshot(multipart_request(
            &format!("/api/v1/jobs/{job_id}/candidates"),
            multipart_body(&[("files", Some("ada_lovelace.txt"), SAMPLE_CV_TEXT)]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["processed"], 1);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/jobs/{job_id}/candidates"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["items"][0]["name"], "ada_lovelace");
    assert_eq!(body["items"][0]["status"], "Analyzed");
}

#[tokio::test]
async fn test_candidate_detail_includes_cv_and_analysis() {
    let app = test_app(MockLlm::always(analysis_reply(0.9)));
    import_jobs(&app).await;
    let job_id = first_job_id(&app).await;

    app.clone()
        .oneshot(multipart_request(
            &format!("/api/v1/jobs/{job_id}/candidates"),
            multipart_body(&[("files", Some("ada.txt"), SAMPLE_CV_TEXT)]),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/jobs/{job_id}/candidates"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let listing = json_body(response).await;
    let candidate_id = listing["items"][0]["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/candidates/{candidate_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"]["cv_text"], SAMPLE_CV_TEXT);
    assert!(body["data"]["analysis"]["strengths"].is_array());
}

#[tokio::test]
async fn test_shortlist_and_schedule_flow() {
    let app = test_app(MockLlm::always(analysis_reply(0.9)));
    import_jobs(&app).await;
    let job_id = first_job_id(&app).await;

    app.clone()
        .oneshot(multipart_request(
            &format!("/api/v1/jobs/{job_id}/candidates"),
            multipart_body(&[("files", Some("ada.txt"), SAMPLE_CV_TEXT)]),
        ))
        .await
        .unwrap();

    // Shortlist: the 0.9 score clears the default 0.8 threshold.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/jobs/{job_id}/shortlist"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"], 1);

    // Schedule interviews.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/jobs/{job_id}/interviews"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"], 1);

    // The scheduled slot lands at 09:00 the next day.
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/jobs/{job_id}/interviews"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    let slot = body["data"][0]["interview_date"].as_str().unwrap();
    assert!(slot.ends_with("09:00:00"));
    assert_eq!(body["data"][0]["status"], "Scheduled");
    assert_eq!(body["data"][0]["candidate_name"], "ada");
}

#[tokio::test]
async fn test_bulk_delete_requires_ids() {
    let app = test_app(MockLlm::always(analysis_reply(0.9)));

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/candidates")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"candidate_ids": []}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_job_cascades() {
    let app = test_app(MockLlm::always(analysis_reply(0.9)));
    import_jobs(&app).await;
    let job_id = first_job_id(&app).await;

    app.clone()
        .oneshot(multipart_request(
            &format!("/api/v1/jobs/{job_id}/candidates"),
            multipart_body(&[("files", Some("ada.txt"), SAMPLE_CV_TEXT)]),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/jobs/{job_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/jobs/{job_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_process_all_pipeline() {
    let app = test_app(MockLlm::always(analysis_reply(0.9)));

    let response = app
        .clone()
        .oneshot(multipart_request(
            "/api/v1/process-all",
            multipart_body(&[
                ("file", Some("jobs.csv"), &jobs_csv()),
                ("files", Some("ada.txt"), SAMPLE_CV_TEXT),
            ]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["jobs_created"], 2);
    // One CV against two jobs.
    assert_eq!(body["data"]["cvs_processed"], 2);
    assert_eq!(body["data"]["candidates_shortlisted"], 2);

    // The dashboard reflects the new totals.
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let html = text_body(response).await;
    assert!(html.contains("2 jobs"));
    assert!(html.contains("2 candidates"));
    assert!(html.contains("2 shortlisted"));
}
