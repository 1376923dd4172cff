//! Application builder and configuration.
//!
//! This module provides the main application builder that assembles
//! all routes, middleware, and state into an Axum router.

use crate::{
    config::ApiConfig,
    middleware::{logging_middleware, request_id_middleware},
    routes,
    state::AppState,
};
use axum::{extract::DefaultBodyLimit, middleware, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create the main application router
pub fn create_app(config: &ApiConfig, state: AppState) -> Router {
    // Build the router
    let mut app = Router::new()
        // Navigable pages (the route table)
        .merge(routes::pages::routes())
        // Health check routes
        .merge(routes::health::routes())
        // API v1 routes
        .nest("/api/v1", routes::v1::routes())
        // Add state
        .with_state(state);

    // Add Swagger UI if enabled
    if config.enable_swagger {
        app = app.merge(swagger_ui());
    }

    app
        // Add middleware layers
        .layer(
            ServiceBuilder::new()
                // Tracing
                .layer(TraceLayer::new_for_http())
                // Compression
                .layer(CompressionLayer::new())
                // CORS
                .layer(build_cors_layer(config))
                // Timeout
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.request_timeout_seconds,
                )))
                // Upload size bound
                .layer(DefaultBodyLimit::max(config.max_body_size))
                // Custom middleware
                .layer(middleware::from_fn(request_id_middleware))
                .layer(middleware::from_fn(logging_middleware)),
        )
}

/// Build CORS layer from configuration
fn build_cors_layer(_config: &ApiConfig) -> CorsLayer {
    // An internal tool: permissive CORS regardless of origin list.
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create Swagger UI routes
fn swagger_ui() -> SwaggerUi {
    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "CV-Screen API",
            version = "1.0.0",
            description = "REST API for the CV-Screen recruitment platform",
            license(name = "MIT"),
        ),
        servers(
            (url = "/api/v1", description = "API v1")
        ),
        tags(
            (name = "health", description = "Health check endpoints"),
            (name = "jobs", description = "Job import and management"),
            (name = "candidates", description = "CV ingestion and analysis"),
            (name = "shortlist", description = "Shortlisting and interview scheduling"),
        )
    )]
    struct ApiDoc;

    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
