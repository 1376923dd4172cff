//! CV-Screen REST API server.

use anyhow::Result;
use cv_screen_api_rest::{create_app, ApiConfig, AppState};
use cv_screen_application::services::NoOpEventPublisher;
use cv_screen_common::config::AppConfig;
use cv_screen_common::telemetry::init_tracing;
use cv_screen_infrastructure::database::{DatabaseConfig, DatabasePool};
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let app_config = AppConfig::load()?;
    let api_config = ApiConfig::from_env()?;

    init_tracing(
        &app_config.telemetry.service_name,
        app_config.telemetry.json_logging,
        &app_config.telemetry.log_level,
    )?;

    info!(
        host = %api_config.host,
        port = api_config.port,
        model = %app_config.llm.model,
        "Starting CV-Screen API"
    );

    let db_config = DatabaseConfig {
        url: app_config.database.url.clone(),
        max_connections: app_config.database.pool_size,
        acquire_timeout: app_config.database_timeout(),
        ..DatabaseConfig::default()
    };
    let pool = DatabasePool::new(&db_config).await?;

    let state = AppState::with_postgres(
        api_config.clone(),
        &app_config,
        &pool,
        Arc::new(NoOpEventPublisher),
    )?;

    let app = create_app(&api_config, state);

    let listener = tokio::net::TcpListener::bind(api_config.bind_addr()).await?;
    info!(addr = %api_config.bind_addr(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
