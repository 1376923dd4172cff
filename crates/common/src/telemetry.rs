//! Telemetry and observability setup.
//!
//! This module provides utilities for setting up structured logging using
//! the tracing ecosystem.

use anyhow::Result;
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Initialize tracing for a service.
///
/// The `RUST_LOG` environment variable takes precedence over the configured
/// `log_level`. Repeated initialization (as happens across tests) is not an
/// error.
///
/// # Arguments
///
/// * `service_name` - Name of the service, recorded on every event
/// * `json_format` - Whether to use JSON formatting for logs
/// * `log_level` - Log level filter (e.g., "info", "debug")
///
/// # Examples
///
/// ```no_run
/// use cv_screen_common::telemetry::init_tracing;
///
/// init_tracing("cv-screen-api", false, "info").expect("Failed to initialize tracing");
/// ```
pub fn init_tracing(service_name: &str, json_format: bool, log_level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = Registry::default().with(env_filter);

    let result = if json_format {
        registry.with(json_layer()).try_init()
    } else {
        registry.with(pretty_layer()).try_init()
    };

    // A second initialization (tests, embedded servers) keeps the existing
    // global subscriber.
    if result.is_ok() {
        tracing::info!(service = service_name, "Tracing initialized");
    }

    Ok(())
}

/// Create a JSON logging layer
fn json_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_target(true)
        .with_level(true)
}

/// Create a pretty-formatted logging layer
fn pretty_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer().with_target(true).with_level(true)
}
