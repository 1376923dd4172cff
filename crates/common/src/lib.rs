//! Common utilities and shared functionality for the CV-Screen platform.
//!
//! This crate provides foundational utilities used across all services including:
//! - Configuration management
//! - Telemetry and observability
//! - Text normalization for imported documents
//! - Interview slot arithmetic and datetime formatting

pub mod config;
pub mod datetime;
pub mod telemetry;
pub mod text;

// Re-export commonly used types
pub use config::{AppConfig, DatabaseConfig, LlmConfig, RedisConfig, ServerConfig, StorageConfig, TelemetryConfig};
pub use datetime::{format_interview_slot, interview_slots, next_interview_day};
pub use telemetry::init_tracing;
pub use text::{clean_imported_text, truncate_chars};

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
