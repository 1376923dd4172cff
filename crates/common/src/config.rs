//! Configuration management for the application.
//!
//! This module provides a centralized configuration system that loads settings
//! from environment variables and configuration files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// PostgreSQL settings
    pub database: DatabaseConfig,
    /// Redis settings (worker queue)
    pub redis: RedisConfig,
    /// Object storage settings (CV document archive)
    pub storage: StorageConfig,
    /// Language model settings
    pub llm: LlmConfig,
    /// Logging and tracing settings
    pub telemetry: TelemetryConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (e.g., "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Connection pool size
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_db_timeout")]
    pub timeout_seconds: u64,
}

/// Redis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL
    pub url: String,
}

/// Object storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Bucket name for archived CV documents
    pub bucket: String,

    /// Region
    pub region: String,

    /// Custom endpoint (for S3-compatible services such as MinIO)
    pub endpoint: Option<String>,
}

/// Language model configuration
///
/// Defaults target a local Ollama instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Chat endpoint base URL
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    /// Model name (e.g. "llama3:latest")
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Maximum characters of CV and job description sent to the model
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// Number of CVs analyzed concurrently by the worker
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Match score at or above which candidates are shortlisted
    #[serde(default = "default_shortlist_threshold")]
    pub shortlist_threshold: f64,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u64,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Enable JSON logging format
    #[serde(default)]
    pub json_logging: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_pool_size() -> u32 {
    10
}

fn default_db_timeout() -> u64 {
    30
}

fn default_llm_endpoint() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_llm_model() -> String {
    "llama3:latest".to_string()
}

fn default_max_text_length() -> usize {
    4000
}

fn default_batch_size() -> usize {
    5
}

fn default_shortlist_threshold() -> f64 {
    0.8
}

fn default_llm_timeout() -> u64 {
    120
}

fn default_service_name() -> String {
    "cv-screen".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            max_text_length: default_max_text_length(),
            batch_size: default_batch_size(),
            shortlist_threshold: default_shortlist_threshold(),
            timeout_seconds: default_llm_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and configuration files.
    ///
    /// The configuration is loaded in the following order (later sources override earlier ones):
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/{environment}.toml (if exists, where environment is from APP_ENV)
    /// 4. Environment variables (prefixed with APP_)
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cv_screen_common::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load configuration");
    /// println!("Server will run on {}:{}", config.server.host, config.server.port);
    /// ```
    pub fn load() -> Result<Self> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            // Start with default configuration file
            .add_source(config::File::with_name("config/default").required(false))
            // Add environment-specific configuration
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            // Add environment variables (prefix: APP_)
            // Example: APP_SERVER__PORT=3000
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.server.workers == 0 {
            anyhow::bail!("Number of workers must be greater than 0");
        }

        if self.database.url.is_empty() {
            anyhow::bail!("Database URL is required");
        }

        if self.database.pool_size == 0 {
            anyhow::bail!("Database pool size must be greater than 0");
        }

        if self.redis.url.is_empty() {
            anyhow::bail!("Redis URL is required");
        }

        if self.storage.bucket.is_empty() {
            anyhow::bail!("Storage bucket name is required");
        }

        if self.llm.endpoint.is_empty() {
            anyhow::bail!("LLM endpoint is required");
        }

        if self.llm.model.is_empty() {
            anyhow::bail!("LLM model name is required");
        }

        if self.llm.max_text_length == 0 {
            anyhow::bail!("LLM max text length must be greater than 0");
        }

        if self.llm.batch_size == 0 {
            anyhow::bail!("LLM batch size must be greater than 0");
        }

        if !(0.0..=1.0).contains(&self.llm.shortlist_threshold) {
            anyhow::bail!(
                "Shortlist threshold must be within [0, 1], got {}",
                self.llm.shortlist_threshold
            );
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                valid_log_levels.join(", ")
            );
        }

        Ok(())
    }

    /// Get the database connection timeout as a Duration
    pub fn database_timeout(&self) -> Duration {
        Duration::from_secs(self.database.timeout_seconds)
    }

    /// Get the LLM request timeout as a Duration
    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm.timeout_seconds)
    }

    /// Create a development configuration with sensible defaults
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                workers: 4,
            },
            database: DatabaseConfig {
                url: "postgres://localhost:5432/cv_screen_dev".to_string(),
                pool_size: 5,
                timeout_seconds: 30,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
            },
            storage: StorageConfig {
                bucket: "cv-screen-dev".to_string(),
                region: "us-east-1".to_string(),
                endpoint: Some("http://localhost:9000".to_string()), // MinIO
            },
            llm: LlmConfig::default(),
            telemetry: TelemetryConfig {
                service_name: "cv-screen-dev".to_string(),
                json_logging: false,
                log_level: "debug".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::development();

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Invalid port
        config.server.port = 0;
        assert!(config.validate().is_err());
        config.server.port = 8080;

        // Invalid threshold
        config.llm.shortlist_threshold = 1.5;
        assert!(config.validate().is_err());
        config.llm.shortlist_threshold = 0.8;

        // Invalid log level
        config.telemetry.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_llm_defaults() {
        let llm = LlmConfig::default();
        assert_eq!(llm.model, "llama3:latest");
        assert_eq!(llm.max_text_length, 4000);
        assert_eq!(llm.batch_size, 5);
        assert_eq!(llm.shortlist_threshold, 0.8);
    }
}
