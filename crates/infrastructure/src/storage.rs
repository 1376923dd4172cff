//! Storage module - S3-compatible object storage provider
//!
//! Archives the raw CV documents uploaded for candidates, using AWS S3 or
//! compatible services (MinIO, Cloudflare R2, etc.). The analyzed text
//! lives in the database; the archive keeps the originals for audits and
//! re-extraction.

use async_trait::async_trait;
use aws_sdk_s3::{
    config::{Builder, Credentials, Region},
    primitives::ByteStream,
    Client,
};
use bytes::Bytes;
use cv_screen_domain::identifiers::CandidateId;
use tracing::{debug, info, instrument};

use crate::{Error, Result};

/// S3 storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// S3-compatible endpoint URL (for MinIO, R2, etc.)
    pub endpoint_url: Option<String>,
    /// Region
    pub region: String,
    /// Bucket name
    pub bucket: String,
    /// Access key ID
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
    /// Force path-style access (required for MinIO)
    pub force_path_style: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            region: "us-east-1".to_string(),
            bucket: "cv-screen".to_string(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            force_path_style: false,
        }
    }
}

impl StorageConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let bucket = std::env::var("S3_BUCKET")
            .map_err(|_| Error::Configuration("S3_BUCKET not set".to_string()))?;

        Ok(Self {
            endpoint_url: std::env::var("S3_ENDPOINT_URL").ok(),
            region: std::env::var("AWS_REGION")
                .or_else(|_| std::env::var("S3_REGION"))
                .unwrap_or_else(|_| "us-east-1".to_string()),
            bucket,
            access_key_id: std::env::var("AWS_ACCESS_KEY_ID").unwrap_or_default(),
            secret_access_key: std::env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default(),
            force_path_style: std::env::var("S3_FORCE_PATH_STYLE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}

/// Storage trait for the CV document archive.
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Archive a document, returning its object key.
    async fn put(&self, candidate_id: CandidateId, filename: &str, data: Bytes) -> Result<String>;

    /// Fetch an archived document.
    async fn get(&self, key: &str) -> Result<Bytes>;

    /// Delete an archived document, returning whether it existed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Check whether a document is archived.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// List archived documents under a prefix.
    async fn list(&self, prefix: &str, max_keys: i32) -> Result<Vec<ObjectInfo>>;
}

/// Object information for listing.
#[derive(Debug, Clone)]
pub struct ObjectInfo {
    /// Object key
    pub key: String,
    /// Object size in bytes
    pub size: i64,
    /// Last modified timestamp
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
}

/// S3-compatible storage implementation.
pub struct S3Storage {
    client: Client,
    bucket: String,
}

impl S3Storage {
    /// Create a new S3 storage instance.
    #[instrument(skip(config))]
    pub async fn new(config: StorageConfig) -> Result<Self> {
        info!(bucket = %config.bucket, region = %config.region, "Initializing S3 storage");

        let mut builder = Builder::new().region(Region::new(config.region.clone()));

        if !config.access_key_id.is_empty() && !config.secret_access_key.is_empty() {
            let credentials = Credentials::new(
                &config.access_key_id,
                &config.secret_access_key,
                None,
                None,
                "environment",
            );
            builder = builder.credentials_provider(credentials);
        }

        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        builder = builder.force_path_style(config.force_path_style);

        let client = Client::from_conf(builder.build());

        Ok(Self {
            client,
            bucket: config.bucket,
        })
    }

    /// Object key for a candidate's document.
    fn object_key(candidate_id: CandidateId, filename: &str) -> String {
        format!("cv-documents/{candidate_id}/{filename}")
    }
}

#[async_trait]
impl DocumentStorage for S3Storage {
    #[instrument(skip(self, data), fields(bytes = data.len()))]
    async fn put(&self, candidate_id: CandidateId, filename: &str, data: Bytes) -> Result<String> {
        let key = Self::object_key(candidate_id, filename);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| Error::Storage(format!("put {key}: {e}")))?;

        debug!(key = %key, "Document archived");
        Ok(key)
    }

    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Bytes> {
        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("get {key}: {e}")))?;

        let data = object
            .body
            .collect()
            .await
            .map_err(|e| Error::Storage(format!("read {key}: {e}")))?;

        Ok(data.into_bytes())
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<bool> {
        let existed = self.exists(key).await?;

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("delete {key}: {e}")))?;

        Ok(existed)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_not_found() {
                    Ok(false)
                } else {
                    Err(Error::Storage(format!("head {key}: {service_error}")))
                }
            }
        }
    }

    #[instrument(skip(self))]
    async fn list(&self, prefix: &str, max_keys: i32) -> Result<Vec<ObjectInfo>> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .max_keys(max_keys)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("list {prefix}: {e}")))?;

        let objects = output
            .contents()
            .iter()
            .filter_map(|object| {
                let key = object.key()?.to_string();
                Some(ObjectInfo {
                    key,
                    size: object.size().unwrap_or(0),
                    last_modified: object
                        .last_modified()
                        .and_then(|t| chrono::DateTime::from_timestamp(t.secs(), 0)),
                })
            })
            .collect();

        Ok(objects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_layout() {
        let id = CandidateId::new();
        let key = S3Storage::object_key(id, "resume.pdf");
        assert_eq!(key, format!("cv-documents/{id}/resume.pdf"));
    }
}
