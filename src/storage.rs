//! # Object Store Collaborator
//!
//! Upload of downloaded photos to S3-compatible object storage, consumed
//! by the detection workflow. Keys are derived deterministically by the
//! caller so repeated uploads of the same local file are idempotent.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::debug;

use crate::config::StorageConfig;
use crate::errors::{BotError, BotResult};

/// Object-storage collaborator consumed by the detection workflow
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(&self, local_path: &Path, remote_key: &str) -> BotResult<()>;
}

/// S3-backed object store
pub struct S3Storage {
    client: Client,
    bucket: String,
}

impl S3Storage {
    /// Build a client from the ambient AWS environment plus the
    /// storage configuration (custom endpoints use path-style access).
    pub async fn new(config: &StorageConfig) -> BotResult<Self> {
        if config.bucket.trim().is_empty() {
            return Err(BotError::Config("Storage bucket cannot be empty".to_string()));
        }

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint_url) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint_url).force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        })
    }
}

#[async_trait]
impl ObjectStore for S3Storage {
    async fn upload(&self, local_path: &Path, remote_key: &str) -> BotResult<()> {
        let body = ByteStream::from_path(local_path)
            .await
            .map_err(|e| BotError::Storage(format!("cannot read {}: {}", local_path.display(), e)))?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(remote_key)
            .body(body)
            .send()
            .await
            .map_err(|e| BotError::Storage(e.to_string()))?;

        debug!(bucket = %self.bucket, key = %remote_key, "Photo uploaded");
        Ok(())
    }
}
