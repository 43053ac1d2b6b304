//! # Remote Inference Collaborator
//!
//! HTTP adapter for the object-detection service. The adapter already
//! converts non-success statuses and unparseable payloads into an error
//! `DetectionResult`, so only transport-level failures surface as errors
//! and the workflow can degrade them the same way.

use async_trait::async_trait;
use tracing::warn;

use crate::detection::DetectionResult;
use crate::errors::{BotError, BotResult};

/// Remote-inference collaborator consumed by the detection workflow
#[async_trait]
pub trait Detector: Send + Sync {
    async fn detect(&self, remote_key: &str) -> BotResult<DetectionResult>;
}

/// Detector backed by an HTTP inference endpoint
/// (`POST {base}/predict?imgName={key}`)
pub struct HttpDetector {
    client: reqwest::Client,
    api_url: String,
}

impl HttpDetector {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
        }
    }
}

#[async_trait]
impl Detector for HttpDetector {
    async fn detect(&self, remote_key: &str) -> BotResult<DetectionResult> {
        let url = format!("{}/predict", self.api_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .query(&[("imgName", remote_key)])
            .send()
            .await
            .map_err(|e| BotError::RemoteCall(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, key = %remote_key, "Inference service rejected request");
            return Ok(DetectionResult::from_error(format!(
                "inference service returned status {}",
                status
            )));
        }

        match response.json::<DetectionResult>().await {
            Ok(result) => Ok(result),
            Err(e) => {
                warn!(error = %e, key = %remote_key, "Inference response unparseable");
                Ok(DetectionResult::from_error(format!(
                    "invalid response from inference service: {}",
                    e
                )))
            }
        }
    }
}
