//! # Detection Workflow
//!
//! Linear pipeline for photo messages in the detection variant:
//! download, upload to object storage, remote inference, summarize.
//! Every stage fails independently and every failure path still ends in
//! exactly one user-visible reply; nothing in this workflow can crash
//! the handler.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::envelope::MessageEnvelope;
use crate::inference::Detector;
use crate::reply::{Reply, DOWNLOAD_FAILED_RESPONSE};
use crate::storage::ObjectStore;
use crate::transport::{cleanup_local_file, Transport};

pub const NO_OBJECTS_RESPONSE: &str = "No objects detected in the image.";
pub const SUMMARY_HEADER: &str = "Object detection results:";

/// One detected object, in the order the service reported it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedLabel {
    pub class: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Inference-service response: either an ordered label list or an error.
///
/// Built once per detection call, consumed to build the reply, then
/// discarded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<DetectedLabel>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DetectionResult {
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            labels: None,
            error: Some(message.into()),
        }
    }
}

/// Derive the remote object key from the local path.
///
/// Deterministic on purpose: re-uploading the same local file hits the
/// same key, keeping retries idempotent.
pub fn derive_remote_key(prefix: &str, local_path: &Path) -> String {
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        local_path.to_string_lossy().trim_start_matches('/')
    )
}

/// Build the user-visible summary for a detection result.
///
/// A present label list is summarized even when it is empty; a missing
/// list (or explicit error) collapses to the no-objects reply.
pub fn summarize(result: &DetectionResult) -> String {
    match &result.labels {
        Some(labels) => {
            let mut summary = format!("{}\n", SUMMARY_HEADER);
            for label in labels {
                match label.confidence {
                    Some(confidence) => summary.push_str(&format!(
                        "Class: {}, Confidence: {}\n",
                        label.class, confidence
                    )),
                    None => {
                        summary.push_str(&format!("Class: {}, Confidence: N/A\n", label.class))
                    }
                }
            }
            summary
        }
        None => NO_OBJECTS_RESPONSE.to_string(),
    }
}

/// Run the full detection pipeline for one photo envelope.
///
/// Always produces exactly one reply. A download failure aborts before
/// the upload; an upload failure skips inference; inference failures
/// degrade to an error result. No stage raises past this function.
pub async fn run_detection(
    transport: &dyn Transport,
    store: &dyn ObjectStore,
    detector: &dyn Detector,
    key_prefix: &str,
    envelope: &MessageEnvelope,
) -> Reply {
    let photo_path = match transport.download_photo(envelope).await {
        Ok(path) => path,
        Err(e) => {
            error!(chat_id = %envelope.chat_id, error = %e, "Photo download failed");
            return Reply::Text(DOWNLOAD_FAILED_RESPONSE.to_string());
        }
    };

    let remote_key = derive_remote_key(key_prefix, &photo_path);

    let result = match store.upload(&photo_path, &remote_key).await {
        Ok(()) => match detector.detect(&remote_key).await {
            Ok(result) => result,
            Err(e) => {
                warn!(key = %remote_key, error = %e, "Inference call failed, degrading");
                DetectionResult::from_error(e.to_string())
            }
        },
        Err(e) => {
            warn!(key = %remote_key, error = %e, "Upload failed, skipping inference");
            DetectionResult::from_error(e.to_string())
        }
    };

    cleanup_local_file(&photo_path);

    Reply::Text(summarize(&result))
}
