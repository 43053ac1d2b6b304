//! # Replies
//!
//! The value handlers produce before anything touches the transport.
//! Keeping replies as plain data lets the classification and dispatch
//! logic stay testable without a live messaging connection.

use std::path::PathBuf;

/// One outbound reply to the user
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Plain text message
    Text(String),
    /// Photo attachment referenced by local path
    Photo(PathBuf),
}

/// User-facing reply when a photo could not be downloaded
pub const DOWNLOAD_FAILED_RESPONSE: &str =
    "Sorry, I couldn't download your photo. Please try again.";
