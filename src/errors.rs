//! # Application Error Types
//!
//! This module defines the error taxonomy used throughout the bot.
//! Each variant maps to one collaborator or startup concern, so handlers
//! can decide per variant whether to abort, degrade, or stay silent.

use std::fmt;

/// General application error type for consistent error handling
#[derive(Debug, Clone, PartialEq)]
pub enum BotError {
    /// Configuration or startup errors (missing token, bad bucket name, ...)
    Config(String),
    /// Photo download failures (missing photo, unresolvable file handle)
    Download(String),
    /// Image filter failures (malformed image, unsupported operation)
    Filter(String),
    /// Object storage upload failures
    Storage(String),
    /// Remote inference call failures (network, timeout)
    RemoteCall(String),
    /// Messaging transport failures (send_text / send_photo)
    Transport(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::Config(msg) => write!(f, "[CONFIG] {}", msg),
            BotError::Download(msg) => write!(f, "[DOWNLOAD] {}", msg),
            BotError::Filter(msg) => write!(f, "[FILTER] {}", msg),
            BotError::Storage(msg) => write!(f, "[STORAGE] {}", msg),
            BotError::RemoteCall(msg) => write!(f, "[REMOTE_CALL] {}", msg),
            BotError::Transport(msg) => write!(f, "[TRANSPORT] {}", msg),
        }
    }
}

impl std::error::Error for BotError {}

impl From<teloxide::RequestError> for BotError {
    fn from(err: teloxide::RequestError) -> Self {
        BotError::Transport(err.to_string())
    }
}

/// Result type alias for convenience
pub type BotResult<T> = Result<T, BotError>;
