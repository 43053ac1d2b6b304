//! # Unified Application Configuration
//!
//! This module provides a centralized configuration system that consolidates
//! all application settings into a single, structured configuration object.
//! It supports loading from environment variables, validation, and provides
//! a clean interface for accessing configuration throughout the application.

use std::env;
use std::str::FromStr;

use crate::errors::{BotError, BotResult};

/// Default word list used by the moderated-chat variant
const DEFAULT_WORD_LIST_URL: &str = "https://raw.githubusercontent.com/LDNOOBW/List-of-Dirty-Naughty-Obscene-and-Otherwise-Bad-Words/master/en";

/// Which behavior profile this deployment runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotMode {
    Echo,
    Quote,
    ModeratedChat,
    Detection,
}

impl FromStr for BotMode {
    type Err = BotError;

    fn from_str(value: &str) -> BotResult<Self> {
        match value.trim().to_lowercase().as_str() {
            "echo" => Ok(BotMode::Echo),
            "quote" => Ok(BotMode::Quote),
            "moderated" | "moderated-chat" => Ok(BotMode::ModeratedChat),
            "detection" => Ok(BotMode::Detection),
            other => Err(BotError::Config(format!(
                "BOT_MODE '{}' is not one of: echo, quote, moderated, detection",
                other
            ))),
        }
    }
}

/// Bot-specific configuration settings
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot token
    pub token: String,
    /// Deployed behavior profile
    pub mode: BotMode,
    /// HTTP client timeout in seconds
    pub http_timeout_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            mode: BotMode::ModeratedChat,
            http_timeout_secs: 30,
        }
    }
}

impl BotConfig {
    /// Validate bot configuration
    pub fn validate(&self) -> BotResult<()> {
        if self.token.trim().is_empty() {
            return Err(BotError::Config("Bot token cannot be empty".to_string()));
        }

        // Basic bot token format validation
        let parts: Vec<&str> = self.token.split(':').collect();
        if parts.len() != 2 {
            return Err(BotError::Config(
                "Bot token format is invalid. Expected format: 'bot_id:bot_token'".to_string(),
            ));
        }

        if parts[0].parse::<u64>().is_err() {
            return Err(BotError::Config(
                "Bot token bot ID must be numeric".to_string(),
            ));
        }

        if parts[1].len() < 20 {
            return Err(BotError::Config(
                "Bot token appears to be too short. Please verify it's a valid token".to_string(),
            ));
        }

        if self.http_timeout_secs == 0 {
            return Err(BotError::Config("HTTP timeout cannot be 0".to_string()));
        }

        if self.http_timeout_secs > 300 {
            return Err(BotError::Config(
                "HTTP timeout cannot be greater than 300 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// Moderation configuration for the moderated-chat variant
#[derive(Debug, Clone)]
pub struct ModerationConfig {
    /// Newline-delimited word list fetched once at startup
    pub word_list_url: String,
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            word_list_url: DEFAULT_WORD_LIST_URL.to_string(),
        }
    }
}

impl ModerationConfig {
    /// Validate moderation configuration
    pub fn validate(&self) -> BotResult<()> {
        // The URL may be unreachable at runtime (fail-open), but an empty
        // value is a deployment mistake worth failing fast on.
        if self.word_list_url.trim().is_empty() {
            return Err(BotError::Config(
                "Word list URL cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Object storage configuration for the detection variant
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// Target bucket for photo uploads
    pub bucket: String,
    /// Optional AWS region override
    pub region: Option<String>,
    /// Optional custom endpoint (S3-compatible stores)
    pub endpoint_url: Option<String>,
    /// Key prefix for uploaded photos
    pub key_prefix: String,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> BotResult<()> {
        if self.bucket.trim().is_empty() {
            return Err(BotError::Config(
                "Storage bucket cannot be empty".to_string(),
            ));
        }
        if self.key_prefix.trim().is_empty() {
            return Err(BotError::Config(
                "Storage key prefix cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Remote inference configuration for the detection variant
#[derive(Debug, Clone)]
pub struct DetectionConfig {
    /// Base URL of the inference service
    pub api_url: String,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8081".to_string(),
            timeout_secs: 30,
        }
    }
}

impl DetectionConfig {
    /// Validate detection configuration
    pub fn validate(&self) -> BotResult<()> {
        if self.api_url.trim().is_empty() {
            return Err(BotError::Config(
                "Detection API URL cannot be empty".to_string(),
            ));
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(BotError::Config(
                "Detection API URL must start with 'http://' or 'https://'".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(BotError::Config(
                "Detection timeout cannot be 0".to_string(),
            ));
        }

        if self.timeout_secs > 300 {
            return Err(BotError::Config(
                "Detection timeout cannot be greater than 300 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// Unified application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Bot configuration
    pub bot: BotConfig,
    /// Moderation configuration
    pub moderation: ModerationConfig,
    /// Object storage configuration
    pub storage: StorageConfig,
    /// Remote inference configuration
    pub detection: DetectionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> BotResult<Self> {
        let mut config = Self::default();

        // Load bot configuration
        config.bot.token = env::var("TELEGRAM_BOT_TOKEN").map_err(|_| {
            BotError::Config("TELEGRAM_BOT_TOKEN environment variable is required".to_string())
        })?;
        config.bot.mode = env::var("BOT_MODE")
            .unwrap_or_else(|_| "moderated".to_string())
            .parse()?;
        config.bot.http_timeout_secs = env::var("HTTP_CLIENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| {
                BotError::Config("HTTP_CLIENT_TIMEOUT_SECS must be a valid number".to_string())
            })?;

        // Load moderation configuration
        if let Ok(url) = env::var("SWEAR_WORDS_URL") {
            config.moderation.word_list_url = url;
        }

        // Load storage configuration
        config.storage.bucket = env::var("STORAGE_BUCKET_NAME").unwrap_or_default();
        config.storage.region = env::var("STORAGE_REGION").ok();
        config.storage.endpoint_url = env::var("STORAGE_ENDPOINT_URL").ok();
        config.storage.key_prefix =
            env::var("STORAGE_KEY_PREFIX").unwrap_or_else(|_| "tg-photos".to_string());

        // Load detection configuration
        if let Ok(api_url) = env::var("DETECTION_API_URL") {
            config.detection.api_url = api_url;
        }
        config.detection.timeout_secs = env::var("DETECTION_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| {
                BotError::Config("DETECTION_TIMEOUT_SECS must be a valid number".to_string())
            })?;

        Ok(config)
    }

    /// Validate all configuration sections relevant to the chosen mode
    pub fn validate(&self) -> BotResult<()> {
        self.bot.validate()?;

        match self.bot.mode {
            BotMode::ModeratedChat => self.moderation.validate()?,
            BotMode::Detection => {
                self.storage.validate()?;
                self.detection.validate()?;
            }
            BotMode::Echo | BotMode::Quote => {}
        }

        Ok(())
    }

    /// Get a summary of the current configuration for logging
    pub fn summary(&self) -> String {
        format!(
            "Configuration: bot_token=[REDACTED], mode={:?}, http_timeout_secs={}, storage_bucket={}, detection_api={}",
            self.bot.mode, self.bot.http_timeout_secs, self.storage.bucket, self.detection.api_url
        )
    }
}
