//! # Messaging Transport Collaborator
//!
//! Narrow contract over the messaging platform: send a text, send a
//! photo, resolve a photo handle to a local file. The dispatch engine
//! never sees wire detail; everything Telegram-specific stays in
//! `TelegramTransport`.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId, ReplyParameters};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::envelope::MessageEnvelope;
use crate::errors::{BotError, BotResult};

/// Messaging collaborator consumed by the dispatch engine
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> BotResult<()>;

    async fn send_text_with_quote(
        &self,
        chat_id: ChatId,
        text: &str,
        quoted_message_id: MessageId,
    ) -> BotResult<()>;

    async fn send_photo(&self, chat_id: ChatId, path: &Path) -> BotResult<()>;

    /// Resolve the envelope's photo handle to a local file
    async fn download_photo(&self, envelope: &MessageEnvelope) -> BotResult<PathBuf>;
}

/// Telegram-backed transport.
///
/// Photo content is fetched through the shared timeout-configured HTTP
/// client so a stalled file-server connection cannot hang a handler.
pub struct TelegramTransport {
    bot: Bot,
    client: reqwest::Client,
}

impl TelegramTransport {
    pub fn new(bot: Bot, client: reqwest::Client) -> Self {
        Self { bot, client }
    }
}

/// Fetch a file's bytes through the given client, mapping any HTTP
/// failure (including a timeout) to a download error.
async fn fetch_file_bytes(client: &reqwest::Client, url: &str) -> BotResult<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| BotError::Download(format!("photo fetch failed: {}", e)))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| BotError::Download(format!("photo body unreadable: {}", e)))?;
    Ok(bytes.to_vec())
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> BotResult<()> {
        self.bot.send_message(chat_id, text).await?;
        Ok(())
    }

    async fn send_text_with_quote(
        &self,
        chat_id: ChatId,
        text: &str,
        quoted_message_id: MessageId,
    ) -> BotResult<()> {
        self.bot
            .send_message(chat_id, text)
            .reply_parameters(ReplyParameters::new(quoted_message_id))
            .await?;
        Ok(())
    }

    async fn send_photo(&self, chat_id: ChatId, path: &Path) -> BotResult<()> {
        self.bot
            .send_photo(chat_id, InputFile::file(path.to_path_buf()))
            .await?;
        Ok(())
    }

    async fn download_photo(&self, envelope: &MessageEnvelope) -> BotResult<PathBuf> {
        let photo = envelope
            .photo
            .as_ref()
            .ok_or_else(|| BotError::Download("message carries no photo".to_string()))?;

        let file = self
            .bot
            .get_file(photo.0.clone())
            .await
            .map_err(|e| BotError::Download(format!("file handle not resolvable: {}", e)))?;

        let url = format!(
            "https://api.telegram.org/file/bot{}/{}",
            self.bot.token(),
            file.path
        );

        let bytes = fetch_file_bytes(&self.client, &url).await?;

        let mut temp_file = NamedTempFile::new()
            .map_err(|e| BotError::Download(format!("temp file creation failed: {}", e)))?;
        temp_file
            .as_file_mut()
            .write_all(&bytes)
            .map_err(|e| BotError::Download(format!("temp file write failed: {}", e)))?;
        let path = temp_file.path().to_path_buf();

        // The caller owns cleanup; keep the file past the guard's drop.
        std::mem::forget(temp_file);

        debug!(chat_id = %envelope.chat_id, path = %path.display(), "Photo downloaded");
        Ok(path)
    }
}

/// Remove a scratch file once its replies have been delivered
pub fn cleanup_local_file(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        tracing::error!(path = %path.display(), error = %e, "Failed to clean up temporary file");
    } else {
        debug!(path = %path.display(), "Temporary file cleaned up");
    }
}
