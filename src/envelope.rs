//! # Message Envelope
//!
//! The immutable record handed to the dispatch engine for every inbound
//! message. It carries only what classification and dispatch need; all
//! other transport detail stays behind the `Transport` collaborator.

use teloxide::types::{ChatId, FileId, Message, MessageId};

/// Opaque handle to a photo, resolvable to bytes by the transport
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoRef(pub FileId);

/// One inbound chat message with optional text / photo / caption.
///
/// Invariant: `caption` and `photo` are only present together; a text-only
/// message has `text` set and no photo. Each envelope is owned by exactly
/// one handler invocation and never outlives it.
#[derive(Debug, Clone)]
pub struct MessageEnvelope {
    pub chat_id: ChatId,
    pub message_id: Option<MessageId>,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub photo: Option<PhotoRef>,
}

impl MessageEnvelope {
    /// Build an envelope from a raw Telegram message.
    ///
    /// Multi-size photo messages keep only the largest size, which is the
    /// last entry Telegram reports.
    pub fn from_message(msg: &Message) -> Self {
        let photo = msg
            .photo()
            .and_then(|sizes| sizes.last())
            .map(|size| PhotoRef(size.file.id.clone()));

        // Captions only travel with photos
        let caption = if photo.is_some() {
            msg.caption().map(str::to_owned)
        } else {
            None
        };

        Self {
            chat_id: msg.chat.id,
            message_id: Some(msg.id),
            text: msg.text().map(str::to_owned),
            caption,
            photo,
        }
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }
}
