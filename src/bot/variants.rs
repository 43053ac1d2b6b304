//! # Bot Variants
//!
//! The four deployment profiles, each a fixed composition of the shared
//! classifier / dispatch / workflow pieces. The variant is chosen once
//! from configuration; there is no runtime switching between profiles.

use std::sync::Arc;

use tracing::{error, info};

use crate::classifier::{classify, TextCategory};
use crate::detection::run_detection;
use crate::envelope::MessageEnvelope;
use crate::filter_dispatch::{dispatch_filters, requested_filters};
use crate::image_filters::ImageFilters;
use crate::inference::Detector;
use crate::moderation::Moderation;
use crate::reply::{Reply, DOWNLOAD_FAILED_RESPONSE};
use crate::storage::ObjectStore;
use crate::transport::{cleanup_local_file, Transport};

/// Echo prefix used by the echo variant
pub const ECHO_PREFIX: &str = "Your original message:";

/// The one phrase the quote variant refuses to quote
pub const QUOTE_EXEMPT_PHRASE: &str = "Please don't quote me";

/// Echo variant: plain text comes straight back behind a fixed label.
/// No command or photo handling.
pub struct EchoBot {
    transport: Arc<dyn Transport>,
}

impl EchoBot {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn handle(&self, envelope: &MessageEnvelope) {
        if let Some(TextCategory::PlainText(_)) = classify(envelope).text {
            let original = envelope.text.as_deref().unwrap_or("");
            let reply = Reply::Text(format!("{} {}", ECHO_PREFIX, original));
            deliver(self.transport.as_ref(), envelope, reply).await;
        }
    }
}

/// Quote variant: plain text is sent back quoting the original message,
/// unless the text is the exempt phrase.
pub struct QuoteBot {
    transport: Arc<dyn Transport>,
}

impl QuoteBot {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn handle(&self, envelope: &MessageEnvelope) {
        if let Some(TextCategory::PlainText(text)) = classify(envelope).text {
            // Text-less envelopes (stickers, bare photos) classify to
            // empty plain text; quoting nothing is rejected by the API.
            if text.is_empty() {
                return;
            }

            let original = envelope.text.as_deref().unwrap_or("");
            if original == QUOTE_EXEMPT_PHRASE {
                return;
            }

            let sent = match envelope.message_id {
                Some(message_id) => {
                    self.transport
                        .send_text_with_quote(envelope.chat_id, original, message_id)
                        .await
                }
                None => self.transport.send_text(envelope.chat_id, original).await,
            };
            if let Err(e) = sent {
                error!(chat_id = %envelope.chat_id, error = %e, "Failed to deliver quote reply");
            }
        }
    }
}

/// Moderated-chat + filter variant: commands and free text through the
/// moderation dispatch, photo captions through the filter dispatch.
/// The text and photo sides of one envelope are handled independently.
pub struct ModeratedChatBot {
    transport: Arc<dyn Transport>,
    filters: Arc<dyn ImageFilters>,
    moderation: Moderation,
}

impl ModeratedChatBot {
    pub fn new(
        transport: Arc<dyn Transport>,
        filters: Arc<dyn ImageFilters>,
        moderation: Moderation,
    ) -> Self {
        Self {
            transport,
            filters,
            moderation,
        }
    }

    pub async fn handle(&self, envelope: &MessageEnvelope) {
        let classification = classify(envelope);

        if let Some(category) = classification.text {
            let reply = match category {
                TextCategory::Command(name) => self.moderation.handle_command(&name),
                TextCategory::PlainText(text) => self.moderation.handle_plain_text(&text),
            };
            deliver(self.transport.as_ref(), envelope, reply).await;
        }

        if let Some(caption) = classification.photo {
            self.handle_photo_caption(envelope, &caption).await;
        }
    }

    async fn handle_photo_caption(&self, envelope: &MessageEnvelope, caption: &str) {
        // A caption matching no filter is a silent no-op for the photo
        // path; the photo is not even downloaded.
        if requested_filters(caption).is_empty() {
            return;
        }

        let photo_path = match self.transport.download_photo(envelope).await {
            Ok(path) => path,
            Err(e) => {
                error!(chat_id = %envelope.chat_id, error = %e, "Photo download failed");
                let reply = Reply::Text(DOWNLOAD_FAILED_RESPONSE.to_string());
                deliver(self.transport.as_ref(), envelope, reply).await;
                return;
            }
        };

        let replies = dispatch_filters(self.filters.as_ref(), &photo_path, caption);
        for reply in replies {
            let output = match &reply {
                Reply::Photo(path) => Some(path.clone()),
                Reply::Text(_) => None,
            };
            deliver(self.transport.as_ref(), envelope, reply).await;
            if let Some(path) = output {
                cleanup_local_file(&path);
            }
        }

        cleanup_local_file(&photo_path);
    }
}

/// Detection variant: photos run the detection workflow, text and
/// commands are ignored.
pub struct DetectionBot {
    transport: Arc<dyn Transport>,
    store: Arc<dyn ObjectStore>,
    detector: Arc<dyn Detector>,
    key_prefix: String,
}

impl DetectionBot {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<dyn ObjectStore>,
        detector: Arc<dyn Detector>,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            store,
            detector,
            key_prefix: key_prefix.into(),
        }
    }

    pub async fn handle(&self, envelope: &MessageEnvelope) {
        if !envelope.has_photo() {
            return;
        }

        let reply = run_detection(
            self.transport.as_ref(),
            self.store.as_ref(),
            self.detector.as_ref(),
            &self.key_prefix,
            envelope,
        )
        .await;
        deliver(self.transport.as_ref(), envelope, reply).await;
    }
}

/// One deployed behavior profile
pub enum BotVariant {
    Echo(EchoBot),
    Quote(QuoteBot),
    ModeratedChat(ModeratedChatBot),
    Detection(DetectionBot),
}

impl BotVariant {
    pub async fn handle(&self, envelope: &MessageEnvelope) {
        match self {
            BotVariant::Echo(bot) => bot.handle(envelope).await,
            BotVariant::Quote(bot) => bot.handle(envelope).await,
            BotVariant::ModeratedChat(bot) => bot.handle(envelope).await,
            BotVariant::Detection(bot) => bot.handle(envelope).await,
        }
    }
}

/// Deliver one reply, best-effort. Transport failures are logged, never
/// answered with a response-to-the-response.
async fn deliver(transport: &dyn Transport, envelope: &MessageEnvelope, reply: Reply) {
    let result = match &reply {
        Reply::Text(text) => transport.send_text(envelope.chat_id, text).await,
        Reply::Photo(path) => transport.send_photo(envelope.chat_id, path).await,
    };

    match result {
        Ok(()) => info!(chat_id = %envelope.chat_id, "Reply delivered"),
        Err(e) => error!(chat_id = %envelope.chat_id, error = %e, "Failed to deliver reply"),
    }
}
