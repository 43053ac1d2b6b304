//! Message Handler module for processing incoming Telegram messages

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::info;

use super::variants::BotVariant;
use crate::envelope::MessageEnvelope;

/// Dispatcher endpoint: wrap the raw message into an envelope and hand
/// it to the configured variant. The envelope is owned by this single
/// invocation and dropped when it returns.
pub async fn message_handler(msg: Message, variant: Arc<BotVariant>) -> Result<()> {
    let envelope = MessageEnvelope::from_message(&msg);

    info!(
        chat_id = %envelope.chat_id,
        has_text = envelope.text.is_some(),
        has_photo = envelope.has_photo(),
        "Incoming message"
    );

    variant.handle(&envelope).await;
    Ok(())
}
