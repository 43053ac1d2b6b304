use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use teloxide::types::{ChatId, FileId, MessageId};

use polybot::bot::{EchoBot, ModeratedChatBot, QuoteBot, ECHO_PREFIX, QUOTE_EXEMPT_PHRASE};
use polybot::envelope::{MessageEnvelope, PhotoRef};
use polybot::errors::{BotError, BotResult};
use polybot::filter_dispatch::FilterKind;
use polybot::image_filters::ImageFilters;
use polybot::moderation::{Moderation, Vocabulary, DEFAULT_RESPONSE, WELCOME_RESPONSE};
use polybot::transport::Transport;

/// What a fake transport saw go out
#[derive(Debug, Clone, PartialEq)]
enum Sent {
    Text(String),
    QuotedText(String, MessageId),
    Photo(PathBuf),
}

#[derive(Default)]
struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    downloads: AtomicUsize,
}

impl RecordingTransport {
    fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn download_count(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_text(&self, _chat_id: ChatId, text: &str) -> BotResult<()> {
        self.sent.lock().unwrap().push(Sent::Text(text.to_string()));
        Ok(())
    }

    async fn send_text_with_quote(
        &self,
        _chat_id: ChatId,
        text: &str,
        quoted_message_id: MessageId,
    ) -> BotResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::QuotedText(text.to_string(), quoted_message_id));
        Ok(())
    }

    async fn send_photo(&self, _chat_id: ChatId, path: &Path) -> BotResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Photo(path.to_path_buf()));
        Ok(())
    }

    async fn download_photo(&self, _envelope: &MessageEnvelope) -> BotResult<PathBuf> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        Err(BotError::Download("no live transport in tests".to_string()))
    }
}

struct RejectingFilters;

impl ImageFilters for RejectingFilters {
    fn apply(&self, _path: &Path, _kind: FilterKind) -> BotResult<PathBuf> {
        Err(BotError::Filter("not reachable in these tests".to_string()))
    }
}

fn text_envelope(text: &str) -> MessageEnvelope {
    MessageEnvelope {
        chat_id: ChatId(5),
        message_id: Some(MessageId(11)),
        text: Some(text.to_string()),
        caption: None,
        photo: None,
    }
}

fn photo_envelope(caption: Option<&str>) -> MessageEnvelope {
    MessageEnvelope {
        chat_id: ChatId(5),
        message_id: Some(MessageId(11)),
        text: None,
        caption: caption.map(str::to_owned),
        photo: Some(PhotoRef(FileId("file-5".to_string()))),
    }
}

#[tokio::test]
async fn test_echo_bot_replies_with_labeled_original_text() {
    let transport = Arc::new(RecordingTransport::default());
    let bot = EchoBot::new(transport.clone());

    bot.handle(&text_envelope("Hello There")).await;

    assert_eq!(
        transport.sent(),
        vec![Sent::Text(format!("{} Hello There", ECHO_PREFIX))]
    );
}

#[tokio::test]
async fn test_echo_bot_ignores_photo_only_messages() {
    let transport = Arc::new(RecordingTransport::default());
    let bot = EchoBot::new(transport.clone());

    bot.handle(&photo_envelope(Some("rotate"))).await;

    assert!(transport.sent().is_empty());
    assert_eq!(transport.download_count(), 0);
}

#[tokio::test]
async fn test_quote_bot_quotes_the_original_message() {
    let transport = Arc::new(RecordingTransport::default());
    let bot = QuoteBot::new(transport.clone());

    bot.handle(&text_envelope("quote this")).await;

    assert_eq!(
        transport.sent(),
        vec![Sent::QuotedText("quote this".to_string(), MessageId(11))]
    );
}

#[tokio::test]
async fn test_quote_bot_stays_silent_on_text_less_messages() {
    let transport = Arc::new(RecordingTransport::default());
    let bot = QuoteBot::new(transport.clone());

    // A sticker-style envelope carries neither text nor photo; there is
    // nothing to quote and no send should be attempted.
    let empty = MessageEnvelope {
        chat_id: ChatId(5),
        message_id: Some(MessageId(11)),
        text: None,
        caption: None,
        photo: None,
    };
    bot.handle(&empty).await;
    bot.handle(&text_envelope("   ")).await;

    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_quote_bot_honors_the_exempt_phrase() {
    let transport = Arc::new(RecordingTransport::default());
    let bot = QuoteBot::new(transport.clone());

    bot.handle(&text_envelope(QUOTE_EXEMPT_PHRASE)).await;

    assert!(transport.sent().is_empty());
}

#[tokio::test]
async fn test_moderated_bot_answers_commands() {
    let transport = Arc::new(RecordingTransport::default());
    let bot = ModeratedChatBot::new(
        transport.clone(),
        Arc::new(RejectingFilters),
        Moderation::new(Vocabulary::empty()),
    );

    bot.handle(&text_envelope("/start")).await;

    assert_eq!(
        transport.sent(),
        vec![Sent::Text(WELCOME_RESPONSE.to_string())]
    );
}

#[tokio::test]
async fn test_moderated_bot_handles_text_and_photo_independently() {
    let transport = Arc::new(RecordingTransport::default());
    let bot = ModeratedChatBot::new(
        transport.clone(),
        Arc::new(RejectingFilters),
        Moderation::new(Vocabulary::empty()),
    );

    // Photo with an unrelated caption and no text: the photo path is a
    // silent no-op and nothing is downloaded.
    bot.handle(&photo_envelope(Some("what a nice day"))).await;

    assert!(transport.sent().is_empty());
    assert_eq!(transport.download_count(), 0);
}

#[tokio::test]
async fn test_moderated_bot_replies_once_when_download_fails() {
    let transport = Arc::new(RecordingTransport::default());
    let bot = ModeratedChatBot::new(
        transport.clone(),
        Arc::new(RejectingFilters),
        Moderation::new(Vocabulary::empty()),
    );

    // The caption requests a filter, so a download is attempted; the
    // fake transport always fails it.
    bot.handle(&photo_envelope(Some("rotate this"))).await;

    assert_eq!(transport.download_count(), 1);
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert!(matches!(&sent[0], Sent::Text(_)));
}

#[tokio::test]
async fn test_moderated_bot_defaults_on_empty_text() {
    let transport = Arc::new(RecordingTransport::default());
    let bot = ModeratedChatBot::new(
        transport.clone(),
        Arc::new(RejectingFilters),
        Moderation::new(Vocabulary::empty()),
    );

    // No text, no photo: still resolves to the default reply
    let envelope = MessageEnvelope {
        chat_id: ChatId(5),
        message_id: None,
        text: None,
        caption: None,
        photo: None,
    };
    bot.handle(&envelope).await;

    assert_eq!(
        transport.sent(),
        vec![Sent::Text(DEFAULT_RESPONSE.to_string())]
    );
}
