//! # Lexical Classifier
//!
//! Pure classification of an inbound envelope into the categories the
//! dispatch engine understands. Text and photo classification are
//! independent: a single envelope can carry both a text category and a
//! photo caption, and the bot variants handle each on its own.

use crate::envelope::MessageEnvelope;

/// Category assigned to the text portion of an envelope
#[derive(Debug, Clone, PartialEq)]
pub enum TextCategory {
    /// Slash command, name lower-cased with the prefix stripped
    Command(String),
    /// Free text, lower-cased and trimmed
    PlainText(String),
}

/// Full classification of one envelope.
///
/// `photo` holds the lower-cased caption (empty string when the photo has
/// no caption) and is present iff the envelope carries a photo.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub text: Option<TextCategory>,
    pub photo: Option<String>,
}

/// Classify an envelope. Pure, no side effects, total over valid envelopes.
///
/// A non-photo envelope without text still classifies to `PlainText("")`
/// so it resolves to the default reply instead of being dropped.
pub fn classify(envelope: &MessageEnvelope) -> Classification {
    let text = match envelope.text.as_deref() {
        Some(text) if text.starts_with('/') => {
            let name = text[1..]
                .split_whitespace()
                .next()
                .unwrap_or("")
                .to_lowercase();
            Some(TextCategory::Command(name))
        }
        Some(text) => Some(TextCategory::PlainText(text.trim().to_lowercase())),
        None if !envelope.has_photo() => Some(TextCategory::PlainText(String::new())),
        None => None,
    };

    let photo = envelope
        .photo
        .as_ref()
        .map(|_| envelope.caption.as_deref().unwrap_or("").to_lowercase());

    Classification { text, photo }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::{ChatId, FileId};

    use crate::envelope::PhotoRef;

    fn text_envelope(text: &str) -> MessageEnvelope {
        MessageEnvelope {
            chat_id: ChatId(42),
            message_id: None,
            text: Some(text.to_string()),
            caption: None,
            photo: None,
        }
    }

    fn photo_envelope(text: Option<&str>, caption: Option<&str>) -> MessageEnvelope {
        MessageEnvelope {
            chat_id: ChatId(42),
            message_id: None,
            text: text.map(str::to_owned),
            caption: caption.map(str::to_owned),
            photo: Some(PhotoRef(FileId("file-1".to_string()))),
        }
    }

    #[test]
    fn test_command_classification() {
        let classification = classify(&text_envelope("/start"));
        assert_eq!(
            classification.text,
            Some(TextCategory::Command("start".to_string()))
        );
        assert_eq!(classification.photo, None);
    }

    #[test]
    fn test_command_name_is_first_token_lowercased() {
        let classification = classify(&text_envelope("/HELP me please"));
        assert_eq!(
            classification.text,
            Some(TextCategory::Command("help".to_string()))
        );
    }

    #[test]
    fn test_bare_slash_is_an_empty_command() {
        let classification = classify(&text_envelope("/"));
        assert_eq!(
            classification.text,
            Some(TextCategory::Command(String::new()))
        );
    }

    #[test]
    fn test_plain_text_is_normalized() {
        let classification = classify(&text_envelope("  Hello THERE  "));
        assert_eq!(
            classification.text,
            Some(TextCategory::PlainText("hello there".to_string()))
        );
    }

    #[test]
    fn test_missing_text_on_non_photo_defaults_to_empty_plain_text() {
        let envelope = MessageEnvelope {
            chat_id: ChatId(42),
            message_id: None,
            text: None,
            caption: None,
            photo: None,
        };
        let classification = classify(&envelope);
        assert_eq!(
            classification.text,
            Some(TextCategory::PlainText(String::new()))
        );
    }

    #[test]
    fn test_photo_and_text_classify_independently() {
        let classification = classify(&photo_envelope(Some("look at this"), Some("Rotate it")));
        assert_eq!(
            classification.text,
            Some(TextCategory::PlainText("look at this".to_string()))
        );
        assert_eq!(classification.photo, Some("rotate it".to_string()));
    }

    #[test]
    fn test_photo_without_caption_yields_empty_caption() {
        let classification = classify(&photo_envelope(None, None));
        assert_eq!(classification.text, None);
        assert_eq!(classification.photo, Some(String::new()));
    }
}
