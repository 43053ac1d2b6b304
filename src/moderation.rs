//! # Moderation State & Text Dispatch
//!
//! Vocabulary-backed handling of commands and free text. The swear-word
//! vocabulary is fetched once at startup and is deliberately fail-open:
//! if the source is unreachable the set stays empty and moderation is
//! silently disabled, the bot never refuses to start over it.

use std::collections::HashSet;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::reply::Reply;

/// Rotating responses for swear-word messages, cycled per instance
pub const SWEAR_RESPONSES: [&str; 3] = [
    "Excuse me... who do you think I am that you're being filthy here? Stop it.",
    "Seriously? You're just going to continue to swear? I'm an image processing bot not a prostitute!",
    "(\u{256F}\u{00B0}\u{25A1}\u{00B0})\u{256F}\u{FE35} \u{253B}\u{2501}\u{253B} WHAT'S WRONG WITH YOU!",
];

pub const GRATITUDE_RESPONSE: &str =
    "You're welcome! If you need any further assistance, try using the available commands :)";

pub const DEFAULT_RESPONSE: &str =
    "Sorry, I didn't understand that. Type /help for available commands.";

pub const WELCOME_RESPONSE: &str =
    "Hey there! Welcome to Image Processing Bot! For available commands type \"/help\"";

pub const HELP_RESPONSE: &str = "How to use Image Processing Bot: \n\
    Simply upload a photo to me, and add your desired filter in the caption.\n\
    Supported filters: Rotate, Blur, Contour, Salt n pepper, concat and segment.";

/// Immutable set of normalized swear words, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: HashSet<String>,
}

impl Vocabulary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a vocabulary from an iterator of words, normalizing to
    /// lower case and dropping blank lines.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        Self { words }
    }

    /// Fetch a newline-delimited word list over HTTP.
    ///
    /// Fail-open: any failure (network, non-success status) yields an
    /// empty vocabulary so moderation degrades instead of crashing.
    pub async fn fetch(client: &reqwest::Client, url: &str) -> Self {
        let response = match client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Word list fetch failed, moderation disabled");
                return Self::empty();
            }
        };

        if !response.status().is_success() {
            warn!(url = %url, status = %response.status(), "Word list fetch rejected, moderation disabled");
            return Self::empty();
        }

        match response.text().await {
            Ok(body) => {
                let vocabulary = Self::from_words(body.lines());
                info!(words = vocabulary.len(), "Swear-word vocabulary loaded");
                vocabulary
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Word list body unreadable, moderation disabled");
                Self::empty()
            }
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Per-instance moderation state: the vocabulary plus the rotating
/// response counter.
///
/// The counter is serialized behind a mutex. A lost or duplicated
/// increment under concurrent delivery would only shift which canned
/// response a user sees, it is tolerable drift rather than a
/// correctness problem.
#[derive(Debug)]
pub struct Moderation {
    vocabulary: Vocabulary,
    counter: Mutex<usize>,
}

impl Moderation {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            counter: Mutex::new(0),
        }
    }

    /// Handle a slash command by name. Unknown commands are not errors,
    /// they get the same default reply as unmatched text.
    pub fn handle_command(&self, name: &str) -> Reply {
        let text = match name {
            "start" => WELCOME_RESPONSE,
            "help" => HELP_RESPONSE,
            _ => DEFAULT_RESPONSE,
        };
        Reply::Text(text.to_string())
    }

    /// Handle normalized free text.
    ///
    /// Ordering is significant: the swear check runs before the gratitude
    /// check, so a message containing both deterministically gets the
    /// swear reply.
    pub fn handle_plain_text(&self, text: &str) -> Reply {
        if self.vocabulary.contains(text) {
            let mut counter = self.counter.lock();
            let response = SWEAR_RESPONSES[*counter % SWEAR_RESPONSES.len()];
            *counter = (*counter + 1) % SWEAR_RESPONSES.len();
            return Reply::Text(response.to_string());
        }

        if text.contains("thank") {
            return Reply::Text(GRATITUDE_RESPONSE.to_string());
        }

        Reply::Text(DEFAULT_RESPONSE.to_string())
    }
}
