//! Bot module for handling Telegram interactions
//!
//! This module is split into two submodules:
//! - `message_handler`: the dispatcher endpoint turning raw messages into envelopes
//! - `variants`: the four deployment profiles composed from the shared dispatch pieces

pub mod message_handler;
pub mod variants;

// Re-export main handler functions for use in main.rs
pub use message_handler::message_handler;
pub use variants::{
    BotVariant, DetectionBot, EchoBot, ModeratedChatBot, QuoteBot, ECHO_PREFIX,
    QUOTE_EXEMPT_PHRASE,
};
