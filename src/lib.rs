//! # Polybot
//!
//! A Telegram bot front end built around a message classification and
//! dispatch engine. Each deployment runs one of four behavior variants
//! (echo, quote, moderated chat with image filters, object detection)
//! composed from shared classifier, dispatch, and workflow components.

pub mod bot;
pub mod classifier;
pub mod config;
pub mod detection;
pub mod envelope;
pub mod errors;
pub mod filter_dispatch;
pub mod image_filters;
pub mod inference;
pub mod moderation;
pub mod reply;
pub mod storage;
pub mod transport;

// Re-export types for easier access
pub use classifier::{classify, Classification, TextCategory};
pub use envelope::{MessageEnvelope, PhotoRef};
pub use reply::Reply;
