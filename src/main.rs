use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use polybot::bot::{self, BotVariant, DetectionBot, EchoBot, ModeratedChatBot, QuoteBot};
use polybot::config::{AppConfig, BotMode};
use polybot::image_filters::LocalImageFilters;
use polybot::inference::HttpDetector;
use polybot::moderation::{Moderation, Vocabulary};
use polybot::storage::S3Storage;
use polybot::transport::{TelegramTransport, Transport};

/// Build the configured bot variant with its collaborators wired in.
///
/// Variant selection is a deployment-time choice: one process runs one
/// composition for its whole lifetime.
async fn build_variant(
    config: &AppConfig,
    client: &reqwest::Client,
    transport: Arc<dyn Transport>,
) -> Result<BotVariant> {
    let variant = match config.bot.mode {
        BotMode::Echo => BotVariant::Echo(EchoBot::new(transport)),
        BotMode::Quote => BotVariant::Quote(QuoteBot::new(transport)),
        BotMode::ModeratedChat => {
            // Fail-open: an unreachable word list disables moderation
            // instead of refusing to start.
            let vocabulary = Vocabulary::fetch(client, &config.moderation.word_list_url).await;
            BotVariant::ModeratedChat(ModeratedChatBot::new(
                transport,
                Arc::new(LocalImageFilters::new()),
                Moderation::new(vocabulary),
            ))
        }
        BotMode::Detection => {
            let store = S3Storage::new(&config.storage).await?;
            let detection_client = reqwest::Client::builder()
                .timeout(Duration::from_secs(config.detection.timeout_secs))
                .build()?;
            let detector = HttpDetector::new(detection_client, config.detection.api_url.clone());
            BotVariant::Detection(DetectionBot::new(
                transport,
                Arc::new(store),
                Arc::new(detector),
                config.storage.key_prefix.clone(),
            ))
        }
    };

    Ok(variant)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file first
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load and validate configuration early
    let config = AppConfig::from_env()?;
    config.validate()?;
    info!("{}", config.summary());

    // Initialize the bot with custom client configuration for better reliability
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.bot.http_timeout_secs))
        .build()?;

    let teloxide_bot = Bot::with_client(config.bot.token.clone(), client.clone());
    let transport: Arc<dyn Transport> =
        Arc::new(TelegramTransport::new(teloxide_bot.clone(), client.clone()));

    let variant = Arc::new(build_variant(&config, &client, transport).await?);

    info!(mode = ?config.bot.mode, "Bot initialized, starting dispatcher");

    let handler = Update::filter_message().endpoint(bot::message_handler);

    Dispatcher::builder(teloxide_bot, handler)
        .dependencies(dptree::deps![variant])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
