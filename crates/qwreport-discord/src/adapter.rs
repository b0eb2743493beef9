use std::sync::Arc;
use std::time::Duration;

use serenity::cache::Settings as CacheSettings;
use serenity::gateway::GatewayError;
use serenity::model::gateway::GatewayIntents;
use serenity::Client;
use tracing::{error, info, warn};

use qwreport_core::config::DiscordConfig;
use qwreport_pipeline::EventDispatcher;

use crate::error::DiscordError;
use crate::handler::DiscordHandler;

/// Discord gateway adapter.
///
/// Wraps a serenity `Client` and drives the event loop until the process exits.
/// Reconnects whenever the gateway drops.
pub struct DiscordAdapter {
    dispatcher: Arc<EventDispatcher>,
    config: DiscordConfig,
}

impl DiscordAdapter {
    pub fn new(config: &DiscordConfig, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            dispatcher,
            config: config.clone(),
        }
    }

    /// Connect to Discord and keep reconnecting whenever the gateway drops.
    ///
    /// Only returns when Discord rejects the bot token; every other gateway
    /// failure is retried.
    pub async fn run(self) -> Result<(), DiscordError> {
        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        loop {
            let mut client = loop {
                match self.build_client(intents).await {
                    Ok(c) => break c,
                    Err(e) => {
                        error!("Discord: connect failed ({e}), retrying in 30s");
                        tokio::time::sleep(Duration::from_secs(30)).await;
                    }
                }
            };

            info!(channel = %self.config.watched_channel, "Discord: gateway connecting");

            match client.start().await {
                Err(serenity::Error::Gateway(GatewayError::InvalidAuthentication)) => {
                    error!("Discord: bot token rejected");
                    return Err(DiscordError::TokenRejected);
                }
                Err(e) => warn!("Discord: gateway error ({e}), reconnecting in 5s"),
                Ok(()) => info!("Discord: gateway stopped cleanly, reconnecting in 5s"),
            }

            tokio::time::sleep(Duration::from_secs(5)).await;
        }
    }

    /// Build a fresh serenity `Client` with our event handler.
    ///
    /// The message cache is what gives edit events their previous content.
    async fn build_client(&self, intents: GatewayIntents) -> Result<Client, serenity::Error> {
        let handler = DiscordHandler {
            dispatcher: Arc::clone(&self.dispatcher),
        };

        let mut cache = CacheSettings::default();
        cache.max_messages = self.config.message_cache;

        Client::builder(self.config.bot_token.trim(), intents)
            .event_handler(handler)
            .cache_settings(cache)
            .await
    }
}
