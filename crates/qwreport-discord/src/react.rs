//! Status reactions on the originating message: ✅ recorded, ✏️ recorded
//! after an edit, ❌ delivery failed.
//!
//! Uses the REST client only, so it keeps working across gateway reconnects.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::channel::ReactionType;
use serenity::model::id::{ChannelId, MessageId};
use tracing::debug;

use qwreport_core::{IncomingMessage, QwReportError, ReactionKind};
use qwreport_pipeline::Reactor;

/// [`Reactor`] backed by the Discord REST API.
pub struct DiscordReactor {
    http: Arc<Http>,
}

impl DiscordReactor {
    /// The token is assumed to have passed `RelayConfig::validate`.
    pub fn new(bot_token: &str) -> Self {
        Self::from_http(Arc::new(Http::new(bot_token.trim())))
    }

    pub fn from_http(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Reactor for DiscordReactor {
    async fn react(
        &self,
        msg: &IncomingMessage,
        kind: ReactionKind,
    ) -> qwreport_core::Result<()> {
        let reaction = ReactionType::Unicode(kind.emoji().to_string());
        self.http
            .create_reaction(
                ChannelId::new(msg.channel_id),
                MessageId::new(msg.id),
                &reaction,
            )
            .await
            .map_err(|e| QwReportError::Reaction(e.to_string()))?;

        debug!(message_id = msg.id, reaction = %kind, "reaction added");
        Ok(())
    }
}
