use std::sync::Arc;

use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::event::MessageUpdateEvent;
use serenity::model::gateway::Ready;
use serenity::model::id::{ChannelId, GuildId};
use serenity::model::user::User;
use serenity::prelude::{Context, EventHandler};
use tracing::{debug, info, warn};

use qwreport_core::IncomingMessage;
use qwreport_pipeline::EventDispatcher;

/// Serenity event handler wired to the relay dispatcher.
///
/// Serenity runs each event in its own task; the handler only translates
/// Discord types into [`IncomingMessage`] and awaits the dispatcher.
pub struct DiscordHandler {
    pub dispatcher: Arc<EventDispatcher>,
}

#[async_trait]
impl EventHandler for DiscordHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            name = %ready.user.name,
            guilds = ready.guilds.len(),
            watched_channel = %self.dispatcher.processor().watched_channel(),
            "Discord bot connected"
        );
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // Bot traffic is rejected before the channel check, so skip the lookup.
        let channel_name = if msg.author.bot {
            String::new()
        } else {
            resolve_channel_name(&ctx, msg.guild_id, msg.channel_id).await
        };

        let incoming = IncomingMessage {
            id: msg.id.get(),
            channel_id: msg.channel_id.get(),
            channel_name,
            author_is_bot: msg.author.bot,
            author_tag: msg.author.tag(),
            content: Some(msg.content),
            previous_content: None,
        };

        self.dispatcher.on_message_created(incoming).await;
    }

    async fn message_update(
        &self,
        ctx: Context,
        old_if_available: Option<Message>,
        new: Option<Message>,
        event: MessageUpdateEvent,
    ) {
        let edit = EditedMessage {
            id: event.id.get(),
            channel_id: event.channel_id.get(),
            event_content: event.content.clone(),
            event_author: event.author.as_ref().map(AuthorInfo::from),
            new_content: new.as_ref().map(|m| m.content.clone()),
            new_author: new.as_ref().map(|m| AuthorInfo::from(&m.author)),
            old_content: old_if_available.as_ref().map(|m| m.content.clone()),
            old_author: old_if_available
                .as_ref()
                .map(|m| AuthorInfo::from(&m.author)),
            edited_after_creation: event
                .edited_timestamp
                .is_some_and(|edited| edited > event.id.created_at()),
        };

        let Some(mut incoming) = edit.into_incoming() else {
            debug!(message_id = %event.id, "update is not a text edit, ignoring");
            return;
        };

        // Bot traffic is rejected before the channel check, so skip the lookup.
        if !incoming.author_is_bot {
            incoming.channel_name =
                resolve_channel_name(&ctx, event.guild_id, event.channel_id).await;
        }

        self.dispatcher.on_message_edited(incoming).await;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AuthorInfo {
    is_bot: bool,
    tag: String,
}

impl From<&User> for AuthorInfo {
    fn from(user: &User) -> Self {
        Self {
            is_bot: user.bot,
            tag: user.tag(),
        }
    }
}

/// A MESSAGE_UPDATE flattened to plain values, together with whatever the
/// cache still held for the message before (`old_*`) and after (`new_*`).
#[derive(Debug, Default)]
struct EditedMessage {
    id: u64,
    channel_id: u64,
    event_content: Option<String>,
    event_author: Option<AuthorInfo>,
    new_content: Option<String>,
    new_author: Option<AuthorInfo>,
    old_content: Option<String>,
    old_author: Option<AuthorInfo>,
    /// Discord stamped the update as a user edit made after the message was posted.
    edited_after_creation: bool,
}

impl EditedMessage {
    /// Build the dispatcher's view of the edit, or `None` when the update
    /// carries no text or cannot be told apart from a pin or embed unfurl.
    ///
    /// With the old message cached, the dispatcher compares texts itself.
    /// Without it only Discord's edit timestamp says the text changed.
    fn into_incoming(self) -> Option<IncomingMessage> {
        let content = self.event_content.or(self.new_content)?;
        if self.old_content.is_none() && !self.edited_after_creation {
            return None;
        }

        let author = self.event_author.or(self.new_author).or(self.old_author);
        Some(IncomingMessage {
            id: self.id,
            channel_id: self.channel_id,
            channel_name: String::new(),
            author_is_bot: author.as_ref().is_some_and(|a| a.is_bot),
            author_tag: author.map(|a| a.tag).unwrap_or_default(),
            content: Some(content),
            previous_content: self.old_content,
        })
    }
}

/// Name of a guild channel or thread, from the cache when possible.
///
/// Direct messages have no name and resolve to an empty string, which never
/// matches the watched channel.
async fn resolve_channel_name(
    ctx: &Context,
    guild_id: Option<GuildId>,
    channel_id: ChannelId,
) -> String {
    let Some(guild_id) = guild_id else {
        return String::new();
    };

    let cached = ctx.cache.guild(guild_id).and_then(|guild| {
        guild
            .channels
            .get(&channel_id)
            .map(|ch| ch.name.clone())
            .or_else(|| {
                guild
                    .threads
                    .iter()
                    .find(|t| t.id == channel_id)
                    .map(|t| t.name.clone())
            })
    });
    if let Some(name) = cached {
        return name;
    }

    match channel_id.to_channel(ctx).await {
        Ok(channel) => channel.guild().map(|gc| gc.name).unwrap_or_default(),
        Err(e) => {
            warn!(channel_id = %channel_id, error = %e, "channel lookup failed");
            String::new()
        }
    }
}
