use serde::{Deserialize, Serialize};
use std::fmt;

/// A chat message as seen by the relay, decoupled from the Discord client types.
///
/// Built by the platform adapter for both "created" and "edited" events.
/// `previous_content` is only set for edits whose pre-edit text was cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub id: u64,
    pub channel_id: u64,
    pub channel_name: String,
    pub author_is_bot: bool,
    /// Human-readable author for log lines (e.g. `player#0001`).
    pub author_tag: String,
    pub content: Option<String>,
    pub previous_content: Option<String>,
}

impl IncomingMessage {
    /// Message text with surrounding whitespace removed, `None` when blank.
    pub fn text(&self) -> Option<&str> {
        self.content
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Which status reaction to put on the originating message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    /// Links from a new message were recorded.
    Success,
    /// Links from an edited message were recorded.
    Edited,
    /// Delivery failed.
    Failure,
}

impl ReactionKind {
    /// Unicode emoji sent to Discord for this reaction.
    pub fn emoji(self) -> &'static str {
        match self {
            ReactionKind::Success => "\u{2705}", // ✅
            ReactionKind::Edited => "\u{270f}\u{fe0f}", // ✏️
            ReactionKind::Failure => "\u{274c}", // ❌
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReactionKind::Success => "success",
            ReactionKind::Edited => "edited",
            ReactionKind::Failure => "failure",
        };
        f.write_str(s)
    }
}
