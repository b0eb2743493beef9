use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use qwreport_core::IncomingMessage;

use crate::batch::dedupe_and_limit;
use crate::extract::extract_urls;
use crate::forward::Forwarder;

/// Why a message was not forwarded. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NotWatchedChannel,
    AuthorIsBot,
    NoContent,
    NoMatchingUrls,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::NotWatchedChannel => "not_watched_channel",
            SkipReason::AuthorIsBot => "author_is_bot",
            SkipReason::NoContent => "no_content",
            SkipReason::NoMatchingUrls => "no_matching_urls",
        };
        f.write_str(s)
    }
}

/// Result of processing one message event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessingOutcome {
    Accepted { count: usize },
    Skipped { reason: SkipReason },
    Failed { error: String },
}

impl ProcessingOutcome {
    fn skipped(reason: SkipReason) -> Self {
        Self::Skipped { reason }
    }
}

/// Runs eligibility checks, extraction, batching and delivery for one message.
///
/// Holds only read-only state, so one instance is shared across all event tasks.
pub struct MessageProcessor {
    watched_channel: String,
    forwarder: Arc<dyn Forwarder>,
}

impl MessageProcessor {
    pub fn new(watched_channel: impl Into<String>, forwarder: Arc<dyn Forwarder>) -> Self {
        Self {
            watched_channel: watched_channel.into(),
            forwarder,
        }
    }

    pub fn watched_channel(&self) -> &str {
        &self.watched_channel
    }

    /// Process a created (`edited = false`) or edited message.
    ///
    /// Checks run in order and stop at the first failure: bot author, blank
    /// content, channel name. Delivery errors come back as
    /// [`ProcessingOutcome::Failed`], never as `Err`.
    pub async fn process(&self, msg: &IncomingMessage, edited: bool) -> ProcessingOutcome {
        if msg.author_is_bot {
            return ProcessingOutcome::skipped(SkipReason::AuthorIsBot);
        }

        let Some(text) = msg.text() else {
            return ProcessingOutcome::skipped(SkipReason::NoContent);
        };

        if msg.channel_name != self.watched_channel {
            return ProcessingOutcome::skipped(SkipReason::NotWatchedChannel);
        }

        let found = extract_urls(text);
        if found.is_empty() {
            debug!(message_id = msg.id, edited, "no game links in message");
            return ProcessingOutcome::skipped(SkipReason::NoMatchingUrls);
        }

        let batch = dedupe_and_limit(found);
        info!(
            message_id = msg.id,
            author = %msg.author_tag,
            count = batch.len(),
            edited,
            "found game links"
        );

        match self.forwarder.forward(&batch).await {
            Ok(()) => {
                info!(
                    message_id = msg.id,
                    count = batch.len(),
                    "posted links to webhook"
                );
                ProcessingOutcome::Accepted { count: batch.len() }
            }
            Err(e) => {
                warn!(message_id = msg.id, error = %e, "posting links failed");
                ProcessingOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}
