//! Event dispatch: turns "created"/"edited" notifications into processor runs
//! and status reactions.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use qwreport_core::{IncomingMessage, ReactionKind};

use crate::process::{MessageProcessor, ProcessingOutcome};

/// Puts a status reaction on a message. Implemented by the platform adapter.
#[async_trait]
pub trait Reactor: Send + Sync {
    async fn react(
        &self,
        msg: &IncomingMessage,
        kind: ReactionKind,
    ) -> qwreport_core::Result<()>;
}

/// Stateless per-event entry point shared by all handler tasks.
pub struct EventDispatcher {
    processor: Arc<MessageProcessor>,
    reactor: Arc<dyn Reactor>,
    reactions_enabled: bool,
}

impl EventDispatcher {
    pub fn new(processor: Arc<MessageProcessor>, reactor: Arc<dyn Reactor>) -> Self {
        Self {
            processor,
            reactor,
            reactions_enabled: true,
        }
    }

    /// Turn status reactions on or off. Forwarding is unaffected.
    pub fn with_reactions(mut self, enabled: bool) -> Self {
        self.reactions_enabled = enabled;
        self
    }

    pub fn processor(&self) -> &MessageProcessor {
        &self.processor
    }

    /// Handle a newly created message.
    pub async fn on_message_created(&self, msg: IncomingMessage) -> ProcessingOutcome {
        let outcome = self.run(msg.clone(), false).await;
        match &outcome {
            ProcessingOutcome::Accepted { .. } => self.react(&msg, ReactionKind::Success).await,
            ProcessingOutcome::Failed { .. } => self.react(&msg, ReactionKind::Failure).await,
            ProcessingOutcome::Skipped { reason } => {
                debug!(message_id = msg.id, %reason, "message skipped");
            }
        }
        outcome
    }

    /// Handle an edited message.
    ///
    /// Returns `None` when the edit is not substantive: blank new content, or
    /// content identical to the previous version. Edits whose previous content
    /// is unknown count as changed.
    pub async fn on_message_edited(&self, msg: IncomingMessage) -> Option<ProcessingOutcome> {
        if msg.text().is_none() {
            debug!(message_id = msg.id, "edit ignored: new content is empty");
            return None;
        }
        if msg.previous_content.is_some() && msg.previous_content == msg.content {
            debug!(message_id = msg.id, "edit ignored: content unchanged");
            return None;
        }

        let outcome = self.run(msg.clone(), true).await;
        match &outcome {
            ProcessingOutcome::Accepted { .. } => self.react(&msg, ReactionKind::Edited).await,
            ProcessingOutcome::Failed { .. } => self.react(&msg, ReactionKind::Failure).await,
            ProcessingOutcome::Skipped { reason } => {
                debug!(message_id = msg.id, %reason, "edited message skipped");
            }
        }
        Some(outcome)
    }

    /// Run the processor in its own task so a panic becomes a `Failed` outcome
    /// instead of tearing down the caller.
    async fn run(&self, msg: IncomingMessage, edited: bool) -> ProcessingOutcome {
        let processor = Arc::clone(&self.processor);
        let message_id = msg.id;
        let task = tokio::spawn(async move { processor.process(&msg, edited).await });

        match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(message_id, error = %e, "message processing task aborted");
                ProcessingOutcome::Failed {
                    error: format!("processing aborted: {e}"),
                }
            }
        }
    }

    /// Best-effort: errors are logged and dropped.
    async fn react(&self, msg: &IncomingMessage, kind: ReactionKind) {
        if !self.reactions_enabled {
            return;
        }
        if let Err(e) = self.reactor.react(msg, kind).await {
            warn!(
                message_id = msg.id,
                reaction = %kind,
                code = e.code(),
                error = %e,
                "failed to add reaction"
            );
        }
    }
}
