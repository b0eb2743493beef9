//! Link relay pipeline: extraction, batching, webhook delivery and the
//! per-event decision logic.
//!
//! Platform adapters build an [`IncomingMessage`](qwreport_core::IncomingMessage)
//! and hand it to [`EventDispatcher`]; everything below that is transport-agnostic.

pub mod batch;
pub mod dispatch;
pub mod extract;
pub mod forward;
pub mod process;

pub use batch::{dedupe_and_limit, UrlBatch, MAX_BATCH_URLS};
pub use dispatch::{EventDispatcher, Reactor};
pub use extract::extract_urls;
pub use forward::{ForwardError, Forwarder, WebhookForwarder};
pub use process::{MessageProcessor, ProcessingOutcome, SkipReason};
