//! Webhook delivery of URL batches.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use qwreport_core::config::WebhookConfig;

use crate::batch::UrlBatch;

/// Longest slice of an error response body kept in the diagnostic.
const ERROR_BODY_MAX: usize = 200;

/// Errors from a single delivery attempt. Callers only surface the message.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("webhook timed out after {ms}ms")]
    Timeout { ms: u64 },

    #[error("webhook unreachable: {0}")]
    Connect(String),

    #[error("webhook returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("webhook request failed: {0}")]
    Request(String),
}

/// Destination for URL batches.
///
/// One call is one delivery attempt: no retries, and the batch is delivered
/// whole or not at all.
#[async_trait]
pub trait Forwarder: Send + Sync {
    async fn forward(&self, batch: &UrlBatch) -> Result<(), ForwardError>;
}

/// Posts batches as `{"urls": [...]}` to the configured webhook.
pub struct WebhookForwarder {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl WebhookForwarder {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            timeout,
        }
    }

    pub fn from_config(config: &WebhookConfig) -> Self {
        Self::new(config.url.trim(), Duration::from_secs(config.timeout_secs))
    }
}

#[async_trait]
impl Forwarder for WebhookForwarder {
    async fn forward(&self, batch: &UrlBatch) -> Result<(), ForwardError> {
        debug!(count = batch.len(), "posting URL batch to webhook");

        let resp = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.timeout)
            .json(batch)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ForwardError::Timeout {
                        ms: self.timeout.as_millis() as u64,
                    }
                } else if e.is_connect() {
                    ForwardError::Connect(e.to_string())
                } else {
                    ForwardError::Request(e.to_string())
                }
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let body = truncate(&text, ERROR_BODY_MAX);
            warn!(status = status.as_u16(), body = %body, "webhook rejected batch");
            return Err(ForwardError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // 2xx bodies are not inspected; Apps Script answers 200 even for script errors.
        Ok(())
    }
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}
