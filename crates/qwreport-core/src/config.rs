use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{QwReportError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "qwreport.toml";
pub const DEFAULT_KEEPALIVE_BIND: &str = "0.0.0.0";
pub const DEFAULT_KEEPALIVE_PORT: u16 = 3000;
pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MESSAGE_CACHE: usize = 200;

/// Top-level config (qwreport.toml + legacy env names + QWREPORT_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    pub discord: DiscordConfig,
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub keepalive: KeepaliveConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    pub bot_token: String,
    /// Name of the only channel whose messages are scanned for game links.
    pub watched_channel: String,
    /// When false, outcomes are only logged and no reactions are added.
    #[serde(default = "bool_true")]
    pub ack_reactions: bool,
    /// Messages kept per channel in serenity's cache. Edits of messages that
    /// fell out of the cache arrive without their previous content.
    #[serde(default = "default_message_cache")]
    pub message_cache: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Endpoint that records URL batches. The URL itself is the shared secret.
    pub url: String,
    #[serde(default = "default_webhook_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeepaliveConfig {
    #[serde(default = "default_keepalive_bind")]
    pub bind: String,
    #[serde(default = "default_keepalive_port")]
    pub port: u16,
}

impl Default for KeepaliveConfig {
    fn default() -> Self {
        Self {
            bind: default_keepalive_bind(),
            port: default_keepalive_port(),
        }
    }
}

fn bool_true() -> bool {
    true
}
fn default_message_cache() -> usize {
    DEFAULT_MESSAGE_CACHE
}
fn default_webhook_timeout() -> u64 {
    DEFAULT_WEBHOOK_TIMEOUT_SECS
}
fn default_keepalive_bind() -> String {
    DEFAULT_KEEPALIVE_BIND.to_string()
}
fn default_keepalive_port() -> u16 {
    DEFAULT_KEEPALIVE_PORT
}

impl RelayConfig {
    /// Load config from a TOML file with environment overrides, then validate it.
    ///
    /// Precedence, lowest first:
    ///   1. TOML file (explicit path, else `./qwreport.toml`; a missing file is fine)
    ///   2. Legacy variables: DISCORD_TOKEN, GOOGLE_WEBHOOK, REPORTS_CHANNEL, PORT
    ///   3. QWREPORT_* variables, `__` separating sections (QWREPORT_WEBHOOK__URL)
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
        tracing::debug!(path, "loading config");

        let config: RelayConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(
                Env::raw()
                    .only(&["DISCORD_TOKEN"])
                    .map(|_| "discord.bot_token".into()),
            )
            .merge(
                Env::raw()
                    .only(&["GOOGLE_WEBHOOK"])
                    .map(|_| "webhook.url".into()),
            )
            .merge(
                Env::raw()
                    .only(&["REPORTS_CHANNEL"])
                    .map(|_| "discord.watched_channel".into()),
            )
            .merge(Env::raw().only(&["PORT"]).map(|_| "keepalive.port".into()))
            .merge(Env::prefixed("QWREPORT_").split("__"))
            .extract()
            .map_err(|e| QwReportError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values that deserialize fine but cannot work at runtime.
    pub fn validate(&self) -> Result<()> {
        if self.discord.bot_token.trim().is_empty() {
            return Err(QwReportError::Config("discord.bot_token is empty".into()));
        }
        if self.discord.watched_channel.trim().is_empty() {
            return Err(QwReportError::Config(
                "discord.watched_channel is empty".into(),
            ));
        }
        if self.webhook.timeout_secs == 0 {
            return Err(QwReportError::Config(
                "webhook.timeout_secs must be at least 1".into(),
            ));
        }

        let parsed = url::Url::parse(self.webhook.url.trim())
            .map_err(|e| QwReportError::Config(format!("webhook.url is invalid: {e}")))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(QwReportError::Config(format!(
                "webhook.url must be http or https, got {other}"
            ))),
        }
    }
}
