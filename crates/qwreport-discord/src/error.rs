/// Failures that stop the Discord adapter for good.
///
/// Anything else the gateway throws is logged and retried by the reconnect loop.
#[derive(Debug, thiserror::Error)]
pub enum DiscordError {
    #[error("Discord rejected the bot token at login")]
    TokenRejected,
}
