use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::AppState;

/// Body served on `/` for uptime pingers.
pub const KEEPALIVE_TEXT: &str = "Quakeworld Bot is running!";

/// GET /: static availability string.
pub async fn root_handler() -> &'static str {
    KEEPALIVE_TEXT
}

/// GET /health: liveness check, returns build and relay metadata.
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "git_sha": env!("QWREPORT_GIT_SHA"),
        "watched_channel": state.config.discord.watched_channel,
    }))
}
