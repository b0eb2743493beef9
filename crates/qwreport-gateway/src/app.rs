use axum::{routing::get, Router};
use qwreport_core::config::RelayConfig;
use std::sync::Arc;

/// Shared state for the keepalive server, passed as Arc<AppState> to handlers.
pub struct AppState {
    pub config: RelayConfig,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Self {
        Self { config }
    }
}

/// Assemble the keepalive router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(crate::http::keepalive::root_handler))
        .route("/health", get(crate::http::keepalive::health_handler))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use qwreport_core::config::{DiscordConfig, KeepaliveConfig, WebhookConfig};
    use tower::ServiceExt;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(RelayConfig {
            discord: DiscordConfig {
                bot_token: "token".into(),
                watched_channel: "reports".into(),
                ack_reactions: true,
                message_cache: 200,
            },
            webhook: WebhookConfig {
                url: "https://example.com/exec".into(),
                timeout_secs: 10,
            },
            keepalive: KeepaliveConfig::default(),
        }))
    }

    #[tokio::test]
    async fn root_returns_static_text() {
        let resp = build_router(state())
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = to_bytes(resp.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], crate::http::keepalive::KEEPALIVE_TEXT.as_bytes());
    }

    #[tokio::test]
    async fn health_reports_watched_channel() {
        let resp = build_router(state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = to_bytes(resp.into_body(), 4096).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["watched_channel"], "reports");
        let mut keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, ["git_sha", "status", "version", "watched_channel"]);
        // The webhook URL is a secret and must not leak.
        assert!(!String::from_utf8_lossy(&body).contains("example.com"));
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let resp = build_router(state())
            .oneshot(Request::get("/exec").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
