use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tracing::warn;

use crate::conversation::Dispatcher;
use crate::messaging::types::Update;

pub const LIVENESS_TEXT: &str = "Trading setup bot is running. Use Telegram.";

pub struct AppState {
    pub dispatcher: Dispatcher,
}

pub fn router(state: Arc<AppState>, webhook_path: &str) -> Router {
    Router::new()
        .route(webhook_path, post(webhook))
        .route("/", get(home))
        .with_state(state)
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or("").trim() == "application/json")
        .unwrap_or(false)
}

/// POST /webhook - one Telegram update, handled before responding
async fn webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    if !is_json(&headers) {
        return StatusCode::FORBIDDEN;
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(u) => u,
        Err(e) => {
            warn!("Undecodable update: {}", e);
            return StatusCode::BAD_REQUEST;
        }
    };

    if let Some(text) = update.into_text() {
        state.dispatcher.handle(&text).await;
    }
    StatusCode::OK
}

/// GET / - liveness
async fn home() -> &'static str {
    LIVENESS_TEXT
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn content_type_must_be_json() {
        let mut headers = HeaderMap::new();
        assert!(!is_json(&headers));

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!is_json(&headers));

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(is_json(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(is_json(&headers));
    }
}
