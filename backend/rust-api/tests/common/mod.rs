#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use spierdomino_api::{
    config::Config,
    create_router,
    services::{
        history_service::{HistoryStore, InMemoryHistoryStore},
        AppState,
    },
};
use std::sync::Arc;
use tower::ServiceExt;

pub const HISTORY_KEY: &str = "han-domino-attempts";

pub fn test_config(seed: u64) -> Config {
    Config {
        shuffle_seed: Some(seed),
        ..Config::default()
    }
}

pub async fn create_test_app() -> (Router, Arc<InMemoryHistoryStore>) {
    let store = Arc::new(InMemoryHistoryStore::new());
    let app = create_test_app_with(test_config(42), store.clone()).await;
    (app, store)
}

pub async fn create_test_app_with(config: Config, store: Arc<dyn HistoryStore>) -> Router {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let app_state = Arc::new(
        AppState::new(config, store)
            .await
            .expect("Failed to initialize test app state"),
    );

    create_router(app_state)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, json)
}

pub fn ids(order: &[usize]) -> Vec<String> {
    order.iter().map(|i| format!("item-{}", i)).collect()
}

pub fn solved_order() -> Vec<String> {
    ids(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9])
}

/// Every step one slot to the right of where it belongs.
pub fn rotated_order() -> Vec<String> {
    ids(&[9, 0, 1, 2, 3, 4, 5, 6, 7, 8])
}

pub async fn arrange(app: &Router, order: Vec<String>) -> Value {
    let (status, view) = send(
        app,
        "PUT",
        "/api/v1/puzzle/order",
        Some(serde_json::json!({ "order": order })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "reorder failed: {}", view);
    view
}
