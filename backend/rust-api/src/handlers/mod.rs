use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::metrics;
use crate::services::AppState;

pub mod puzzle;

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.history.store();
    let mut dependencies = serde_json::Map::new();

    let store_health = match tokio::time::timeout(
        std::time::Duration::from_secs(1),
        store.ping(),
    )
    .await
    {
        Ok(Ok(())) => json!({ "status": "healthy", "backend": store.backend() }),
        Ok(Err(e)) => json!({
            "status": "unhealthy",
            "backend": store.backend(),
            "error": format!("History store error: {}", e)
        }),
        Err(_) => json!({
            "status": "unhealthy",
            "backend": store.backend(),
            "error": "History store timeout after 1s"
        }),
    };

    let healthy = store_health.get("status").and_then(|v| v.as_str()) == Some("healthy");
    dependencies.insert("history_store".to_string(), store_health);

    let (status_code, status) = if healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status_code,
        Json(json!({
            "status": status,
            "service": "spierdomino-api",
            "version": env!("CARGO_PKG_VERSION"),
            "dependencies": dependencies
        })),
    )
}

pub async fn metrics_handler() -> Response {
    match metrics::render_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to render metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
