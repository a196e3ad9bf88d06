mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use spierdomino_api::services::history_service::InMemoryHistoryStore;
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn test_new_puzzle_is_a_shuffled_permutation() {
    let (app, _) = common::create_test_app().await;

    let (status, view) = common::send(&app, "GET", "/api/v1/puzzle", None).await;

    assert_eq!(status, StatusCode::OK);
    let items = view["items"].as_array().unwrap();
    assert_eq!(items.len(), 10);

    let seen: HashSet<&str> = items.iter().map(|i| i["id"].as_str().unwrap()).collect();
    let solved = common::solved_order();
    let expected: HashSet<&str> = solved.iter().map(String::as_str).collect();
    assert_eq!(seen, expected);

    assert!(items.iter().all(|i| i["is_locked"] == false));
    assert!(items.iter().all(|i| i.get("is_correct").is_none()));
    assert_eq!(view["phase"], "idle");
    assert_eq!(view["hints_used"], 0);
    assert_eq!(view["hints_remaining"], 9);
    assert_eq!(view["hint_available"], true);
    assert_eq!(view["feedback_visible"], false);
    assert_eq!(view["next_attempt_number"], 1);
}

#[tokio::test]
async fn test_solving_the_puzzle_scores_full_marks() {
    let (app, _) = common::create_test_app().await;
    common::arrange(&app, common::ids(&[3, 1, 4, 0, 2, 5, 6, 7, 8, 9])).await;

    let view = common::arrange(&app, common::solved_order()).await;
    assert_eq!(view["phase"], "in_progress");

    let (status, result) = common::send(&app, "POST", "/api/v1/puzzle/check", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["score"], 100);
    assert_eq!(result["correct_count"], 10);
    assert_eq!(result["verdict"], "perfect");
    assert_eq!(result["celebrate"], true);
    assert_eq!(result["max_reachable_score"], 100);
    assert_eq!(result["attempt"]["attemptNumber"], 1);
    assert_eq!(result["attempt"]["score"], 100);
    assert_eq!(result["attempt"]["hintsUsed"], 0);
}

#[tokio::test]
async fn test_partial_order_gets_pass_verdict() {
    let (app, _) = common::create_test_app().await;
    // 0..=5 in place, the last four rotated.
    common::arrange(&app, common::ids(&[0, 1, 2, 3, 4, 5, 9, 6, 7, 8])).await;

    let (_, result) = common::send(&app, "POST", "/api/v1/puzzle/check", None).await;

    assert_eq!(result["score"], 60);
    assert_eq!(result["verdict"], "pass");
    assert_eq!(result["celebrate"], false);
}

#[tokio::test]
async fn test_reorder_rejects_invalid_payloads() {
    let (app, _) = common::create_test_app().await;
    let (_, before) = common::send(&app, "GET", "/api/v1/puzzle", None).await;

    let mut missing = common::solved_order();
    missing.pop();
    let (status, _) = common::send(
        &app,
        "PUT",
        "/api/v1/puzzle/order",
        Some(json!({ "order": missing })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut duplicated = common::solved_order();
    duplicated[1] = "item-0".to_string();
    let (status, body) = common::send(
        &app,
        "PUT",
        "/api/v1/puzzle/order",
        Some(json!({ "order": duplicated })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.as_str().unwrap().contains("item-0"));

    let (status, _) = common::send(
        &app,
        "PUT",
        "/api/v1/puzzle/order",
        Some(json!({ "order": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, after) = common::send(&app, "GET", "/api/v1/puzzle", None).await;
    assert_eq!(before["items"], after["items"]);
}

#[tokio::test]
async fn test_hint_locks_a_step_which_then_does_not_score() {
    let (app, _) = common::create_test_app().await;
    common::arrange(&app, common::rotated_order()).await;

    let (status, hint) = common::send(&app, "POST", "/api/v1/puzzle/hints", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hint["applied"], true);
    assert_eq!(hint["hints_used"], 1);
    assert_eq!(hint["hints_remaining"], 8);

    let hinted = hint["hinted_step_id"].as_str().unwrap().to_string();
    let (_, view) = common::send(&app, "GET", "/api/v1/puzzle", None).await;
    let items = view["items"].as_array().unwrap();
    let position = items.iter().position(|i| i["id"] == hinted.as_str()).unwrap();
    assert_eq!(format!("item-{}", position), hinted);
    assert_eq!(items[position]["is_locked"], true);
    assert_eq!(items.iter().filter(|i| i["is_locked"] == true).count(), 1);

    let (_, result) = common::send(&app, "POST", "/api/v1/puzzle/check", None).await;
    assert_eq!(result["score"], 0);
    assert_eq!(result["hints_used"], 1);
    assert_eq!(result["max_reachable_score"], 90);
    assert_eq!(result["attempt"]["hintsUsed"], 1);
}

#[tokio::test]
async fn test_hint_on_solved_board_is_a_notice() {
    let (app, _) = common::create_test_app().await;
    common::arrange(&app, common::solved_order()).await;

    let (status, hint) = common::send(&app, "POST", "/api/v1/puzzle/hints", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(hint["applied"], false);
    assert!(hint["notice"].as_str().unwrap().contains("alles ligt al goed"));
    assert!(hint.get("hinted_step_id").is_none());
    assert_eq!(hint["hints_used"], 0);
}

#[tokio::test]
async fn test_hint_cap_is_enforced() {
    let config = spierdomino_api::Config {
        max_hints: Some(1),
        ..common::test_config(3)
    };
    let app = common::create_test_app_with(config, Arc::new(InMemoryHistoryStore::new())).await;
    common::arrange(&app, common::rotated_order()).await;

    let (status, hint) = common::send(&app, "POST", "/api/v1/puzzle/hints", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hint["hints_remaining"], 0);

    let (_, view) = common::send(&app, "GET", "/api/v1/puzzle", None).await;
    assert_eq!(view["hint_available"], false);

    let (status, body) = common::send(&app, "POST", "/api/v1/puzzle/hints", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.as_str().unwrap().contains("Maximum hints limit reached"));
}

#[tokio::test]
async fn test_feedback_markers_follow_check_and_hint() {
    let (app, _) = common::create_test_app().await;
    common::arrange(&app, common::ids(&[3, 1, 4, 0, 2, 5, 6, 7, 8, 9])).await;

    common::send(&app, "POST", "/api/v1/puzzle/check", None).await;
    let (_, view) = common::send(&app, "GET", "/api/v1/puzzle", None).await;
    assert_eq!(view["phase"], "checked");
    assert_eq!(view["feedback_visible"], true);
    assert_eq!(view["last_score"], 60);
    let items = view["items"].as_array().unwrap();
    assert_eq!(items[0]["is_correct"], false);
    assert_eq!(items[1]["is_correct"], true);

    common::send(&app, "POST", "/api/v1/puzzle/hints", None).await;
    let (_, view) = common::send(&app, "GET", "/api/v1/puzzle", None).await;
    assert_eq!(view["feedback_visible"], false);
    let items = view["items"].as_array().unwrap();
    assert!(items.iter().all(|i| i.get("is_correct").is_none()));
}

#[tokio::test]
async fn test_reset_reshuffles_but_keeps_history() {
    let (app, _) = common::create_test_app().await;
    common::arrange(&app, common::rotated_order()).await;
    common::send(&app, "POST", "/api/v1/puzzle/hints", None).await;
    common::send(&app, "POST", "/api/v1/puzzle/check", None).await;
    common::send(&app, "POST", "/api/v1/puzzle/check", None).await;

    let (status, view) = common::send(&app, "POST", "/api/v1/puzzle/reset", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["phase"], "idle");
    assert_eq!(view["hints_used"], 0);
    assert_eq!(view["feedback_visible"], false);
    assert_eq!(view["next_attempt_number"], 3);
    let items = view["items"].as_array().unwrap();
    assert!(items.iter().all(|i| i["is_locked"] == false));

    let (_, history) = common::send(&app, "GET", "/api/v1/history", None).await;
    let attempts = history.as_array().unwrap();
    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0]["attemptNumber"], 1);
    assert_eq!(attempts[1]["attemptNumber"], 2);
}

#[tokio::test]
async fn test_trace_id_is_echoed_or_generated() {
    let (app, _) = common::create_test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/puzzle")
                .header("x-trace-id", "trace-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-trace-id"], "trace-123");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let generated = response.headers()["x-trace-id"].to_str().unwrap();
    assert_eq!(generated.len(), 36);
}

#[tokio::test]
async fn test_health_and_metrics() {
    let (app, _) = common::create_test_app().await;
    common::send(&app, "POST", "/api/v1/puzzle/check", None).await;

    let (status, health) = common::send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["dependencies"]["history_store"]["backend"], "memory");

    let (status, metrics) = common::send(&app, "GET", "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    let text = metrics.as_str().unwrap();
    assert!(text.contains("puzzle_checks_total"));
    assert!(text.contains("http_requests_total"));
}
