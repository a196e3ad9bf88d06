use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;
use validator::Validate;

use crate::{
    metrics::{record_check, record_hint, record_reset},
    models::{
        check::{CheckResponse, Verdict},
        hint::{HintOutcome, HintResponse, NOTHING_TO_HINT_NOTICE},
        AttemptLog, ReorderRequest,
    },
    services::{scoring_service::max_reachable_score, AppState},
};

/// Writes the full history back; a failed write is logged and the request
/// still succeeds.
async fn persist_history(state: &AppState, attempts: &AttemptLog) {
    if let Err(e) = state.history.save(attempts).await {
        tracing::error!(
            "Failed to persist attempt history under key={}: {:#}",
            state.history.key(),
            e
        );
    }
}

/// GET /api/v1/puzzle
pub async fn get_puzzle(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let game = state.game.lock().await;
    Json(game.session.view(&game.attempts))
}

/// PUT /api/v1/puzzle/order
pub async fn reorder(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ReorderRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    req.validate()
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let mut guard = state.game.lock().await;
    let game = &mut *guard;

    game.session.reorder(&req.order).map_err(|e| {
        tracing::warn!("Rejected reorder: {}", e);
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    Ok((StatusCode::OK, Json(game.session.view(&game.attempts))))
}

/// POST /api/v1/puzzle/hints
pub async fn request_hint(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let mut game = state.game.lock().await;
    let policy = game.session.policy();

    if !game.session.hint_available() {
        record_hint("exhausted");
        return Err((
            StatusCode::CONFLICT,
            format!("Maximum hints limit reached ({})", policy.max_hints()),
        ));
    }

    let outcome = game.session.apply_hint();
    let hints_used = game.session.session().hints_used;
    let hints_remaining = policy.remaining(hints_used);

    let response = match outcome {
        HintOutcome::Applied { step_id, .. } => {
            record_hint("applied");
            HintResponse {
                applied: true,
                hinted_step_id: Some(step_id),
                notice: None,
                hints_used,
                hints_remaining,
            }
        }
        HintOutcome::NothingToHint => {
            record_hint("nothing_to_hint");
            tracing::info!("Hint requested but every unlocked step is already in place");
            HintResponse {
                applied: false,
                hinted_step_id: None,
                notice: Some(NOTHING_TO_HINT_NOTICE.to_string()),
                hints_used,
                hints_remaining,
            }
        }
    };

    Ok((StatusCode::OK, Json(response)))
}

/// POST /api/v1/puzzle/check
pub async fn check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut guard = state.game.lock().await;
    let game = &mut *guard;

    let outcome = game.session.check(&mut game.attempts, Utc::now());
    persist_history(&state, &game.attempts).await;

    let verdict = Verdict::from_score(outcome.score);
    record_check(verdict.as_str(), outcome.score);

    let hints_used = outcome.attempt.hints_used;
    Json(CheckResponse {
        score: outcome.score,
        correct_count: outcome.correct_count,
        total_items: outcome.total_items,
        hints_used,
        max_reachable_score: max_reachable_score(hints_used, outcome.total_items),
        verdict,
        celebrate: verdict == Verdict::Perfect,
        attempt: outcome.attempt,
    })
}

/// POST /api/v1/puzzle/reset
pub async fn reset(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut game = state.game.lock().await;
    game.session.reset();
    record_reset("reshuffle");
    Json(game.session.view(&game.attempts))
}

/// GET /api/v1/history
pub async fn get_history(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let game = state.game.lock().await;
    Json(game.attempts.attempts().to_vec())
}

/// DELETE /api/v1/history
pub async fn clear_history(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut guard = state.game.lock().await;
    let game = &mut *guard;

    game.session.full_reset(&mut game.attempts);
    persist_history(&state, &game.attempts).await;
    record_reset("full");

    tracing::info!("Attempt history cleared");
    Json(game.session.view(&game.attempts))
}
