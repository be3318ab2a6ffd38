//! Handlers for Pomodoro progress.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use pomopet_db::models::progress::RecordProgress;

use crate::error::AppResult;
use crate::middleware::caller::CallerIdentity;
use crate::state::AppState;

/// GET /api/progress/
///
/// The caller's progress record, created with zero values on first access.
pub async fn get_progress(
    CallerIdentity(caller): CallerIdentity,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let progress = state.store.get_progress(&caller).await?;
    Ok(Json(progress))
}

/// PATCH /api/progress/
///
/// Add `add_points` and `add_sessions` to the caller's totals. Omitted
/// fields count as zero.
pub async fn record_progress(
    CallerIdentity(caller): CallerIdentity,
    State(state): State<AppState>,
    payload: Result<Json<RecordProgress>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let delta = input.delta()?;

    let progress = state.store.record_progress(&caller, delta).await?;
    Ok(Json(progress))
}
