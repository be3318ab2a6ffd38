//! Handler for the full progress reset.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::caller::CallerIdentity;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub message: &'static str,
}

/// POST /api/reset/
///
/// Delete all of the caller's pets and zero their progress in one
/// transaction.
pub async fn full_reset(
    CallerIdentity(caller): CallerIdentity,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    state.store.full_reset(&caller).await?;
    Ok(Json(ResetResponse {
        message: "System reset successful.",
    }))
}
