use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::caller::CallerIdentity;
use crate::state::AppState;

/// GET /api/collection/
pub async fn get_collection(
    CallerIdentity(caller): CallerIdentity,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let summary = state.store.collection_summary(&caller).await?;
    Ok(Json(summary))
}
