//! Handlers for the species catalog.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/species/
///
/// List every species in the catalog, ordered by id.
pub async fn list_species(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let species = state.store.list_species().await?;
    Ok(Json(species))
}
