//! Handlers for egg pets: listing, creation, and the evolve / activate /
//! reset / rename actions.
//!
//! Every handler resolves the [`CallerIdentity`] first; ownership checks
//! happen inside the store.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pomopet_core::types::DbId;
use pomopet_db::models::pet::{CreateEggPet, PetListParams, RenamePet};

use crate::error::AppResult;
use crate::middleware::caller::CallerIdentity;
use crate::state::AppState;

/// GET /api/eggpets/?is_active={bool}
pub async fn list_pets(
    CallerIdentity(caller): CallerIdentity,
    State(state): State<AppState>,
    Query(params): Query<PetListParams>,
) -> AppResult<impl IntoResponse> {
    let pets = state
        .store
        .list_pets(&caller, params.active_filter())
        .await?;
    Ok(Json(pets))
}

/// POST /api/eggpets/
///
/// Create a pet owned by the caller. Returns 201.
pub async fn create_pet(
    CallerIdentity(caller): CallerIdentity,
    State(state): State<AppState>,
    payload: Result<Json<CreateEggPet>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let pet = state.store.create_pet(&caller, &input).await?;
    Ok((StatusCode::CREATED, Json(pet)))
}

/// PATCH /api/eggpets/{id}/evolve/
///
/// Spend points to advance the pet one stage.
pub async fn evolve_pet(
    CallerIdentity(caller): CallerIdentity,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(pet_id) = path?;
    let pet = state.store.evolve_pet(&caller, pet_id).await?;
    Ok(Json(pet))
}

/// PATCH /api/eggpets/{id}/activate/
pub async fn activate_pet(
    CallerIdentity(caller): CallerIdentity,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(pet_id) = path?;
    let pet = state.store.activate_pet(&caller, pet_id).await?;
    Ok(Json(pet))
}

/// PATCH /api/eggpets/{id}/reset/
pub async fn reset_pet(
    CallerIdentity(caller): CallerIdentity,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(pet_id) = path?;
    let pet = state.store.reset_pet(&caller, pet_id).await?;
    Ok(Json(pet))
}

/// PATCH /api/eggpets/{id}/rename/
pub async fn rename_pet(
    CallerIdentity(caller): CallerIdentity,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<RenamePet>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(pet_id) = path?;
    let Json(input) = payload?;
    let pet = state
        .store
        .rename_pet(&caller, pet_id, input.nickname.as_deref())
        .await?;
    Ok(Json(pet))
}
