//! Handlers for the task list.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pomopet_core::types::DbId;
use pomopet_db::models::task::CreateTask;

use crate::error::AppResult;
use crate::middleware::caller::CallerIdentity;
use crate::state::AppState;

/// GET /api/tasks/
pub async fn list_tasks(
    CallerIdentity(caller): CallerIdentity,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let tasks = state.store.list_tasks(&caller).await?;
    Ok(Json(tasks))
}

/// POST /api/tasks/
pub async fn create_task(
    CallerIdentity(caller): CallerIdentity,
    State(state): State<AppState>,
    payload: Result<Json<CreateTask>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let task = state.store.create_task(&caller, &input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /api/tasks/{id}/toggle/
///
/// Flip the task's `completed` flag.
pub async fn toggle_task(
    CallerIdentity(caller): CallerIdentity,
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<impl IntoResponse> {
    let Path(task_id) = path?;
    let task = state.store.toggle_task(&caller, task_id).await?;
    Ok(Json(task))
}
