//! Route definitions for the task list.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// ```text
/// GET    /tasks/              -> list_tasks
/// POST   /tasks/              -> create_task
/// PATCH  /tasks/{id}/toggle/  -> toggle_task
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks/", get(tasks::list_tasks).post(tasks::create_task))
        .route("/tasks/{id}/toggle/", patch(tasks::toggle_task))
}
