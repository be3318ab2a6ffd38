use axum::routing::get;
use axum::Router;

use crate::handlers::progress;
use crate::state::AppState;

/// ```text
/// GET    /progress/   -> get_progress
/// PATCH  /progress/   -> record_progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/progress/",
        get(progress::get_progress).patch(progress::record_progress),
    )
}
