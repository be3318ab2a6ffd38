pub mod health;
pub mod pets;
pub mod progress;
pub mod tasks;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /species/                          list species catalog
///
/// /eggpets/                          list (?is_active=), create
/// /eggpets/{id}/evolve/              spend points, advance one stage (PATCH)
/// /eggpets/{id}/activate/            make the only active pet (PATCH)
/// /eggpets/{id}/reset/               back to egg (PATCH)
/// /eggpets/{id}/rename/              set nickname (PATCH)
///
/// /progress/                         get, record (PATCH)
///
/// /tasks/                            list, create
/// /tasks/{id}/toggle/                flip completed (PATCH)
///
/// /reset/                            delete pets, zero progress (POST)
/// /collection/                       collection summary
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/species/", get(handlers::species::list_species))
        .merge(pets::router())
        .merge(progress::router())
        .merge(tasks::router())
        .route("/reset/", post(handlers::reset::full_reset))
        .route("/collection/", get(handlers::collection::get_collection))
}
