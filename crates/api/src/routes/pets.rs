//! Route definitions for egg pets.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::pets;
use crate::state::AppState;

/// Pet routes. Paths keep their trailing slash.
///
/// ```text
/// GET    /eggpets/                -> list_pets
/// POST   /eggpets/                -> create_pet
/// PATCH  /eggpets/{id}/evolve/    -> evolve_pet
/// PATCH  /eggpets/{id}/activate/  -> activate_pet
/// PATCH  /eggpets/{id}/reset/     -> reset_pet
/// PATCH  /eggpets/{id}/rename/    -> rename_pet
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/eggpets/", get(pets::list_pets).post(pets::create_pet))
        .route("/eggpets/{id}/evolve/", patch(pets::evolve_pet))
        .route("/eggpets/{id}/activate/", patch(pets::activate_pet))
        .route("/eggpets/{id}/reset/", patch(pets::reset_pet))
        .route("/eggpets/{id}/rename/", patch(pets::rename_pet))
}
