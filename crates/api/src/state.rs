use std::sync::Arc;

use pomopet_db::PetStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; both fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Pet, progress and task storage (PostgreSQL or in-memory).
    pub store: Arc<dyn PetStore>,
    /// Server configuration (read by the caller extractor).
    pub config: Arc<ServerConfig>,
}
