use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use pomopet_db::models::species::CreatePetSpecies;
use pomopet_db::{MemoryStore, PetStore, PgStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pomopet_api::config::ServerConfig;
use pomopet_api::router::build_app_router;
use pomopet_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pomopet_api=debug,pomopet_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        token_auth = config.jwt.is_some(),
        "Loaded server configuration",
    );

    // --- Store ---
    let store: Arc<dyn PetStore> = match &config.database_url {
        Some(database_url) => Arc::new(connect_postgres(database_url, &config).await),
        None => Arc::new(build_memory_store(config.species_seed_file.as_deref()).await),
    };

    // --- App state ---
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Connect to PostgreSQL, verify it and apply pending migrations.
async fn connect_postgres(database_url: &str, config: &ServerConfig) -> PgStore {
    let pool = pomopet_db::create_pool(database_url, config.database_max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    pomopet_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    pomopet_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    PgStore::new(pool)
}

/// Build the in-memory store, loading the species catalog from `seed_file`
/// when one is configured.
async fn build_memory_store(seed_file: Option<&Path>) -> MemoryStore {
    tracing::warn!("DATABASE_URL not set, using in-memory store (state is lost on restart)");
    let store = MemoryStore::new();

    let Some(path) = seed_file else {
        return store;
    };

    let raw = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read species seed file {}: {e}", path.display()));
    let species: Vec<CreatePetSpecies> = serde_json::from_str(&raw)
        .unwrap_or_else(|e| panic!("Invalid species seed file {}: {e}", path.display()));

    for entry in &species {
        store
            .seed_species(entry)
            .await
            .unwrap_or_else(|e| panic!("Invalid species '{}': {e}", entry.name));
    }
    tracing::info!(count = species.len(), path = %path.display(), "Species catalog seeded");

    store
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
