#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use pomopet_api::auth::jwt::{generate_access_token, JwtConfig};
use pomopet_api::config::ServerConfig;
use pomopet_api::router::build_app_router;
use pomopet_api::state::AppState;
use pomopet_db::models::species::CreatePetSpecies;
use pomopet_db::MemoryStore;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults and token auth enabled.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        database_max_connections: 1,
        species_seed_file: None,
        jwt: Some(test_jwt_config()),
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_JWT_SECRET.to_string(),
        access_token_expiry_mins: 60,
    }
}

/// A valid bearer token for `user_id`.
pub fn token_for(user_id: i64) -> String {
    generate_access_token(user_id, &test_jwt_config()).unwrap()
}

/// Build the full application router over `store`, through the same
/// middleware stack production uses.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A fresh app over an empty store, plus the store for direct seeding.
pub fn empty_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (build_test_app(store.clone()), store)
}

/// A fresh app whose catalog holds the given species names.
pub async fn app_with_species(names: &[&str]) -> (Router, Arc<MemoryStore>) {
    let (app, store) = empty_app();
    for name in names {
        store
            .seed_species(&CreatePetSpecies {
                name: name.to_string(),
                image: format!("images/{name}.png"),
                evolved_image: Some(format!("images/{name}_evolved.png")),
            })
            .await
            .unwrap();
    }
    (app, store)
}

/// Send a request, optionally with a JSON body and a bearer token.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, uri, Some(body), None).await
}

/// PATCH with no body, as used by the pet action routes.
pub async fn patch(app: Router, uri: &str) -> Response {
    send(app, Method::PATCH, uri, None, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a pet through the API and return its id.
pub async fn create_pet(app: Router, body: serde_json::Value) -> i64 {
    let response = post_json(app, "/api/eggpets/", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Add points (and as many sessions) through the API.
pub async fn add_points(app: Router, points: i64) {
    let response = patch_json(
        app,
        "/api/progress/",
        serde_json::json!({"add_points": points, "add_sessions": points}),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
}
