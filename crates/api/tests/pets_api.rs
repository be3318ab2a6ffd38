//! HTTP-level integration tests for the egg pet endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener, backed by the in-memory store.

mod common;

use axum::http::{header, StatusCode};
use common::{
    add_points, app_with_species, body_json, create_pet, empty_app, get, patch, patch_json,
    post_json,
};
use pomopet_db::PetStore;
use serde_json::json;

// ---------------------------------------------------------------------------
// Create / list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_pet_returns_201_with_representation() {
    let (app, _store) = empty_app();
    let response = post_json(app, "/api/eggpets/", json!({"nickname": "  Pip  "})).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_number());
    assert_eq!(json["nickname"], "Pip");
    assert_eq!(json["stage"], "egg");
    assert_eq!(json["is_active"], false);
    assert!(json["user"].is_null());
    assert!(json["species"].is_null());
    assert!(json["species_data"].is_null());
}

#[tokio::test]
async fn test_create_pet_with_unknown_species_is_rejected() {
    let (app, _store) = empty_app();
    let response = post_json(
        app,
        "/api/eggpets/",
        json!({"nickname": "Pip", "species": 42, "stage": "hatched"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_hatched_pet_without_species_is_rejected() {
    let (app, _store) = empty_app();
    let response = post_json(
        app,
        "/api/eggpets/",
        json!({"nickname": "Pip", "stage": "hatched"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_pet_with_unknown_stage_is_bad_request() {
    let (app, _store) = empty_app();
    let response = post_json(
        app,
        "/api/eggpets/",
        json!({"nickname": "Pip", "stage": "dragon"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_list_pets_filters_on_is_active() {
    let (app, _store) = empty_app();
    create_pet(app.clone(), json!({"nickname": "A", "is_active": true})).await;
    create_pet(app.clone(), json!({"nickname": "B"})).await;

    let all = body_json(get(app.clone(), "/api/eggpets/").await).await;
    assert_eq!(all.as_array().unwrap().len(), 2);

    let active = body_json(get(app.clone(), "/api/eggpets/?is_active=TRUE").await).await;
    let active = active.as_array().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["nickname"], "A");

    let inactive = body_json(get(app, "/api/eggpets/?is_active=nope").await).await;
    let inactive = inactive.as_array().unwrap();
    assert_eq!(inactive.len(), 1);
    assert_eq!(inactive[0]["nickname"], "B");
}

// ---------------------------------------------------------------------------
// Evolve
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_evolve_through_every_stage() {
    let (app, _store) = app_with_species(&["slime"]).await;
    let id = create_pet(app.clone(), json!({"nickname": "Pip"})).await;
    add_points(app.clone(), 5).await;

    let uri = format!("/api/eggpets/{id}/evolve/");

    let cracked = body_json(patch(app.clone(), &uri).await).await;
    assert_eq!(cracked["stage"], "cracked");
    assert!(cracked["species"].is_null());

    let hatched = body_json(patch(app.clone(), &uri).await).await;
    assert_eq!(hatched["stage"], "hatched");
    assert!(hatched["species"].is_number());
    assert_eq!(hatched["species_data"]["name"], "slime");

    let evolved = body_json(patch(app.clone(), &uri).await).await;
    assert_eq!(evolved["stage"], "evolved");

    let progress = body_json(get(app.clone(), "/api/progress/").await).await;
    assert_eq!(progress["pomodoro_points"], 0);

    let response = patch(app, &uri).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "TERMINAL_STATE");
}

#[tokio::test]
async fn test_evolve_without_points_returns_not_enough_points() {
    let (app, _store) = empty_app();
    let id = create_pet(app.clone(), json!({"nickname": "Pip"})).await;

    let response = patch(app.clone(), &format!("/api/eggpets/{id}/evolve/")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INSUFFICIENT_FUNDS");
    assert_eq!(json["error"], "Not enough points");

    let pets = body_json(get(app, "/api/eggpets/").await).await;
    assert_eq!(pets[0]["stage"], "egg");
}

#[tokio::test]
async fn test_hatched_pet_needs_three_points() {
    let (app, store) = app_with_species(&["slime"]).await;
    let species_id = store.list_species().await.unwrap()[0].id;
    let id = create_pet(
        app.clone(),
        json!({"nickname": "Bo", "species": species_id, "stage": "hatched"}),
    )
    .await;
    add_points(app.clone(), 2).await;

    let response = patch(app.clone(), &format!("/api/eggpets/{id}/evolve/")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let progress = body_json(get(app.clone(), "/api/progress/").await).await;
    assert_eq!(progress["pomodoro_points"], 2);
    let pets = body_json(get(app, "/api/eggpets/").await).await;
    assert_eq!(pets[0]["stage"], "hatched");
}

#[tokio::test]
async fn test_evolve_missing_pet_returns_404() {
    let (app, _store) = empty_app();
    let response = patch(app, "/api/eggpets/999/evolve/").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Pet with id 999 not found");
}

#[tokio::test]
async fn test_evolve_with_non_numeric_id_returns_json_400() {
    let (app, _store) = empty_app();
    let response = patch(app, "/api/eggpets/abc/evolve/").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn test_path_without_trailing_slash_returns_json_404() {
    let (app, _store) = empty_app();
    let response = get(app, "/api/eggpets").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Activate / reset / rename
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_activate_keeps_a_single_active_pet() {
    let (app, _store) = empty_app();
    let a = create_pet(app.clone(), json!({"nickname": "A"})).await;
    let b = create_pet(app.clone(), json!({"nickname": "B"})).await;

    let response = patch(app.clone(), &format!("/api/eggpets/{a}/activate/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = patch(app.clone(), &format!("/api/eggpets/{b}/activate/")).await;
    assert_eq!(body_json(response).await["is_active"], true);

    let active = body_json(get(app, "/api/eggpets/?is_active=true").await).await;
    let active = active.as_array().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["id"], b);
}

#[tokio::test]
async fn test_reset_pet_returns_to_egg() {
    let (app, store) = app_with_species(&["slime"]).await;
    let species_id = store.list_species().await.unwrap()[0].id;
    let id = create_pet(
        app.clone(),
        json!({"nickname": "Max", "species": species_id, "stage": "evolved"}),
    )
    .await;

    let response = patch(app, &format!("/api/eggpets/{id}/reset/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["stage"], "egg");
    assert!(json["species"].is_null());
    assert!(json["species_data"].is_null());
}

#[tokio::test]
async fn test_rename_trims_nickname() {
    let (app, _store) = empty_app();
    let id = create_pet(app.clone(), json!({"nickname": "Pip"})).await;

    let response = patch_json(
        app,
        &format!("/api/eggpets/{id}/rename/"),
        json!({"nickname": "  Mochi "}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["nickname"], "Mochi");
}

#[tokio::test]
async fn test_invalid_rename_leaves_nickname_unchanged() {
    let (app, _store) = empty_app();
    let id = create_pet(app.clone(), json!({"nickname": "Pip"})).await;
    let uri = format!("/api/eggpets/{id}/rename/");

    for body in [
        json!({}),
        json!({"nickname": ""}),
        json!({"nickname": "    "}),
        json!({"nickname": "x".repeat(101)}),
    ] {
        let response = patch_json(app.clone(), &uri, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let pets = body_json(get(app, "/api/eggpets/").await).await;
    assert_eq!(pets[0]["nickname"], "Pip");
}

#[tokio::test]
async fn test_rename_accepts_exactly_one_hundred_chars() {
    let (app, _store) = empty_app();
    let id = create_pet(app.clone(), json!({"nickname": "Pip"})).await;
    let name = "y".repeat(100);

    let response = patch_json(
        app,
        &format!("/api/eggpets/{id}/rename/"),
        json!({"nickname": name}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
