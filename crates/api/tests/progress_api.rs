//! HTTP-level integration tests for progress tracking and the full reset.

mod common;

use axum::http::StatusCode;
use common::{add_points, body_json, create_pet, empty_app, get, patch_json, post_json};
use serde_json::json;

#[tokio::test]
async fn test_progress_is_created_on_first_read() {
    let (app, _store) = empty_app();
    let response = get(app.clone(), "/api/progress/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    assert_eq!(first["pomodoro_points"], 0);
    assert_eq!(first["pomodoros_completed"], 0);
    assert!(first["user"].is_null());

    let second = body_json(get(app, "/api/progress/").await).await;
    assert_eq!(second["id"], first["id"]);
}

#[tokio::test]
async fn test_record_progress_accumulates() {
    let (app, _store) = empty_app();
    for _ in 0..3 {
        let response = patch_json(
            app.clone(),
            "/api/progress/",
            json!({"add_points": 1, "add_sessions": 1}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let json = body_json(get(app, "/api/progress/").await).await;
    assert_eq!(json["pomodoro_points"], 3);
    assert_eq!(json["pomodoros_completed"], 3);
}

#[tokio::test]
async fn test_record_progress_accepts_numeric_strings_and_omitted_fields() {
    let (app, _store) = empty_app();
    let response = patch_json(app, "/api/progress/", json!({"add_points": "4"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["pomodoro_points"], 4);
    assert_eq!(json["pomodoros_completed"], 0);
}

#[tokio::test]
async fn test_record_progress_rejects_non_integers() {
    let (app, _store) = empty_app();
    let response = patch_json(
        app.clone(),
        "/api/progress/",
        json!({"add_points": "lots", "add_sessions": 1}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let json = body_json(get(app, "/api/progress/").await).await;
    assert_eq!(json["pomodoros_completed"], 0);
}

#[tokio::test]
async fn test_record_progress_rejects_non_object_body() {
    let (app, _store) = empty_app();
    let response = patch_json(app, "/api/progress/", json!([1, 2])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_full_reset_clears_pets_and_progress() {
    let (app, _store) = empty_app();
    create_pet(app.clone(), json!({"nickname": "A"})).await;
    create_pet(app.clone(), json!({"nickname": "B"})).await;
    add_points(app.clone(), 6).await;

    let response = post_json(app.clone(), "/api/reset/", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "System reset successful."
    );

    let pets = body_json(get(app.clone(), "/api/eggpets/").await).await;
    assert!(pets.as_array().unwrap().is_empty());
    let progress = body_json(get(app, "/api/progress/").await).await;
    assert_eq!(progress["pomodoro_points"], 0);
    assert_eq!(progress["pomodoros_completed"], 0);
}

#[tokio::test]
async fn test_full_reset_on_empty_state_succeeds() {
    let (app, _store) = empty_app();
    let response = post_json(app, "/api/reset/", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
}
