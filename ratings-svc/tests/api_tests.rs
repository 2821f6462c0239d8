//! Integration tests for ratings-svc API endpoints
//!
//! Tests cover:
//! - Health endpoint
//! - Per-type participation configuration (default off, toggle)
//! - Lifecycle hooks: load, insert, update, delete, render, validate
//! - Payload validation (out-of-range rating values)

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method

use ratings_svc::{build_router, db, AppState};

/// Test helper: in-memory database with the production schema
///
/// Single connection so every statement sees the same `:memory:` database.
async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .expect("Should connect to in-memory database");

    db::init_tables(&pool)
        .await
        .expect("Should create tables");

    pool
}

/// Test helper: create app with test state
fn setup_app(db: SqlitePool) -> axum::Router {
    build_router(AppState::new(db))
}

/// Test helper: create request with optional JSON body
fn test_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Test helper: extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: enable rating for a content type through the API
async fn enable_type(app: &axum::Router, content_type: &str) {
    let request = test_request(
        "PUT",
        &format!("/api/types/{}/rating", content_type),
        Some(json!({"enabled": true})),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Health Endpoint
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    let request = test_request("GET", "/health", None);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "ratings-svc");
    assert!(body["version"].is_string());
}

// =============================================================================
// Type Configuration
// =============================================================================

#[tokio::test]
async fn test_type_config_defaults_to_disabled() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    let request = test_request("GET", "/api/types/article/rating", None);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["content_type"], "article");
    assert_eq!(body["enabled"], false);
}

#[tokio::test]
async fn test_type_config_toggle() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    enable_type(&app, "article").await;

    let request = test_request("GET", "/api/types/article/rating", None);
    let response = app.clone().oneshot(request).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["enabled"], true);

    // Toggle back off
    let request = test_request(
        "PUT",
        "/api/types/article/rating",
        Some(json!({"enabled": false})),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = test_request("GET", "/api/types/article/rating", None);
    let response = app.oneshot(request).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["enabled"], false);
}

// =============================================================================
// Insert + Load
// =============================================================================

#[tokio::test]
async fn test_insert_then_load_attaches_rating() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    enable_type(&app, "article").await;

    let item = json!({
        "content_id": 10,
        "revision_id": 101,
        "content_type": "article",
        "rating": 3
    });
    let response = app
        .clone()
        .oneshot(test_request("POST", "/api/ratings/insert", Some(item)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["stored"], true);

    let load = json!({
        "items": [
            {"content_id": 10, "revision_id": 101, "content_type": "article"}
        ]
    });
    let response = app
        .oneshot(test_request("POST", "/api/ratings/load", Some(load)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["items"][0]["rating"], 3);
}

#[tokio::test]
async fn test_insert_for_non_participating_type_stores_nothing() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    let item = json!({
        "content_id": 10,
        "revision_id": 101,
        "content_type": "page",
        "rating": 4
    });
    let response = app
        .clone()
        .oneshot(test_request("POST", "/api/ratings/insert", Some(item)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["stored"], false);
}

#[tokio::test]
async fn test_load_leaves_unrated_items_unannotated() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    enable_type(&app, "article").await;

    let load = json!({
        "items": [
            {"content_id": 20, "revision_id": 201, "content_type": "article"}
        ]
    });
    let response = app
        .oneshot(test_request("POST", "/api/ratings/load", Some(load)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    // Absent rating means unrated, never an error
    assert!(body["items"][0].get("rating").is_none());
}

// =============================================================================
// Update (fallback insert) + Delete
// =============================================================================

#[tokio::test]
async fn test_update_fallback_preserves_revision_history_and_delete_clears_it() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    enable_type(&app, "article").await;

    // Revision 101 rated 3
    let response = app
        .clone()
        .oneshot(test_request(
            "POST",
            "/api/ratings/insert",
            Some(json!({
                "content_id": 10, "revision_id": 101,
                "content_type": "article", "rating": 3
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Edit creates revision 102; no insert hook ran for it, so update
    // must create the row itself
    let response = app
        .clone()
        .oneshot(test_request(
            "POST",
            "/api/ratings/update",
            Some(json!({
                "content_id": 10, "revision_id": 102,
                "content_type": "article", "rating": 5
            })),
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["stored"], true);

    // Both revisions load with their own ratings
    let load = json!({
        "items": [
            {"content_id": 10, "revision_id": 102, "content_type": "article"}
        ]
    });
    let response = app
        .clone()
        .oneshot(test_request("POST", "/api/ratings/load", Some(load)))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["items"][0]["rating"], 5);

    // Content item deleted: both revision rows go
    let response = app
        .clone()
        .oneshot(test_request("DELETE", "/api/content/10/ratings", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["deleted"], 2);
}

// =============================================================================
// Render
// =============================================================================

#[tokio::test]
async fn test_render_unrated_item() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    enable_type(&app, "article").await;

    let item = json!({
        "content_id": 10, "revision_id": 101, "content_type": "article"
    });
    let response = app
        .oneshot(test_request("POST", "/api/ratings/render", Some(item)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["rendered"]["rating"], 0);
    assert_eq!(body["rendered"]["label"], "Unrated");
}

#[tokio::test]
async fn test_render_non_participating_type_is_null() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    let item = json!({
        "content_id": 10, "revision_id": 101, "content_type": "page", "rating": 4
    });
    let response = app
        .oneshot(test_request("POST", "/api/ratings/render", Some(item)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert!(body["rendered"].is_null());
}

// =============================================================================
// Validate
// =============================================================================

#[tokio::test]
async fn test_validate_missing_rating_fails() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    enable_type(&app, "article").await;

    let item = json!({
        "content_id": 10, "revision_id": 101, "content_type": "article"
    });
    let response = app
        .oneshot(test_request("POST", "/api/ratings/validate", Some(item)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["valid"], false);
    assert_eq!(body["errors"][0]["field"], "rating");
    assert_eq!(body["errors"][0]["message"], "You must rate this content.");
}

#[tokio::test]
async fn test_validate_zero_rating_is_valid() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    enable_type(&app, "article").await;

    // 0 ("Unrated") is a legitimate selection, distinct from "not set"
    let item = json!({
        "content_id": 10, "revision_id": 101, "content_type": "article", "rating": 0
    });
    let response = app
        .oneshot(test_request("POST", "/api/ratings/validate", Some(item)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["errors"], json!([]));
}

// =============================================================================
// Payload validation
// =============================================================================

#[tokio::test]
async fn test_out_of_range_rating_is_rejected() {
    let db = setup_test_db().await;
    let app = setup_app(db);

    let item = json!({
        "content_id": 10, "revision_id": 101, "content_type": "article", "rating": 9
    });
    let response = app
        .oneshot(test_request("POST", "/api/ratings/insert", Some(item)))
        .await
        .unwrap();

    // Rejected at deserialization before any store logic runs
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
