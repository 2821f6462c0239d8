//! Rating lifecycle endpoints
//!
//! One route per lifecycle hook the hosting application drives: batch
//! load, insert, update, delete, render, and validate. Out-of-range
//! rating integers are rejected at deserialization and surface as 400s.

use axum::{
    extract::{Path, State},
    routing::{delete, post},
    Json, Router,
};
use ratings_common::content::{ContentItem, RenderedRating, ValidationOutcome};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{store, ApiResult, AppState};

/// Request payload for batch load
#[derive(Debug, Deserialize)]
pub struct LoadRequest {
    pub items: Vec<ContentItem>,
}

/// Batch load response: the same items with stored ratings attached
#[derive(Debug, Serialize)]
pub struct LoadResponse {
    pub items: Vec<ContentItem>,
}

/// Response for the insert/update hooks
///
/// `stored: false` means the item's type does not participate and no row
/// was touched.
#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub stored: bool,
}

/// Response for the delete hook
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: u64,
}

/// Response for the render hook
///
/// `rendered: null` when the item's type does not participate.
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub rendered: Option<RenderedRating>,
}

/// POST /api/ratings/load
///
/// **Request:** `{"items": [{content_id, revision_id, content_type}, …]}`
///
/// Items of participating types get their stored rating attached; all
/// others come back unchanged (absent rating means unrated).
pub async fn load_ratings(
    State(state): State<AppState>,
    Json(payload): Json<LoadRequest>,
) -> ApiResult<Json<LoadResponse>> {
    let mut items = payload.items;
    store::load(&state.db, &mut items).await?;

    debug!(count = items.len(), "Batch load completed");

    Ok(Json(LoadResponse { items }))
}

/// POST /api/ratings/insert
///
/// Insert hook for a newly created revision. The host guarantees one call
/// per revision; this endpoint performs no existence check.
pub async fn insert_rating(
    State(state): State<AppState>,
    Json(item): Json<ContentItem>,
) -> ApiResult<Json<StoreResponse>> {
    let stored = store::insert(&state.db, &item).await?;

    Ok(Json(StoreResponse { stored }))
}

/// POST /api/ratings/update
///
/// Update hook for a re-saved revision; creates the row when none exists
/// for this revision yet.
pub async fn update_rating(
    State(state): State<AppState>,
    Json(item): Json<ContentItem>,
) -> ApiResult<Json<StoreResponse>> {
    let stored = store::update(&state.db, &item).await?;

    Ok(Json(StoreResponse { stored }))
}

/// DELETE /api/content/:content_id/ratings
///
/// Delete hook for a removed content item. Unconditional — ignores the
/// participation flag so disabled types cannot leak rows.
pub async fn delete_ratings(
    State(state): State<AppState>,
    Path(content_id): Path<i64>,
) -> ApiResult<Json<DeleteResponse>> {
    let deleted = store::delete(&state.db, content_id).await?;

    Ok(Json(DeleteResponse { deleted }))
}

/// POST /api/ratings/render
///
/// Display structure for one item, or null for a non-participating type.
pub async fn render_rating(
    State(state): State<AppState>,
    Json(item): Json<ContentItem>,
) -> ApiResult<Json<RenderResponse>> {
    let rendered = store::render(&state.db, &item).await?;

    Ok(Json(RenderResponse { rendered }))
}

/// POST /api/ratings/validate
///
/// Form validation for a submitted item. A failed validation is a normal
/// 200 response carrying field errors, not a transport error.
pub async fn validate_rating(
    State(state): State<AppState>,
    Json(item): Json<ContentItem>,
) -> ApiResult<Json<ValidationOutcome>> {
    let outcome = store::validate(&state.db, &item).await?;

    Ok(Json(outcome))
}

/// Build rating lifecycle routes
pub fn rating_routes() -> Router<AppState> {
    Router::new()
        .route("/api/ratings/load", post(load_ratings))
        .route("/api/ratings/insert", post(insert_rating))
        .route("/api/ratings/update", post(update_rating))
        .route("/api/ratings/render", post(render_rating))
        .route("/api/ratings/validate", post(validate_rating))
        .route("/api/content/:content_id/ratings", delete(delete_ratings))
}
