//! Content-type configuration endpoints
//!
//! The administrator's per-type "rating enabled" toggle, the HTTP
//! rendition of the host's type-configuration settings form.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{db, ApiResult, AppState};

/// Request payload for toggling a content type
#[derive(Debug, Deserialize)]
pub struct SetEnabledRequest {
    pub enabled: bool,
}

/// Current participation state of a content type
#[derive(Debug, Serialize)]
pub struct TypeConfigResponse {
    pub content_type: String,
    pub enabled: bool,
}

/// GET /api/types/:content_type/rating
///
/// A type that was never configured reports `enabled: false`.
pub async fn get_type_config(
    State(state): State<AppState>,
    Path(content_type): Path<String>,
) -> ApiResult<Json<TypeConfigResponse>> {
    let enabled = db::settings::rating_enabled(&state.db, &content_type).await?;

    Ok(Json(TypeConfigResponse {
        content_type,
        enabled,
    }))
}

/// PUT /api/types/:content_type/rating
///
/// **Request:** `{"enabled": true}`
///
/// Last write wins; toggling a type off leaves previously stored ratings
/// in place (only content deletion removes rows).
pub async fn set_type_config(
    State(state): State<AppState>,
    Path(content_type): Path<String>,
    Json(payload): Json<SetEnabledRequest>,
) -> ApiResult<Json<TypeConfigResponse>> {
    db::settings::set_rating_enabled(&state.db, &content_type, payload.enabled).await?;

    info!(
        "Rating participation for '{}' set to {}",
        content_type, payload.enabled
    );

    Ok(Json(TypeConfigResponse {
        content_type,
        enabled: payload.enabled,
    }))
}

/// Build content-type configuration routes
pub fn config_routes() -> Router<AppState> {
    Router::new().route(
        "/api/types/:content_type/rating",
        get(get_type_config).put(set_type_config),
    )
}
