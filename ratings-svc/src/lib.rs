//! ratings-svc library - revision-keyed content rating service
//!
//! Attaches an integer rating (0–5) to content items of
//! administrator-selected types, persisted per content revision. The
//! hosting content-management application drives the lifecycle operations
//! (load, insert, update, delete, render, validate) over a compact HTTP
//! API; the store logic itself is transport-free in [`store`].

use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod store;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::config_routes())
        .merge(api::rating_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
