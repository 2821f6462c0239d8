//! Database access for ratings-svc
//!
//! SQLite-backed storage: a key-value `settings` table holding per-type
//! participation flags, and the `ratings` table owned exclusively by this
//! service.

pub mod ratings;
pub mod settings;

use anyhow::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize database connection pool
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Initialize tables if they don't exist
///
/// `ratings.revision_id` intentionally carries no UNIQUE constraint: the
/// hosting application guarantees Insert is called once per revision, and
/// a violated guarantee surfaces as a duplicate row rather than a failed
/// statement.
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ratings (
            content_id INTEGER NOT NULL,
            revision_id INTEGER NOT NULL,
            rating INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_ratings_revision ON ratings (revision_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_ratings_content ON ratings (content_id)")
        .execute(pool)
        .await?;

    tracing::info!("Database tables initialized (settings, ratings)");

    Ok(())
}
