//! Settings database operations
//!
//! Per-type rating participation flags stored in the key-value settings
//! table under `rating_enabled.<content_type>`. An absent key means the
//! type does not participate.

use ratings_common::{Error, Result};
use sqlx::SqlitePool;
use std::collections::HashSet;

const RATING_ENABLED_PREFIX: &str = "rating_enabled.";

fn rating_enabled_key(content_type: &str) -> String {
    format!("{}{}", RATING_ENABLED_PREFIX, content_type)
}

/// Whether the rating feature is enabled for a content type
///
/// **Returns:** false when the flag was never set (default: not participating)
pub async fn rating_enabled(db: &SqlitePool, content_type: &str) -> Result<bool> {
    get_setting::<bool>(db, &rating_enabled_key(content_type))
        .await
        .map(|opt| opt.unwrap_or(false))
}

/// Enable or disable the rating feature for a content type
///
/// Last write wins; no history is kept.
pub async fn set_rating_enabled(db: &SqlitePool, content_type: &str, enabled: bool) -> Result<()> {
    set_setting(db, &rating_enabled_key(content_type), enabled).await
}

/// Filter a set of content types down to the participating ones
///
/// One batched query over the settings keys; types with no flag stored are
/// treated as not participating.
pub async fn participating_types(
    db: &SqlitePool,
    content_types: &[String],
) -> Result<HashSet<String>> {
    if content_types.is_empty() {
        return Ok(HashSet::new());
    }

    let placeholders = vec!["?"; content_types.len()].join(", ");
    let sql = format!(
        "SELECT key FROM settings WHERE key IN ({}) AND value = 'true'",
        placeholders
    );

    let mut query = sqlx::query_scalar::<_, String>(&sql);
    for content_type in content_types {
        query = query.bind(rating_enabled_key(content_type));
    }

    let keys = query.fetch_all(db).await.map_err(Error::Database)?;

    Ok(keys
        .into_iter()
        .filter_map(|key| {
            key.strip_prefix(RATING_ENABLED_PREFIX)
                .map(|t| t.to_string())
        })
        .collect())
}

/// Generic setting getter (internal)
async fn get_setting<T>(db: &SqlitePool, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(db)
        .await
        .map_err(Error::Database)?;

    match row {
        Some((value,)) => {
            let parsed = value
                .parse::<T>()
                .map_err(|e| Error::Config(format!("Parse setting failed: {}", e)))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

/// Generic setting setter (internal)
async fn set_setting<T>(db: &SqlitePool, key: &str, value: T) -> Result<()>
where
    T: std::fmt::Display,
{
    sqlx::query(
        "INSERT INTO settings (key, value) VALUES (?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value.to_string())
    .execute(db)
    .await
    .map_err(Error::Database)?;

    Ok(())
}
