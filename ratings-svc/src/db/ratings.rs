//! Rating row operations
//!
//! One row per content revision: `{content_id, revision_id, rating}`.
//! `content_id` is stable across revisions, so a content item accumulates
//! one row per revision ever rated. This table is owned exclusively by
//! this service.

use ratings_common::{Error, Rating, Result};
use sqlx::SqlitePool;

/// One persisted rating row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingRecord {
    pub content_id: i64,
    pub revision_id: i64,
    pub rating: Rating,
}

/// Insert a rating row for a revision
///
/// No existence check: the hosting application guarantees one call per
/// newly created revision. A second call for the same revision leaves a
/// duplicate row.
pub async fn insert_rating(
    db: &SqlitePool,
    content_id: i64,
    revision_id: i64,
    rating: Rating,
) -> Result<()> {
    sqlx::query("INSERT INTO ratings (content_id, revision_id, rating) VALUES (?, ?, ?)")
        .bind(content_id)
        .bind(revision_id)
        .bind(rating.as_i64())
        .execute(db)
        .await
        .map_err(Error::Database)?;

    tracing::debug!(content_id, revision_id, rating = rating.as_i64(), "Rating inserted");

    Ok(())
}

/// Fetch the rating stored for one revision, if any
pub async fn rating_for_revision(db: &SqlitePool, revision_id: i64) -> Result<Option<Rating>> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT rating FROM ratings WHERE revision_id = ?")
        .bind(revision_id)
        .fetch_optional(db)
        .await
        .map_err(Error::Database)?;

    match row {
        Some((value,)) => Ok(Some(Rating::try_from(value)?)),
        None => Ok(None),
    }
}

/// Overwrite the rating stored for one revision
pub async fn update_rating(db: &SqlitePool, revision_id: i64, rating: Rating) -> Result<()> {
    sqlx::query("UPDATE ratings SET rating = ? WHERE revision_id = ?")
        .bind(rating.as_i64())
        .bind(revision_id)
        .execute(db)
        .await
        .map_err(Error::Database)?;

    tracing::debug!(revision_id, rating = rating.as_i64(), "Rating updated");

    Ok(())
}

/// Fetch rating rows for a set of revisions in one round trip
pub async fn ratings_for_revisions(
    db: &SqlitePool,
    revision_ids: &[i64],
) -> Result<Vec<RatingRecord>> {
    if revision_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; revision_ids.len()].join(", ");
    let sql = format!(
        "SELECT content_id, revision_id, rating FROM ratings WHERE revision_id IN ({})",
        placeholders
    );

    let mut query = sqlx::query_as::<_, (i64, i64, i64)>(&sql);
    for revision_id in revision_ids {
        query = query.bind(revision_id);
    }

    let rows = query.fetch_all(db).await.map_err(Error::Database)?;

    rows.into_iter()
        .map(|(content_id, revision_id, rating)| {
            Ok(RatingRecord {
                content_id,
                revision_id,
                rating: Rating::try_from(rating)?,
            })
        })
        .collect()
}

/// Delete every rating row belonging to a content item
///
/// Covers all revisions ever rated for this content id. Returns the number
/// of rows removed.
pub async fn delete_ratings_for_content(db: &SqlitePool, content_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM ratings WHERE content_id = ?")
        .bind(content_id)
        .execute(db)
        .await
        .map_err(Error::Database)?;

    let deleted = result.rows_affected();
    tracing::debug!(content_id, deleted, "Rating rows deleted");

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_util::setup_test_db;

    #[tokio::test]
    async fn insert_then_fetch_by_revision() {
        let pool = setup_test_db().await;

        insert_rating(&pool, 10, 101, Rating::Acceptable)
            .await
            .unwrap();

        let rating = rating_for_revision(&pool, 101).await.unwrap();
        assert_eq!(rating, Some(Rating::Acceptable));

        assert_eq!(rating_for_revision(&pool, 999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_overwrites_in_place() {
        let pool = setup_test_db().await;

        insert_rating(&pool, 10, 101, Rating::Poor).await.unwrap();
        update_rating(&pool, 101, Rating::Excellent).await.unwrap();

        assert_eq!(
            rating_for_revision(&pool, 101).await.unwrap(),
            Some(Rating::Excellent)
        );

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ratings WHERE revision_id = 101")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1, "Update must not create a second row");
    }

    #[tokio::test]
    async fn batched_fetch_returns_matching_rows() {
        let pool = setup_test_db().await;

        insert_rating(&pool, 10, 101, Rating::Acceptable)
            .await
            .unwrap();
        insert_rating(&pool, 20, 201, Rating::Good).await.unwrap();

        let mut records = ratings_for_revisions(&pool, &[101, 201, 301]).await.unwrap();
        records.sort_by_key(|r| r.revision_id);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].content_id, 10);
        assert_eq!(records[0].rating, Rating::Acceptable);
        assert_eq!(records[1].content_id, 20);
        assert_eq!(records[1].rating, Rating::Good);
    }

    #[tokio::test]
    async fn batched_fetch_empty_set_is_noop() {
        let pool = setup_test_db().await;

        let records = ratings_for_revisions(&pool, &[]).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_every_revision_of_a_content_item() {
        let pool = setup_test_db().await;

        insert_rating(&pool, 10, 101, Rating::Acceptable)
            .await
            .unwrap();
        insert_rating(&pool, 10, 102, Rating::Excellent)
            .await
            .unwrap();
        insert_rating(&pool, 20, 201, Rating::Good).await.unwrap();

        let deleted = delete_ratings_for_content(&pool, 10).await.unwrap();
        assert_eq!(deleted, 2);

        assert_eq!(rating_for_revision(&pool, 101).await.unwrap(), None);
        assert_eq!(rating_for_revision(&pool, 102).await.unwrap(), None);
        // Unrelated content untouched
        assert_eq!(
            rating_for_revision(&pool, 201).await.unwrap(),
            Some(Rating::Good)
        );
    }

    #[tokio::test]
    async fn double_insert_leaves_duplicate_rows() {
        // The schema has no UNIQUE constraint on revision_id; a violated
        // one-insert-per-revision guarantee surfaces as duplicate rows.
        let pool = setup_test_db().await;

        insert_rating(&pool, 10, 101, Rating::Poor).await.unwrap();
        insert_rating(&pool, 10, 101, Rating::Poor).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ratings WHERE revision_id = 101")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }
}
