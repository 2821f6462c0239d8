//! Rating store lifecycle operations
//!
//! The hosting application drives these at content load, insert, update,
//! and delete time, plus render and validate during display and form
//! submission. Participation is decided per content type from the settings
//! table; every operation takes the pool explicitly and keeps no state of
//! its own.

use crate::db;
use ratings_common::content::{ContentItem, RenderedRating, ValidationOutcome};
use ratings_common::Result;
use sqlx::SqlitePool;
use std::collections::HashSet;

/// Validation message for a participating type submitted without a rating
pub const RATING_REQUIRED_MESSAGE: &str = "You must rate this content.";

/// Form field validation errors are directed at
pub const RATING_FIELD: &str = "rating";

/// Whether a content type participates in rating
///
/// Defaults to false when the administrator never configured the type.
pub async fn is_participating(db: &SqlitePool, content_type: &str) -> Result<bool> {
    db::settings::rating_enabled(db, content_type).await
}

/// Attach stored ratings to a batch of loaded content items
///
/// Filters the batch to participating types first; when none participate
/// (or no revisions remain) the storage query is skipped entirely. Found
/// records are matched back to items by `content_id`, since the in-memory
/// item represents the current revision. Items with no stored record are
/// left untouched; absent means unrated, never an error.
pub async fn load(db: &SqlitePool, items: &mut [ContentItem]) -> Result<()> {
    let types_in_batch: Vec<String> = items
        .iter()
        .map(|item| item.content_type.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let participating = db::settings::participating_types(db, &types_in_batch).await?;
    if participating.is_empty() {
        return Ok(());
    }

    let revision_ids: Vec<i64> = items
        .iter()
        .filter(|item| participating.contains(&item.content_type))
        .map(|item| item.revision_id)
        .collect();
    if revision_ids.is_empty() {
        return Ok(());
    }

    let records = db::ratings::ratings_for_revisions(db, &revision_ids).await?;

    for record in records {
        for item in items
            .iter_mut()
            .filter(|item| item.content_id == record.content_id)
        {
            item.rating = Some(record.rating);
        }
    }

    Ok(())
}

/// Store the rating of a newly created revision
///
/// No-op for non-participating types. Returns true when a row was written.
pub async fn insert(db: &SqlitePool, item: &ContentItem) -> Result<bool> {
    if !is_participating(db, &item.content_type).await? {
        return Ok(false);
    }

    db::ratings::insert_rating(db, item.content_id, item.revision_id, item.rating_or_unrated())
        .await?;

    Ok(true)
}

/// Store the rating of a re-saved revision
///
/// Probe-then-branch: overwrite the row for this exact revision if one
/// exists, otherwise fall back to insert — the host does not guarantee an
/// Insert call preceded this one (e.g. the type was enabled after the
/// revision existed). The two statements are not atomic; concurrent
/// updates of the same revision are last-writer-wins.
pub async fn update(db: &SqlitePool, item: &ContentItem) -> Result<bool> {
    if !is_participating(db, &item.content_type).await? {
        return Ok(false);
    }

    match db::ratings::rating_for_revision(db, item.revision_id).await? {
        Some(_) => {
            db::ratings::update_rating(db, item.revision_id, item.rating_or_unrated()).await?;
        }
        None => {
            db::ratings::insert_rating(
                db,
                item.content_id,
                item.revision_id,
                item.rating_or_unrated(),
            )
            .await?;
        }
    }

    Ok(true)
}

/// Remove every stored rating of a deleted content item
///
/// Unconditional: the participation flag is NOT consulted, because a type
/// may have been disabled after records were created and cleanup must not
/// leave orphaned rows. Returns the number of rows removed.
pub async fn delete(db: &SqlitePool, content_id: i64) -> Result<u64> {
    db::ratings::delete_ratings_for_content(db, content_id).await
}

/// Produce the display structure for a content item
///
/// `None` for non-participating types (no render output at all). An item
/// with no rating attached renders as 0/"Unrated".
pub async fn render(db: &SqlitePool, item: &ContentItem) -> Result<Option<RenderedRating>> {
    if !is_participating(db, &item.content_type).await? {
        return Ok(None);
    }

    Ok(Some(RenderedRating::new(item.rating_or_unrated())))
}

/// Validate a submitted content item
///
/// Fails only when the type participates and the rating field is wholly
/// absent from the submission. A submitted `Rating::Unrated` (0) is a
/// legitimate selection and passes.
pub async fn validate(db: &SqlitePool, item: &ContentItem) -> Result<ValidationOutcome> {
    if is_participating(db, &item.content_type).await? && item.rating.is_none() {
        return Ok(ValidationOutcome::field_error(
            RATING_FIELD,
            RATING_REQUIRED_MESSAGE,
        ));
    }

    Ok(ValidationOutcome::ok())
}
