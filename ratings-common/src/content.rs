//! Typed content-item and validation structures
//!
//! The hosting application supplies content items with identity, revision,
//! and type already resolved. The rating travels as an explicit optional
//! field rather than a dynamically attached attribute: `None` means the
//! host sent no rating (unset), while `Some(Rating::Unrated)` is a real
//! zero selection.

use crate::Rating;
use serde::{Deserialize, Serialize};

/// One content item as presented by the hosting application
///
/// `content_id` is stable across edits; `revision_id` changes on every
/// edit. Ratings are keyed by revision so history is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Stable identifier of the logical content item
    pub content_id: i64,

    /// Identifier of the specific revision this item represents
    pub revision_id: i64,

    /// Content-type identifier (e.g. "article")
    pub content_type: String,

    /// Rating attached to this item, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl ContentItem {
    /// Create an item with no rating attached
    pub fn new(content_id: i64, revision_id: i64, content_type: impl Into<String>) -> Self {
        Self {
            content_id,
            revision_id,
            content_type: content_type.into(),
            rating: None,
        }
    }

    /// Rating to persist or display, treating absence as unrated
    pub fn rating_or_unrated(&self) -> Rating {
        self.rating.unwrap_or_default()
    }
}

/// Display structure produced for a participating item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedRating {
    pub rating: Rating,
    pub label: String,
}

impl RenderedRating {
    pub fn new(rating: Rating) -> Self {
        Self {
            rating,
            label: rating.label().to_string(),
        }
    }
}

/// A single field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Form field the error is directed at
    pub field: String,
    /// Human-readable message
    pub message: String,
}

/// Outcome of validating a submitted content item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationOutcome {
    /// Successful validation with no errors
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Failed validation with a single field error
    pub fn field_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![FieldError {
                field: field.into(),
                message: message.into(),
            }],
        }
    }
}
