//! Rating value enumeration
//!
//! Six-step rating scale attached to content revisions. Zero is a
//! legitimate selection meaning "unrated", not an absent value — absence
//! is modeled as `Option<Rating>::None` on the content item.

use crate::Error;
use serde::{Deserialize, Serialize};

/// Rating scale for content revisions
///
/// Serialized as its integer value (0–5). Out-of-range integers fail
/// deserialization with an `InvalidInput` error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Rating {
    /// No rating assigned (a valid selection, distinct from "not set")
    Unrated,
    Poor,
    NeedsImprovement,
    Acceptable,
    Good,
    Excellent,
}

impl Rating {
    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            Rating::Unrated => "Unrated",
            Rating::Poor => "Poor",
            Rating::NeedsImprovement => "Needs improvement",
            Rating::Acceptable => "Acceptable",
            Rating::Good => "Good",
            Rating::Excellent => "Excellent",
        }
    }

    /// Integer value as stored in the database
    pub fn as_i64(&self) -> i64 {
        *self as i64
    }
}

impl Default for Rating {
    fn default() -> Self {
        Rating::Unrated
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating as u8
    }
}

impl TryFrom<u8> for Rating {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::try_from(value as i64)
    }
}

impl TryFrom<i64> for Rating {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Rating::Unrated),
            1 => Ok(Rating::Poor),
            2 => Ok(Rating::NeedsImprovement),
            3 => Ok(Rating::Acceptable),
            4 => Ok(Rating::Good),
            5 => Ok(Rating::Excellent),
            other => Err(Error::InvalidInput(format!(
                "Rating must be between 0 and 5, got {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
