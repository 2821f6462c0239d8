//! # Ratings Common Library
//!
//! Shared code for the content rating service:
//! - Error types
//! - The `Rating` domain enum and its display labels
//! - Typed content-item and validation structures
//! - Root folder / configuration resolution

pub mod config;
pub mod content;
pub mod error;
pub mod rating;

pub use error::{Error, Result};
pub use rating::Rating;
