//! Types for the favorites store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::external_catalog::SearchResult;

/// Fields a new favorite must carry, in wire naming.
pub const REQUIRED_FIELDS: [&str; 10] = [
    "adult",
    "backdrop_path",
    "id",
    "original_title",
    "release_date",
    "poster_path",
    "popularity",
    "title",
    "vote_average",
    "vote_count",
];

/// A saved catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Favorite {
    /// The catalog entry as it was when saved.
    #[serde(flatten)]
    pub movie: SearchResult,
    /// User who saved it.
    pub added_by: String,
    /// When it was saved.
    pub added_at: DateTime<Utc>,
}

/// Validate a request body and turn it into a catalog entry.
///
/// Every field in [`REQUIRED_FIELDS`] must be present (it may be `null` or
/// empty, matching what the catalog itself returns). All missing fields are
/// reported at once.
pub fn parse_new_favorite(body: Value) -> Result<SearchResult, FavoritesError> {
    let Some(object) = body.as_object() else {
        return Err(FavoritesError::Validation(
            "Request body must be a JSON object".to_string(),
        ));
    };

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !object.contains_key(*field))
        .collect();

    if !missing.is_empty() {
        return Err(FavoritesError::Validation(format!(
            "Missing fields: {}",
            missing.join(", ")
        )));
    }

    let movie: SearchResult = serde_json::from_value(body)
        .map_err(|e| FavoritesError::Validation(format!("Invalid favorite: {}", e)))?;

    if movie.id == 0 {
        return Err(FavoritesError::Validation(
            "id must be a positive integer".to_string(),
        ));
    }

    Ok(movie)
}

/// Errors for favorites operations.
#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Favorite not found: {0}")]
    NotFound(u32),

    #[error("Movie {0} already in favorites")]
    AlreadyExists(u32),

    #[error("Database error: {0}")]
    Database(String),
}
