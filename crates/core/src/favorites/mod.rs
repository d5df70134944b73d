//! Per-user favorites - catalog entries a user has saved.
//!
//! Each user has an independent list keyed by catalog ID; the same movie can
//! be a favorite of many users but only once per user.

mod sqlite;
mod types;

pub use sqlite::SqliteFavoritesStore;
pub use types::*;

use crate::external_catalog::SearchResult;

/// Trait for favorites storage.
pub trait FavoritesStore: Send + Sync {
    /// All favorites of `user`, oldest first.
    fn list(&self, user: &str) -> Result<Vec<Favorite>, FavoritesError>;

    /// One favorite of `user` by catalog ID.
    fn get(&self, user: &str, movie_id: u32) -> Result<Favorite, FavoritesError>;

    /// Save `movie` for `user`.
    ///
    /// Fails with `AlreadyExists` if the user already saved this catalog ID.
    fn add(&self, user: &str, movie: &SearchResult) -> Result<Favorite, FavoritesError>;

    /// Remove a favorite of `user`. Fails with `NotFound` if it was not saved.
    fn remove(&self, user: &str, movie_id: u32) -> Result<(), FavoritesError>;
}
