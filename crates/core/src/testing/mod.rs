//! Testing utilities and mock implementations.
//!
//! Provides a mock remote catalog so the cache controller and the HTTP layer
//! can be exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use marquee_core::testing::{fixtures, MockExternalCatalog};
//!
//! let catalog = MockExternalCatalog::new();
//! catalog.add_movie(fixtures::movie(27205, "Inception")).await;
//! catalog.set_popular_page(fixtures::page(1, 500, 10000, &[27205])).await;
//! ```

mod mock_external_catalog;

pub use mock_external_catalog::{MockExternalCatalog, RecordedCatalogQuery};

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::NaiveDate;

    use crate::external_catalog::{SearchResult, SearchResults};

    /// Create a catalog entry with reasonable defaults.
    pub fn movie(id: u32, title: &str) -> SearchResult {
        SearchResult {
            adult: false,
            backdrop_path: format!("/backdrop-{}.jpg", id),
            id,
            original_title: title.to_string(),
            release_date: NaiveDate::from_ymd_opt(2010, 7, 15),
            poster_path: format!("/poster-{}.jpg", id),
            popularity: 42.5,
            title: title.to_string(),
            vote_average: 7.5,
            vote_count: 1200,
            genre_ids: Some(vec!["18".to_string()]),
            overview: Some(format!("A movie about {}.", title.to_lowercase())),
        }
    }

    /// Create a listing page holding one generated entry per ID.
    pub fn page(page: u32, total_pages: u32, total_results: u32, ids: &[u32]) -> SearchResults {
        SearchResults {
            page,
            results: ids
                .iter()
                .map(|&id| movie(id, &format!("Movie {}", id)))
                .collect(),
            total_pages,
            total_results,
        }
    }
}
