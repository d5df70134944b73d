//! Mock remote catalog for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, Semaphore};

use crate::external_catalog::{ExternalCatalog, ExternalCatalogError, SearchResult, SearchResults};

/// A recorded catalog query for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCatalogQuery {
    GetMovie { id: u32 },
    SearchMovies { query: String, page: u32 },
    PopularMovies { page: u32 },
}

/// Mock implementation of the ExternalCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable movies and listing pages
/// - Track queries for assertions
/// - Simulate failures
/// - Hold responses in flight until released
///
/// Queries are recorded as soon as they arrive, before any held response or
/// injected error, so `query_count` counts every request that reached the
/// catalog.
#[derive(Debug)]
pub struct MockExternalCatalog {
    /// Movies by ID. `None` simulates an empty success body.
    movies: Arc<RwLock<HashMap<u32, Option<SearchResult>>>>,
    /// Search pages by (query, page).
    search_pages: Arc<RwLock<HashMap<(String, u32), SearchResults>>>,
    /// Popular pages by page number.
    popular_pages: Arc<RwLock<HashMap<u32, SearchResults>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<RecordedCatalogQuery>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<ExternalCatalogError>>>,
    /// If set, every response waits for a permit.
    gate: Arc<RwLock<Option<Arc<Semaphore>>>>,
}

impl Default for MockExternalCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockExternalCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self {
            movies: Arc::new(RwLock::new(HashMap::new())),
            search_pages: Arc::new(RwLock::new(HashMap::new())),
            popular_pages: Arc::new(RwLock::new(HashMap::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            gate: Arc::new(RwLock::new(None)),
        }
    }

    // =========================================================================
    // Content Configuration
    // =========================================================================

    /// Add a movie returned by `get_movie`.
    pub async fn add_movie(&self, movie: SearchResult) {
        self.movies.write().await.insert(movie.id, Some(movie));
    }

    /// Make `get_movie(id)` succeed with an empty body.
    pub async fn add_empty_movie(&self, id: u32) {
        self.movies.write().await.insert(id, None);
    }

    /// Set the page returned for `query` at `results.page`.
    pub async fn set_search_page(&self, query: &str, results: SearchResults) {
        self.search_pages
            .write()
            .await
            .insert((query.to_string(), results.page), results);
    }

    /// Set the popular page returned at `results.page`.
    pub async fn set_popular_page(&self, results: SearchResults) {
        self.popular_pages
            .write()
            .await
            .insert(results.page, results);
    }

    // =========================================================================
    // Query Recording
    // =========================================================================

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedCatalogQuery> {
        self.queries.read().await.clone()
    }

    /// Clear recorded queries.
    pub async fn clear_recorded(&self) {
        self.queries.write().await.clear();
    }

    /// Get the number of queries performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: ExternalCatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }

    // =========================================================================
    // In-flight Control
    // =========================================================================

    /// Hold every subsequent response until released.
    pub async fn hold_responses(&self) {
        *self.gate.write().await = Some(Arc::new(Semaphore::new(0)));
    }

    /// Let `count` held responses through.
    pub async fn release_responses(&self, count: usize) {
        if let Some(gate) = self.gate.read().await.as_ref() {
            gate.add_permits(count);
        }
    }

    /// Stop holding responses. Requests already waiting stay held until released.
    pub async fn stop_holding(&self) {
        *self.gate.write().await = None;
    }

    /// Record the query, wait for the gate, then take any injected error.
    async fn begin(&self, query: RecordedCatalogQuery) -> Result<(), ExternalCatalogError> {
        self.queries.write().await.push(query);

        let gate = self.gate.read().await.clone();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire_owned().await {
                permit.forget();
            }
        }

        match self.next_error.write().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ExternalCatalog for MockExternalCatalog {
    async fn get_movie(&self, id: u32) -> Result<Option<SearchResult>, ExternalCatalogError> {
        self.begin(RecordedCatalogQuery::GetMovie { id }).await?;

        self.movies
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| ExternalCatalogError::NotFound(format!("Movie ID {}", id)))
    }

    async fn search_movies(
        &self,
        query: &str,
        page: u32,
    ) -> Result<SearchResults, ExternalCatalogError> {
        self.begin(RecordedCatalogQuery::SearchMovies {
            query: query.to_string(),
            page,
        })
        .await?;

        Ok(self
            .search_pages
            .read()
            .await
            .get(&(query.to_string(), page))
            .cloned()
            .unwrap_or_else(|| SearchResults {
                page,
                ..SearchResults::empty()
            }))
    }

    async fn popular_movies(&self, page: u32) -> Result<SearchResults, ExternalCatalogError> {
        self.begin(RecordedCatalogQuery::PopularMovies { page }).await?;

        Ok(self
            .popular_pages
            .read()
            .await
            .get(&page)
            .cloned()
            .unwrap_or_else(|| SearchResults {
                page,
                ..SearchResults::empty()
            }))
    }
}
