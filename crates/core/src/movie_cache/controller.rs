use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::loading::LoadingSlot;
use crate::external_catalog::{ExternalCatalog, ExternalCatalogError, SearchResult, SearchResults};
use crate::metrics::{LISTING_NAVIGATIONS, MOVIE_CACHE_LOOKUPS};

/// State of the search listing.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchListing {
    /// Last page received for the active query.
    pub results: SearchResults,
    /// Active query; empty when no search is running.
    pub query: String,
    /// Page most recently requested (set before the request completes).
    pub current_page: u32,
}

impl Default for SearchListing {
    fn default() -> Self {
        Self {
            results: SearchResults::empty(),
            query: String::new(),
            current_page: 1,
        }
    }
}

/// State of the popular listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PopularListing {
    pub results: SearchResults,
    /// Page most recently requested (set before the request completes).
    pub current_page: u32,
}

impl Default for PopularListing {
    fn default() -> Self {
        Self {
            results: SearchResults::empty(),
            current_page: 1,
        }
    }
}

/// Cache-first movie lookups and guarded page navigation over the catalog.
///
/// Every method that reaches the catalog is async and suspends only while the
/// catalog request is outstanding. Locks are never held across that await, so
/// the controller can be shared (`Arc`) between tasks on any runtime flavour.
///
/// Catalog failures propagate to the caller unchanged. A failed page request
/// leaves the previously loaded page in place.
///
/// The detail cache has no size bound or expiry; it lives as long as the
/// controller does.
pub struct MovieCacheController {
    catalog: Arc<dyn ExternalCatalog>,
    movies: RwLock<HashMap<u32, SearchResult>>,
    search: RwLock<SearchListing>,
    /// Bumped by every search and by `reset_search`, under the `search` lock.
    /// Only the newest search may store its page.
    search_generation: AtomicU64,
    popular: RwLock<PopularListing>,
    loading_more: LoadingSlot,
    loading_popular: LoadingSlot,
}

impl MovieCacheController {
    /// Create a controller with empty caches.
    pub fn new(catalog: Arc<dyn ExternalCatalog>) -> Self {
        Self {
            catalog,
            movies: RwLock::new(HashMap::new()),
            search: RwLock::new(SearchListing::default()),
            search_generation: AtomicU64::new(0),
            popular: RwLock::new(PopularListing::default()),
            loading_more: LoadingSlot::default(),
            loading_popular: LoadingSlot::default(),
        }
    }

    // =========================================================================
    // Movie details
    // =========================================================================

    /// Get a movie by ID, hitting the catalog only on the first lookup.
    ///
    /// If the catalog answers with an empty body, an empty placeholder record
    /// is cached and returned. Catalog errors are returned without touching
    /// the cache, so the next lookup retries.
    ///
    /// Concurrent lookups of the same uncached ID each reach the catalog; the
    /// last response to arrive is the one kept.
    pub async fn fetch_movie_detail(&self, id: u32) -> Result<SearchResult, ExternalCatalogError> {
        if let Some(movie) = self.movies.read().await.get(&id) {
            MOVIE_CACHE_LOOKUPS.with_label_values(&["hit"]).inc();
            debug!(id, "Movie cache hit");
            return Ok(movie.clone());
        }

        MOVIE_CACHE_LOOKUPS.with_label_values(&["miss"]).inc();
        debug!(id, "Movie cache miss, fetching from catalog");

        let movie = match self.catalog.get_movie(id).await? {
            Some(movie) => movie,
            None => {
                warn!(id, "Catalog returned an empty movie record, caching placeholder");
                SearchResult::placeholder()
            }
        };

        self.movies.write().await.insert(id, movie.clone());
        Ok(movie)
    }

    /// Cached record for `id`, without reaching the catalog.
    pub async fn cached_movie(&self, id: u32) -> Option<SearchResult> {
        self.movies.read().await.get(&id).cloned()
    }

    /// Number of cached movie records.
    pub async fn cached_movie_count(&self) -> usize {
        self.movies.read().await.len()
    }

    // =========================================================================
    // Search listing
    // =========================================================================

    /// Run a search and replace the search listing with the returned page.
    ///
    /// The query and page become visible to other callers immediately, before
    /// the response arrives. Use page 1 to start a new search.
    ///
    /// If another search starts or the listing is reset while this request is
    /// in flight, the page is returned to the caller but not stored.
    pub async fn search_catalog(
        &self,
        query: &str,
        page: u32,
    ) -> Result<SearchResults, ExternalCatalogError> {
        let generation = {
            let mut search = self.search.write().await;
            search.query = query.to_string();
            search.current_page = page;
            self.search_generation.fetch_add(1, Ordering::AcqRel) + 1
        };

        let results = self.catalog.search_movies(query, page).await?;

        let mut search = self.search.write().await;
        if self.search_generation.load(Ordering::Acquire) == generation {
            search.results = results.clone();
        } else {
            debug!(query, page, "Search superseded while in flight, page not stored");
        }
        Ok(results)
    }

    /// Move the active search to `page`.
    ///
    /// Returns `Ok(None)` without contacting the catalog when another search
    /// page is loading, when there is no active query, or when `page` is
    /// outside `[1, total_pages]` of the last loaded page.
    pub async fn go_to_search_page(
        &self,
        page: u32,
    ) -> Result<Option<SearchResults>, ExternalCatalogError> {
        if self.loading_more.is_held() {
            return Ok(reject("search", "busy", page));
        }

        let query = {
            let search = self.search.read().await;
            if search.query.is_empty() {
                return Ok(reject("search", "no_query", page));
            }
            if !search.results.contains_page(page) {
                return Ok(reject("search", "out_of_range", page));
            }
            search.query.clone()
        };

        let Some(_loading) = self.loading_more.try_acquire() else {
            return Ok(reject("search", "busy", page));
        };

        match self.search_catalog(&query, page).await {
            Ok(results) => {
                LISTING_NAVIGATIONS
                    .with_label_values(&["search", "fetched"])
                    .inc();
                Ok(Some(results))
            }
            Err(e) => {
                LISTING_NAVIGATIONS
                    .with_label_values(&["search", "failed"])
                    .inc();
                warn!(query = %query, page, error = %e, "Search page request failed");
                Err(e)
            }
        }
    }

    /// Clear the search listing back to its initial state.
    ///
    /// A search page still in flight is left to finish, but its page is
    /// dropped and it no longer blocks navigation.
    pub async fn reset_search(&self) {
        let mut search = self.search.write().await;
        *search = SearchListing::default();
        self.search_generation.fetch_add(1, Ordering::AcqRel);
        self.loading_more.clear();
    }

    /// Snapshot of the search listing.
    pub async fn search_listing(&self) -> SearchListing {
        self.search.read().await.clone()
    }

    pub async fn search_query(&self) -> String {
        self.search.read().await.query.clone()
    }

    pub async fn current_search_page(&self) -> u32 {
        self.search.read().await.current_page
    }

    /// Whether a search page navigation is in flight.
    pub fn is_loading_more(&self) -> bool {
        self.loading_more.is_held()
    }

    // =========================================================================
    // Popular listing
    // =========================================================================

    /// Fetch a page of the popular listing and replace the stored page with it.
    pub async fn fetch_popular_listing(
        &self,
        page: u32,
    ) -> Result<SearchResults, ExternalCatalogError> {
        self.popular.write().await.current_page = page;

        let results = self.catalog.popular_movies(page).await?;

        self.popular.write().await.results = results.clone();
        Ok(results)
    }

    /// Move the popular listing to `page`.
    ///
    /// Returns `Ok(None)` without contacting the catalog when another popular
    /// page is loading, when `page` is 0, or when `page` is past the last
    /// known total. The upper bound is only enforced once a total is known.
    pub async fn go_to_popular_page(
        &self,
        page: u32,
    ) -> Result<Option<SearchResults>, ExternalCatalogError> {
        if self.loading_popular.is_held() {
            return Ok(reject("popular", "busy", page));
        }

        {
            let popular = self.popular.read().await;
            let total_pages = popular.results.total_pages;
            if page < 1 || (total_pages > 0 && page > total_pages) {
                return Ok(reject("popular", "out_of_range", page));
            }
        }

        let Some(_loading) = self.loading_popular.try_acquire() else {
            return Ok(reject("popular", "busy", page));
        };

        match self.fetch_popular_listing(page).await {
            Ok(results) => {
                LISTING_NAVIGATIONS
                    .with_label_values(&["popular", "fetched"])
                    .inc();
                Ok(Some(results))
            }
            Err(e) => {
                LISTING_NAVIGATIONS
                    .with_label_values(&["popular", "failed"])
                    .inc();
                warn!(page, error = %e, "Popular page request failed");
                Err(e)
            }
        }
    }

    /// Snapshot of the popular listing.
    pub async fn popular_listing(&self) -> PopularListing {
        self.popular.read().await.clone()
    }

    pub async fn current_popular_page(&self) -> u32 {
        self.popular.read().await.current_page
    }

    /// Whether a popular page navigation is in flight.
    pub fn is_loading_popular(&self) -> bool {
        self.loading_popular.is_held()
    }
}

fn reject(listing: &'static str, outcome: &'static str, page: u32) -> Option<SearchResults> {
    LISTING_NAVIGATIONS
        .with_label_values(&[listing, outcome])
        .inc();
    debug!(listing, outcome, page, "Page navigation rejected");
    None
}
