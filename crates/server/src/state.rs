use std::sync::Arc;

use marquee_core::{
    Authenticator, Config, ExternalCatalog, FavoritesStore, MovieCacheController,
    SanitizedConfig,
};

/// Shared application state
pub struct AppState {
    config: Config,
    authenticator: Arc<dyn Authenticator>,
    favorites: Arc<dyn FavoritesStore>,
    /// Remote catalog, absent when `[tmdb]` is not configured.
    catalog: Option<Arc<dyn ExternalCatalog>>,
    /// Process-wide detail cache in front of `catalog`. Entries, including
    /// placeholders for ids the catalog answered empty, are kept until restart.
    movie_cache: Option<Arc<MovieCacheController>>,
}

impl AppState {
    pub fn new(
        config: Config,
        authenticator: Arc<dyn Authenticator>,
        favorites: Arc<dyn FavoritesStore>,
        catalog: Option<Arc<dyn ExternalCatalog>>,
    ) -> Self {
        let movie_cache = catalog
            .as_ref()
            .map(|catalog| Arc::new(MovieCacheController::new(Arc::clone(catalog))));

        Self {
            config,
            authenticator,
            favorites,
            catalog,
            movie_cache,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    pub fn favorites(&self) -> &dyn FavoritesStore {
        self.favorites.as_ref()
    }

    pub fn catalog(&self) -> Option<&Arc<dyn ExternalCatalog>> {
        self.catalog.as_ref()
    }

    pub fn movie_cache(&self) -> Option<&Arc<MovieCacheController>> {
        self.movie_cache.as_ref()
    }
}
