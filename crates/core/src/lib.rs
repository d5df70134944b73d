pub mod auth;
pub mod config;
pub mod external_catalog;
pub mod favorites;
pub mod metrics;
pub mod movie_cache;
pub mod testing;

pub use auth::{
    create_authenticator, AuthError, AuthRequest, Authenticator, Identity, NoneAuthenticator,
    SessionAuthenticator, SessionToken,
};
pub use config::{
    config_path_from_env, load_config, load_config_from_str, validate_config, AuthConfig,
    AuthMethod, Config, ConfigError, DatabaseConfig, SanitizedConfig, ServerConfig,
};
pub use external_catalog::{
    ExternalCatalog, ExternalCatalogError, SearchResult, SearchResults, TmdbClient, TmdbConfig,
};
pub use favorites::{
    parse_new_favorite, Favorite, FavoritesError, FavoritesStore, SqliteFavoritesStore,
};
pub use movie_cache::{MovieCacheController, PopularListing, SearchListing};
