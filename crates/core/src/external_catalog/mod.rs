//! Remote movie catalog integration.
//!
//! The [`ExternalCatalog`] trait is the gateway the rest of the crate talks
//! to; [`TmdbClient`] implements it against the TMDB v3 REST API.

mod tmdb;
mod types;

pub use tmdb::{TmdbClient, TmdbConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when interacting with the remote catalog.
#[derive(Debug, Error)]
pub enum ExternalCatalogError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Credential rejected by the catalog (401).
    #[error("Catalog rejected the credential: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Any other non-success status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

impl ExternalCatalogError {
    /// HTTP status reported by the catalog, if the failure came from one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::NotFound(_) => Some(404),
            Self::RateLimitExceeded => Some(429),
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Gateway to the remote movie catalog.
///
/// Implementations are stateless; every call is a single remote request.
#[async_trait]
pub trait ExternalCatalog: Send + Sync {
    /// Get a single movie by catalog ID.
    ///
    /// `Ok(None)` means the catalog answered successfully but with an empty
    /// body; callers decide how to represent that.
    async fn get_movie(&self, id: u32) -> Result<Option<SearchResult>, ExternalCatalogError>;

    /// Keyword search, one page at a time.
    async fn search_movies(
        &self,
        query: &str,
        page: u32,
    ) -> Result<SearchResults, ExternalCatalogError>;

    /// The "popular" listing, one page at a time.
    async fn popular_movies(&self, page: u32) -> Result<SearchResults, ExternalCatalogError>;
}
