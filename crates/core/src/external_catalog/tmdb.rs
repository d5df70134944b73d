//! TMDB (The Movie Database) API client.
//!
//! TMDB accepts either a v3 API key (query parameter) or a v4 read access
//! token (bearer header). Both are accepted in `api_key`; a token is
//! recognised by its JWT shape.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{SearchResult, SearchResults};
use super::{ExternalCatalog, ExternalCatalogError};
use crate::metrics::{CATALOG_REQUESTS, CATALOG_REQUEST_DURATION};

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_LANGUAGE: &str = "en-US";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// TMDB API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API key or read access token (required).
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Response language (default: en-US).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// TMDB API client.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    credential: Credential,
    language: String,
}

#[derive(Debug, PartialEq)]
enum Credential {
    ApiKey(String),
    Bearer(String),
}

impl Credential {
    fn from_key(key: String) -> Self {
        // v4 read tokens are JWTs: three dot-separated segments
        if key.split('.').count() == 3 {
            Self::Bearer(key)
        } else {
            Self::ApiKey(key)
        }
    }
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, ExternalCatalogError> {
        if config.api_key.trim().is_empty() {
            return Err(ExternalCatalogError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let client = Client::builder().timeout(timeout).build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            base_url,
            credential: Credential::from_key(config.api_key),
            language: config
                .language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("language", self.language.as_str())]);

        match &self.credential {
            Credential::ApiKey(key) => request.query(&[("api_key", key.as_str())]),
            Credential::Bearer(token) => request.bearer_auth(token),
        }
    }

    async fn send(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
        not_found: impl FnOnce() -> String,
    ) -> Result<Response, ExternalCatalogError> {
        let start = Instant::now();
        let result = request.send().await;
        CATALOG_REQUEST_DURATION
            .with_label_values(&[endpoint])
            .observe(start.elapsed().as_secs_f64());

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                CATALOG_REQUESTS
                    .with_label_values(&[endpoint, "transport_error"])
                    .inc();
                return Err(e.into());
            }
        };

        let status = response.status();
        CATALOG_REQUESTS
            .with_label_values(&[endpoint, status.as_str()])
            .inc();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = status_message(&body).unwrap_or(body);

        Err(match status {
            StatusCode::UNAUTHORIZED => ExternalCatalogError::Unauthorized(message),
            StatusCode::NOT_FOUND => ExternalCatalogError::NotFound(not_found()),
            StatusCode::TOO_MANY_REQUESTS => ExternalCatalogError::RateLimitExceeded,
            _ => ExternalCatalogError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }

    async fn fetch_page(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<SearchResults, ExternalCatalogError> {
        let response = self
            .send(endpoint, request, || format!("{} listing", endpoint))
            .await?;

        response.json().await.map_err(|e| {
            ExternalCatalogError::ParseError(format!("Failed to parse {} response: {}", endpoint, e))
        })
    }
}

#[async_trait]
impl ExternalCatalog for TmdbClient {
    async fn get_movie(&self, id: u32) -> Result<Option<SearchResult>, ExternalCatalogError> {
        debug!("TMDB get movie: id={}", id);

        let request = self.get(&format!("/movie/{}", id));
        let response = self
            .send("movie", request, || format!("Movie ID {}", id))
            .await?;

        let body = response.text().await?;
        parse_movie_details(&body)
    }

    async fn search_movies(
        &self,
        query: &str,
        page: u32,
    ) -> Result<SearchResults, ExternalCatalogError> {
        debug!("TMDB movie search: query='{}', page={}", query, page);

        let request = self
            .get("/search/movie")
            .query(&[("query", query.to_string()), ("page", page.to_string())]);

        self.fetch_page("search", request).await
    }

    async fn popular_movies(&self, page: u32) -> Result<SearchResults, ExternalCatalogError> {
        debug!("TMDB popular movies: page={}", page);

        let request = self
            .get("/movie/popular")
            .query(&[("page", page.to_string())]);

        self.fetch_page("popular", request).await
    }
}

// ============================================================================
// TMDB API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TmdbError {
    status_message: Option<String>,
}

/// Detail responses carry full genre objects instead of `genre_ids`.
#[derive(Debug, Deserialize)]
struct TmdbMovieDetails {
    #[serde(flatten)]
    movie: SearchResult,
    #[serde(default)]
    genres: Vec<TmdbGenre>,
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    id: u32,
}

impl From<TmdbMovieDetails> for SearchResult {
    fn from(d: TmdbMovieDetails) -> Self {
        let mut movie = d.movie;
        if movie.genre_ids.is_none() && !d.genres.is_empty() {
            movie.genre_ids = Some(d.genres.iter().map(|g| g.id.to_string()).collect());
        }
        movie
    }
}

fn status_message(body: &str) -> Option<String> {
    serde_json::from_str::<TmdbError>(body)
        .ok()
        .and_then(|e| e.status_message)
}

/// An empty or `null` body is a successful response without a record.
fn parse_movie_details(body: &str) -> Result<Option<SearchResult>, ExternalCatalogError> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    let details: Option<TmdbMovieDetails> = serde_json::from_str(body).map_err(|e| {
        ExternalCatalogError::ParseError(format!("Failed to parse movie response: {}", e))
    })?;

    Ok(details.map(SearchResult::from))
}
