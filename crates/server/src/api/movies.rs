//! Catalog proxy handlers.
//!
//! Listing pages are forwarded to the remote catalog; single-movie lookups go
//! through the shared detail cache.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use marquee_core::{ExternalCatalogError, SearchResult, SearchResults};
use serde::Deserialize;
use tracing::warn;

use super::handlers::{error_response, ErrorResponse};
use crate::state::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

#[derive(Debug, Deserialize)]
pub struct PopularParams {
    #[serde(default = "first_page")]
    pub page: u32,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

fn not_configured() -> (StatusCode, Json<ErrorResponse>) {
    error_response(
        StatusCode::SERVICE_UNAVAILABLE,
        "Movie catalog not configured",
    )
}

/// Map a catalog failure to a proxy response.
///
/// Upstream 404 stays 404; every other upstream failure is a bad gateway.
fn catalog_error(endpoint: &str, e: ExternalCatalogError) -> (StatusCode, Json<ErrorResponse>) {
    warn!(endpoint, status = ?e.upstream_status(), "Catalog request failed: {}", e);

    match e {
        ExternalCatalogError::NotFound(message) => error_response(StatusCode::NOT_FOUND, message),
        ExternalCatalogError::NotConfigured(_) => not_configured(),
        ExternalCatalogError::Unauthorized(message)
        | ExternalCatalogError::ApiError { message, .. } => {
            error_response(StatusCode::BAD_GATEWAY, message)
        }
        _ => error_response(StatusCode::BAD_GATEWAY, "Failed to fetch movie data"),
    }
}

fn check_page(page: u32) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    if page == 0 {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "page must be at least 1",
        ));
    }
    Ok(())
}

/// GET /api/v1/movies/popular?page=
pub async fn popular(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PopularParams>,
) -> ApiResult<SearchResults> {
    check_page(params.page)?;
    let catalog = state.catalog().ok_or_else(not_configured)?;

    catalog
        .popular_movies(params.page)
        .await
        .map(Json)
        .map_err(|e| catalog_error("popular", e))
}

/// GET /api/v1/movies/search?query=&page=
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<SearchResults> {
    check_page(params.page)?;
    let query = params.query.trim();
    if query.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "query is required"));
    }
    let catalog = state.catalog().ok_or_else(not_configured)?;

    catalog
        .search_movies(query, params.page)
        .await
        .map(Json)
        .map_err(|e| catalog_error("search", e))
}

/// GET /api/v1/movies/{id}
///
/// An empty upstream answer is cached as a placeholder and reported as 404.
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<SearchResult> {
    let id: u32 = id
        .parse()
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "Invalid ID"))?;
    let cache = state.movie_cache().ok_or_else(not_configured)?;

    let movie = cache
        .fetch_movie_detail(id)
        .await
        .map_err(|e| catalog_error("movie", e))?;

    if movie.is_placeholder() {
        return Err(error_response(
            StatusCode::NOT_FOUND,
            format!("Movie {} not found", id),
        ));
    }

    Ok(Json(movie))
}
