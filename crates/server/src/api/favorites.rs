//! Favorites API handlers.
//!
//! Every route here sits behind the auth middleware; favorites are scoped to
//! the authenticated user.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use marquee_core::{parse_new_favorite, Favorite, FavoritesError};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use super::handlers::{error_response, ErrorResponse};
use super::middleware::AuthUser;
use crate::state::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Map a store error to a response. Store failures are logged, never echoed.
fn favorites_error(action: &str, e: FavoritesError) -> ApiError {
    match e {
        FavoritesError::Validation(message) => error_response(StatusCode::BAD_REQUEST, message),
        FavoritesError::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Favorite not found"),
        FavoritesError::AlreadyExists(_) => {
            error_response(StatusCode::CONFLICT, "Movie already in favorites")
        }
        FavoritesError::Database(detail) => {
            error!("Failed to {} favorite: {}", action, detail);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

fn parse_id(raw: &str) -> Result<u32, ApiError> {
    raw.parse()
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "Invalid ID"))
}

/// GET /api/v1/favorites
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Favorite>>, ApiError> {
    state
        .favorites()
        .list(&user)
        .map(Json)
        .map_err(|e| favorites_error("list", e))
}

/// GET /api/v1/favorites/{id}
pub async fn get_favorite(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Favorite>, ApiError> {
    let id = parse_id(&id)?;
    state
        .favorites()
        .get(&user, id)
        .map(Json)
        .map_err(|e| favorites_error("fetch", e))
}

/// POST /api/v1/favorites
///
/// The body is a catalog entry; all required fields must be present.
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Favorite>), ApiError> {
    let Json(body) = body.map_err(|e| error_response(StatusCode::BAD_REQUEST, e.body_text()))?;
    let movie = parse_new_favorite(body).map_err(|e| favorites_error("validate", e))?;

    let favorite = state
        .favorites()
        .add(&user, &movie)
        .map_err(|e| favorites_error("save", e))?;

    info!(user = %user, movie_id = movie.id, "Favorite added");
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// DELETE /api/v1/favorites/{id}
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    state
        .favorites()
        .remove(&user, id)
        .map_err(|e| favorites_error("delete", e))?;

    info!(user = %user, movie_id = id, "Favorite removed");
    Ok(Json(MessageResponse {
        message: format!("Favorite {} removed", id),
    }))
}
