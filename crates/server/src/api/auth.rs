//! Session login.

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use marquee_core::{auth::GUEST_USER, AuthError};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::handlers::error_response;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// POST /api/v1/login
///
/// Issue a session token. The body is optional; the username defaults to
/// the guest user.
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<LoginResponse>, impl IntoResponse> {
    let request: LoginRequest = if body.is_empty() {
        LoginRequest::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => {
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid login request: {}", e),
                ))
            }
        }
    };
    let username = request
        .username
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| GUEST_USER.to_string());

    match state.authenticator().login(&username) {
        Ok(session) => {
            info!(user = %username, "Session issued");
            Ok(Json(LoginResponse {
                token: session.token,
                expires_at: session.expires_at,
            }))
        }
        Err(e @ AuthError::LoginUnsupported(_)) => {
            Err(error_response(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e) => {
            error!("Failed to issue session: {}", e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            ))
        }
    }
}
