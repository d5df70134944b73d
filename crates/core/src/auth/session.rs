//! Signed session tokens.
//!
//! A token is `<payload>.<signature>`: the payload is base64url JSON
//! `{"sub": <user>, "exp": <unix seconds>}` and the signature is an
//! HMAC-SHA256 over the encoded payload, also base64url.

use std::collections::HashMap;

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use super::{AuthError, AuthRequest, Authenticator, Identity, SessionToken};

type HmacSha256 = Hmac<Sha256>;

/// Default session lifetime.
pub const DEFAULT_SESSION_TTL_HOURS: u64 = 24;

/// Longest accepted session lifetime (ten years).
pub const MAX_SESSION_TTL_HOURS: u64 = 24 * 365 * 10;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// Authenticator that issues and verifies HMAC-signed session tokens.
///
/// Tokens are read from `Authorization: Bearer <token>`.
pub struct SessionAuthenticator {
    secret: Vec<u8>,
    ttl: Duration,
}

impl SessionAuthenticator {
    pub fn new(secret: &str, ttl_hours: u64) -> Result<Self, AuthError> {
        let ttl = i64::try_from(ttl_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or_else(|| {
                AuthError::ConfigurationError(format!(
                    "session lifetime of {} hours is out of range",
                    ttl_hours
                ))
            })?;
        Self::with_ttl(secret, ttl)
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::ConfigurationError(
                "session secret cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            secret: secret.as_bytes().to_vec(),
            ttl,
        })
    }

    fn mac(&self) -> Result<HmacSha256, AuthError> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AuthError::ConfigurationError(e.to_string()))
    }

    /// Issue a token for `username` expiring after the configured lifetime.
    pub fn issue(&self, username: &str) -> Result<SessionToken, AuthError> {
        let expires_at = Utc::now().checked_add_signed(self.ttl).ok_or_else(|| {
            AuthError::ConfigurationError("session expiry is out of range".to_string())
        })?;
        let claims = Claims {
            sub: username.to_string(),
            exp: expires_at.timestamp(),
        };

        let json = serde_json::to_vec(&claims)
            .map_err(|e| AuthError::ConfigurationError(e.to_string()))?;
        let payload = URL_SAFE_NO_PAD.encode(json);

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(SessionToken {
            token: format!("{}.{}", payload, signature),
            expires_at,
        })
    }

    /// Verify a token and return the identity it carries.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let invalid = || AuthError::InvalidCredentials("Invalid session token".to_string());

        let (payload, signature) = token.split_once('.').ok_or_else(invalid)?;
        let signature = URL_SAFE_NO_PAD.decode(signature).map_err(|_| invalid())?;

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).map_err(|_| invalid())?;

        let json = URL_SAFE_NO_PAD.decode(payload).map_err(|_| invalid())?;
        let claims: Claims = serde_json::from_slice(&json).map_err(|_| invalid())?;

        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0).ok_or_else(invalid)?;
        if expires_at <= Utc::now() {
            return Err(AuthError::Expired);
        }

        let mut identity_claims = HashMap::new();
        identity_claims.insert("exp".to_string(), serde_json::json!(claims.exp));

        Ok(Identity {
            user_id: claims.sub,
            method: "session".to_string(),
            claims: identity_claims,
        })
    }
}

#[async_trait]
impl Authenticator for SessionAuthenticator {
    async fn authenticate(&self, request: &AuthRequest) -> Result<Identity, AuthError> {
        let token = request.bearer_token().ok_or(AuthError::NotAuthenticated)?;
        self.verify(token)
    }

    fn login(&self, username: &str) -> Result<SessionToken, AuthError> {
        self.issue(username)
    }

    fn method_name(&self) -> &'static str {
        "session"
    }
}
