use async_trait::async_trait;
use thiserror::Error;

use super::types::{AuthRequest, Identity, SessionToken};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication required")]
    NotAuthenticated,

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Session expired")]
    Expired,

    #[error("Login is not supported by the '{0}' auth method")]
    LoginUnsupported(&'static str),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticate a request and return the identity
    async fn authenticate(&self, request: &AuthRequest) -> Result<Identity, AuthError>;

    /// Issue a session token for `username`.
    ///
    /// Methods without sessions reject this with `LoginUnsupported`.
    fn login(&self, _username: &str) -> Result<SessionToken, AuthError> {
        Err(AuthError::LoginUnsupported(self.method_name()))
    }

    /// Name of this authentication method
    fn method_name(&self) -> &'static str;
}
