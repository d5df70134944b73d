//! Development mode: no credentials, every caller shares the guest favorites.

use async_trait::async_trait;
use tracing::debug;

use super::{AuthError, AuthRequest, Authenticator, Identity, GUEST_USER};

/// Authenticator for `auth.method = "none"`.
///
/// Every request resolves to [`GUEST_USER`], whether or not it carries a
/// bearer token. `POST /login` is refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoneAuthenticator;

impl NoneAuthenticator {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Authenticator for NoneAuthenticator {
    async fn authenticate(&self, request: &AuthRequest) -> Result<Identity, AuthError> {
        if request.bearer_token().is_some() {
            debug!(user = GUEST_USER, "Ignoring bearer token, auth method is none");
        }
        Ok(Identity::guest())
    }

    fn method_name(&self) -> &'static str {
        "none"
    }
}
