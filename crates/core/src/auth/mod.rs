mod none;
mod session;
mod traits;
mod types;

pub use none::*;
pub use session::*;
pub use traits::*;
pub use types::*;

use crate::config::AuthConfig;

/// Factory function to create authenticator from config
pub fn create_authenticator(config: &AuthConfig) -> Result<Box<dyn Authenticator>, AuthError> {
    use crate::config::AuthMethod;

    match config.method {
        AuthMethod::None => Ok(Box::new(NoneAuthenticator::new())),
        AuthMethod::Session => {
            let secret = config.secret.as_deref().ok_or_else(|| {
                AuthError::ConfigurationError(
                    "secret must be set when using session auth method".to_string(),
                )
            })?;
            Ok(Box::new(SessionAuthenticator::new(
                secret,
                config.session_ttl_hours,
            )?))
        }
    }
}
