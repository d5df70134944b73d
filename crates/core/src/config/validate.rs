use super::{types::Config, AuthMethod, ConfigError};
use crate::auth::MAX_SESSION_TTL_HOURS;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Session auth has a non-empty secret and a lifetime of at most ten years
/// - A configured TMDB section has an API key
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if matches!(config.auth.method, AuthMethod::Session) {
        let has_secret = config
            .auth
            .secret
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty());
        if !has_secret {
            return Err(ConfigError::ValidationError(
                "auth.secret is required for session auth".to_string(),
            ));
        }
        if config.auth.session_ttl_hours == 0 {
            return Err(ConfigError::ValidationError(
                "auth.session_ttl_hours cannot be 0".to_string(),
            ));
        }
        if config.auth.session_ttl_hours > MAX_SESSION_TTL_HOURS {
            return Err(ConfigError::ValidationError(format!(
                "auth.session_ttl_hours cannot exceed {}",
                MAX_SESSION_TTL_HOURS
            )));
        }
    }

    if let Some(tmdb) = &config.tmdb {
        if tmdb.api_key.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "tmdb.api_key cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
