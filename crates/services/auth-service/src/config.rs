//! Auth service configuration.

use std::env;

use common::{AppResult, SigningSecret};

/// Auth service configuration.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Token signing secret (min 32 bytes)
    pub signing_secret: SigningSecret,
    /// Keep a denylist so tokens can be revoked before expiry
    pub revocation_enabled: bool,
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails when `JWT_SECRET` (or `AUTH_SERVICE_JWT_SECRET`) is unset or too short.
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            signing_secret: SigningSecret::from_env(&["JWT_SECRET", "AUTH_SERVICE_JWT_SECRET"])?,
            revocation_enabled: env::var("TOKEN_REVOCATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        })
    }

    /// Configuration around an explicit secret, revocation enabled.
    pub fn new(signing_secret: SigningSecret) -> Self {
        Self {
            signing_secret,
            revocation_enabled: true,
        }
    }
}
