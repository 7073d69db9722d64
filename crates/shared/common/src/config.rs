//! Shared configuration structures.

use serde::{Deserialize, Serialize};

use domain::MIN_JWT_SECRET_LENGTH;

use crate::error::{AppError, AppResult};

/// Base service configuration shared by all binaries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl ServiceConfig {
    /// `host:port` string suitable for binding.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "service".to_string(),
            host: "0.0.0.0".to_string(),
            port: 4000,
        }
    }
}

/// Process-wide token signing secret.
///
/// Immutable once built; shared by the signing and verification paths.
#[derive(Clone)]
pub struct SigningSecret(String);

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret([REDACTED])")
    }
}

impl SigningSecret {
    /// Wrap a secret, rejecting values shorter than [`MIN_JWT_SECRET_LENGTH`] bytes.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::configuration(format!(
                "signing secret must be at least {} bytes",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        Ok(Self(value))
    }

    /// Read the secret from the first set variable in `vars`.
    ///
    /// A missing secret is a startup error, never a silent default.
    pub fn from_env(vars: &[&str]) -> AppResult<Self> {
        let value = vars
            .iter()
            .find_map(|name| std::env::var(name).ok())
            .ok_or_else(|| {
                AppError::configuration(format!("{} must be set", vars.join(" or ")))
            })?;
        Self::new(value)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}
