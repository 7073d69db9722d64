//! Gateway configuration.

use std::env;

use auth_service_lib::config::AuthServiceConfig;
use common::{AppResult, ServiceConfig};

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Bind address and service name
    pub service: ServiceConfig,
    /// Signing secret and revocation settings
    pub auth: AuthServiceConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails when the signing secret is missing or too short; the gateway
    /// must not start without one.
    pub fn from_env() -> AppResult<Self> {
        let defaults = ServiceConfig::default();
        Ok(Self {
            service: ServiceConfig {
                service_name: "gateway".to_string(),
                host: env::var("GATEWAY_HOST").unwrap_or(defaults.host),
                port: env::var("GATEWAY_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.port),
            },
            auth: AuthServiceConfig::from_env()?,
        })
    }
}
