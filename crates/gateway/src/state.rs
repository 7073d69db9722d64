//! Application state for dependency injection.

use std::sync::Arc;

use auth_service_lib::service::{CredentialService, SessionAuthenticator};
use auth_service_lib::AuthComponents;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialService>,
    pub sessions: Arc<SessionAuthenticator>,
    pub service_name: String,
}

impl AppState {
    /// Create new app state.
    pub fn new(auth: AuthComponents, service_name: impl Into<String>) -> Self {
        Self {
            credentials: auth.credentials,
            sessions: auth.sessions,
            service_name: service_name.into(),
        }
    }
}
