//! Auth Service Library
//!
//! Credential verification, identity token issuance/validation and the
//! tenant-scope contract every data operation must honor. Data reads and
//! writes for other entities live elsewhere; this crate only answers "who is
//! calling, and may they touch this tenant".

pub mod config;
pub mod service;
pub mod store;

use std::sync::Arc;

use tracing::info;

use crate::config::AuthServiceConfig;
use crate::service::{
    CredentialService, CredentialVerifier, InMemoryRevocationList, SessionAuthenticator,
    TokenCodec,
};
use crate::store::CredentialStore;

/// Wired authentication components sharing one token codec.
#[derive(Clone)]
pub struct AuthComponents {
    pub credentials: Arc<dyn CredentialService>,
    pub sessions: Arc<SessionAuthenticator>,
}

/// Build the credential verifier and session authenticator over `store`.
pub fn build(config: &AuthServiceConfig, store: Arc<dyn CredentialStore>) -> AuthComponents {
    let codec = Arc::new(TokenCodec::new(&config.signing_secret));

    let mut sessions = SessionAuthenticator::new(codec.clone());
    if config.revocation_enabled {
        sessions = sessions.with_revocations(Arc::new(InMemoryRevocationList::new()));
    }

    info!(
        revocation = config.revocation_enabled,
        "authentication components ready"
    );

    AuthComponents {
        credentials: Arc::new(CredentialVerifier::new(store, codec)),
        sessions: Arc::new(sessions),
    }
}
