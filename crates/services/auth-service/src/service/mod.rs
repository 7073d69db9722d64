//! Authentication and tenant authorization.

mod authorizer;
mod credential_service;
mod revocation;
mod session;
mod token;

pub use authorizer::{authorize, authorize_admin, require_authenticated};
pub use credential_service::{
    AuthPayload, CredentialService, CredentialUpdate, CredentialVerifier, NewCredential,
};
pub use revocation::{InMemoryRevocationList, RevocationList};
pub use session::{bearer_token, Identity, IdentityContext, SessionAuthenticator};
pub use token::{Claims, IssuedToken, TokenCodec, TokenRejection};
