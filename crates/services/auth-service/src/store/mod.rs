//! Credential storage collaborator.

mod credential_store;
mod memory;

pub use credential_store::CredentialStore;
pub use memory::InMemoryCredentialStore;

#[cfg(any(test, feature = "test-utils"))]
pub use credential_store::MockCredentialStore;
