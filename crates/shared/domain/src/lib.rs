//! Domain layer - Credential records, tenants and password handling.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Both the auth service and the gateway build on these types.

pub mod constants;
pub mod credential;
pub mod error;
pub mod password;
pub mod tenant;

pub use constants::*;
pub use credential::{validate_username, Credential, CredentialSummary, Role};
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use tenant::TenantId;
