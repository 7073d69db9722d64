//! Domain-level errors.
//!
//! Rule violations on credential fields, detected before anything is stored.

use thiserror::Error;

use crate::constants::{ROLE_ADMIN, ROLE_STAFF};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field failed its shape rule. Displays as e.g. "username is required".
    #[error("{field} {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("unknown role '{0}', expected {} or {}", ROLE_ADMIN, ROLE_STAFF)]
    UnknownRole(String),

    /// Argon2 could not produce a hash
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl DomainError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
