//! Credential record (one staff account) and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{MAX_USERNAME_LENGTH, ROLE_ADMIN, ROLE_STAFF};
use crate::error::{DomainError, DomainResult};
use crate::password::Password;
use crate::tenant::TenantId;

/// Closed set of account roles.
///
/// Parsing is case-insensitive; the canonical form is `Admin` / `Staff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Admin,
    Staff,
}

impl Role {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Staff => ROLE_STAFF,
        }
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(ROLE_ADMIN) {
            Ok(Role::Admin)
        } else if s.eq_ignore_ascii_case(ROLE_STAFF) {
            Ok(Role::Staff)
        } else {
            Err(DomainError::UnknownRole(s.to_string()))
        }
    }
}

impl TryFrom<String> for Role {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check username shape: non-empty, bounded, no surrounding whitespace.
pub fn validate_username(username: &str) -> DomainResult<()> {
    if username.is_empty() {
        return Err(DomainError::invalid("username", "is required"));
    }
    if username.trim() != username {
        return Err(DomainError::invalid(
            "username",
            "must not start or end with whitespace",
        ));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(DomainError::invalid(
            "username",
            format!("must be at most {} characters", MAX_USERNAME_LENGTH),
        ));
    }
    Ok(())
}

/// Stored staff account.
///
/// Usernames are unique across all tenants.
#[derive(Debug, Clone)]
pub struct Credential {
    pub id: Uuid,
    pub username: String,
    pub password: Password,
    pub tenant: TenantId,
    pub role: Role,
    /// Optional display asset (avatar) reference
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// Create a new record around an already hashed password.
    pub fn new(username: String, password: Password, tenant: TenantId, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            password,
            tenant,
            role,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the stored hash.
    pub fn set_password(&mut self, password: Password) {
        self.password = password;
        self.updated_at = Utc::now();
    }

    /// Rename the account.
    pub fn rename(&mut self, username: String) {
        self.username = username;
        self.updated_at = Utc::now();
    }
}

/// Externally visible projection of a credential (no password hash).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSummary {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
    pub tenant: TenantId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Credential> for CredentialSummary {
    fn from(credential: &Credential) -> Self {
        Self {
            id: credential.id,
            username: credential.username.clone(),
            role: credential.role,
            tenant: credential.tenant.clone(),
            image_url: credential.image_url.clone(),
            created_at: credential.created_at,
        }
    }
}

impl From<Credential> for CredentialSummary {
    fn from(credential: Credential) -> Self {
        Self {
            id: credential.id,
            username: credential.username,
            role: credential.role,
            tenant: credential.tenant,
            image_url: credential.image_url,
            created_at: credential.created_at,
        }
    }
}
