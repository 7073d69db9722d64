//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Tenant owner with rights to rotate credentials
pub const ROLE_ADMIN: &str = "Admin";

/// Regular staff account (waiters, kitchen, cashiers)
pub const ROLE_STAFF: &str = "Staff";

// =============================================================================
// Validation
// =============================================================================

/// Maximum username length
pub const MAX_USERNAME_LENGTH: usize = 64;

/// Maximum password length accepted before hashing
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum tenant identifier length
pub const MAX_TENANT_LENGTH: usize = 128;

// =============================================================================
// Authentication
// =============================================================================

/// Fixed identity token lifetime in hours
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Minimum signing secret length in bytes
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// Token type identifier returned with issued tokens
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
