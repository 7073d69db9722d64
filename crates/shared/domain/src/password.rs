//! Password value object - salted Argon2id hashing and verification.
//!
//! The plaintext never outlives the call that receives it; only the PHC hash
//! string (algorithm, parameters, salt and digest) is kept.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::constants::MAX_PASSWORD_LENGTH;
use crate::error::{DomainError, DomainResult};

/// Hashed password stored on a credential record.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Errors
    /// Returns a validation error if the password is empty or longer than
    /// [`MAX_PASSWORD_LENGTH`], and a password error if hashing fails.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        Self::validate(plain_text)?;
        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Check plaintext length rules without hashing.
    pub fn validate(plain_text: &str) -> DomainResult<()> {
        if plain_text.is_empty() {
            return Err(DomainError::invalid("password", "is required"));
        }
        if plain_text.chars().count() > MAX_PASSWORD_LENGTH {
            return Err(DomainError::invalid(
                "password",
                format!("must be at most {} characters", MAX_PASSWORD_LENGTH),
            ));
        }
        Ok(())
    }

    /// Wrap an existing hash loaded from the credential store.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Verify a plaintext password against this hash.
    ///
    /// A malformed stored hash never matches.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Self::argon2()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    fn hash(plain_text: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// Argon2id, v19, m=19456 KiB, t=2, p=1.
    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}
