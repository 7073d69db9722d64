//! Identity token signing and verification (HS256 JWT).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use common::{AppError, AppResult, SigningSecret};
use domain::{Credential, Role, TenantId, TOKEN_LIFETIME_HOURS, TOKEN_TYPE_BEARER};

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Credential record id
    pub sub: Uuid,
    pub username: String,
    pub role: Role,
    pub tenant: TenantId,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch), always `iat` + 24h
    pub exp: i64,
    /// Unique per issued token
    pub jti: Uuid,
}

/// Signed token handed to the client after login.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

/// Why a presented token was not accepted.
///
/// Only ever logged; callers see an anonymous context for all of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    #[error("malformed token")]
    Malformed,
    #[error("signature mismatch")]
    BadSignature,
    #[error("token expired")]
    Expired,
    #[error("token revoked")]
    Revoked,
}

/// Signs and verifies identity tokens with the process-wide secret.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("keys", &"[REDACTED]")
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against an explicit clock in `verify`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime: Duration::hours(TOKEN_LIFETIME_HOURS),
        }
    }

    /// Sign a token for `credential`, valid for `[now, now + 24h)`.
    pub fn issue(&self, credential: &Credential, now: DateTime<Utc>) -> AppResult<IssuedToken> {
        let issued_at = now.timestamp();
        let expires_at = issued_at + self.lifetime.num_seconds();

        let claims = Claims {
            sub: credential.id,
            username: credential.username.clone(),
            role: credential.role,
            tenant: credential.tenant.clone(),
            iat: issued_at,
            exp: expires_at,
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("token signing failed: {}", e)))?;

        Ok(IssuedToken {
            token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            issued_at,
            expires_at,
        })
    }

    /// Check signature and expiry at `now`.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenRejection> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenRejection::BadSignature,
                ErrorKind::ExpiredSignature => TokenRejection::Expired,
                _ => TokenRejection::Malformed,
            }
        })?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenRejection::Expired);
        }

        Ok(data.claims)
    }
}
