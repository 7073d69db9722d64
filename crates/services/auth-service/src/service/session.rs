//! Session authentication - bearer token to identity context.
//!
//! Every failure to authenticate (no token, malformed, bad signature,
//! expired, revoked) yields the same anonymous context. The cause is only
//! emitted as a `debug` trace event.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use common::AppResult;
use domain::{Role, TenantId, BEARER_TOKEN_PREFIX};

use super::revocation::RevocationList;
use super::token::{Claims, TokenCodec, TokenRejection};

/// Authenticated caller, decoded from a valid token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub subject: Uuid,
    pub username: String,
    pub role: Role,
    pub tenant: TenantId,
    pub issued_at: i64,
    pub expires_at: i64,
    /// `jti` of the presented token
    pub token_id: Uuid,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            username: claims.username,
            role: claims.role,
            tenant: claims.tenant,
            issued_at: claims.iat,
            expires_at: claims.exp,
            token_id: claims.jti,
        }
    }
}

/// Per-request authorization state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IdentityContext {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

impl IdentityContext {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            IdentityContext::Authenticated(identity) => Some(identity),
            IdentityContext::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, IdentityContext::Authenticated(_))
    }
}

impl From<Option<Identity>> for IdentityContext {
    fn from(identity: Option<Identity>) -> Self {
        identity.map_or(IdentityContext::Anonymous, IdentityContext::Authenticated)
    }
}

/// Token from an `Authorization` header value.
///
/// A leading `"Bearer "` is stripped when present; otherwise the whole value
/// is taken as the token. Missing or blank values yield `None`.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    let value = header?;
    let token = value.strip_prefix(BEARER_TOKEN_PREFIX).unwrap_or(value).trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Validates bearer tokens and builds identity contexts.
pub struct SessionAuthenticator {
    codec: Arc<TokenCodec>,
    revocations: Option<Arc<dyn RevocationList>>,
}

impl std::fmt::Debug for SessionAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAuthenticator")
            .field("codec", &self.codec)
            .field("revocation", &self.revocations.is_some())
            .finish()
    }
}

impl SessionAuthenticator {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self {
            codec,
            revocations: None,
        }
    }

    /// Consult `revocations` on every authentication.
    pub fn with_revocations(mut self, revocations: Arc<dyn RevocationList>) -> Self {
        self.revocations = Some(revocations);
        self
    }

    /// Validate `token` now. Any failure is `None`.
    pub async fn authenticate(&self, token: &str) -> Option<Identity> {
        self.authenticate_at(token, Utc::now()).await
    }

    /// Validate `token` against the clock value `now`.
    pub async fn authenticate_at(&self, token: &str, now: DateTime<Utc>) -> Option<Identity> {
        match self.check(token, now).await {
            Ok(identity) => Some(identity),
            Err(reason) => {
                debug!(%reason, "bearer token rejected");
                None
            }
        }
    }

    /// Build the request's context from an optional bearer token.
    pub async fn identify(&self, token: Option<&str>) -> IdentityContext {
        match token {
            Some(token) => self.authenticate(token).await.into(),
            None => IdentityContext::Anonymous,
        }
    }

    /// Deny the token that produced `identity` for the rest of its lifetime.
    ///
    /// Returns `false` when no revocation list is configured.
    pub async fn revoke(&self, identity: &Identity) -> AppResult<bool> {
        let Some(revocations) = &self.revocations else {
            return Ok(false);
        };
        revocations
            .revoke(identity.subject, identity.token_id, identity.expires_at)
            .await?;
        debug!(subject = %identity.subject, tenant = %identity.tenant, "token revoked");
        Ok(true)
    }

    async fn check(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, TokenRejection> {
        let claims = self.codec.verify(token, now)?;

        if let Some(revocations) = &self.revocations {
            match revocations.is_revoked(claims.sub, claims.jti).await {
                Ok(false) => {}
                Ok(true) => return Err(TokenRejection::Revoked),
                Err(e) => {
                    // Fail closed when the denylist cannot answer
                    warn!(error = %e, "revocation lookup failed");
                    return Err(TokenRejection::Revoked);
                }
            }
        }

        Ok(Identity::from(claims))
    }
}
