//! Token denylist keyed by subject and token id (`jti`).

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use common::AppResult;

/// Store of revoked tokens.
#[async_trait]
pub trait RevocationList: Send + Sync {
    /// Deny the token `(subject, token_id)` until it would have expired anyway.
    async fn revoke(&self, subject: Uuid, token_id: Uuid, expires_at: i64) -> AppResult<()>;

    /// Whether `(subject, token_id)` has been revoked.
    async fn is_revoked(&self, subject: Uuid, token_id: Uuid) -> AppResult<bool>;
}

/// In-process denylist. Entries are dropped once their token has expired.
#[derive(Debug, Default)]
pub struct InMemoryRevocationList {
    entries: RwLock<HashMap<(Uuid, Uuid), i64>>,
}

impl InMemoryRevocationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl RevocationList for InMemoryRevocationList {
    async fn revoke(&self, subject: Uuid, token_id: Uuid, expires_at: i64) -> AppResult<()> {
        let now = Utc::now().timestamp();
        let mut entries = self.entries.write().await;
        entries.retain(|_, exp| *exp > now);
        if expires_at > now {
            entries.insert((subject, token_id), expires_at);
        }
        Ok(())
    }

    async fn is_revoked(&self, subject: Uuid, token_id: Uuid) -> AppResult<bool> {
        Ok(self.entries.read().await.contains_key(&(subject, token_id)))
    }
}
