//! In-process credential store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Credential, Role, TenantId};

use super::CredentialStore;

/// Credential store backed by a map guarded by an async `RwLock`.
///
/// Uniqueness checks and writes happen under the same write guard, so two
/// concurrent creates for one username cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    records: RwLock<HashMap<Uuid, Credential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn username_taken(records: &HashMap<Uuid, Credential>, username: &str, except: Uuid) -> bool {
    records
        .values()
        .any(|c| c.id != except && c.username == username)
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Credential>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Credential>> {
        let records = self.records.read().await;
        Ok(records.values().find(|c| c.username == username).cloned())
    }

    async fn find_by_tenant_and_role(
        &self,
        tenant: &TenantId,
        role: Role,
    ) -> AppResult<Option<Credential>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|c| &c.tenant == tenant && c.role == role)
            .min_by_key(|c| (c.created_at, c.id))
            .cloned())
    }

    async fn list_by_tenant(&self, tenant: &TenantId) -> AppResult<Vec<Credential>> {
        let records = self.records.read().await;
        let mut found: Vec<Credential> = records
            .values()
            .filter(|c| &c.tenant == tenant)
            .cloned()
            .collect();
        found.sort_by_key(|c| (c.created_at, c.id));
        Ok(found)
    }

    async fn create(&self, credential: Credential) -> AppResult<Credential> {
        let mut records = self.records.write().await;
        if username_taken(&records, &credential.username, credential.id) {
            return Err(AppError::already_exists("Username"));
        }
        if records.contains_key(&credential.id) {
            return Err(AppError::already_exists("Credential"));
        }
        records.insert(credential.id, credential.clone());
        Ok(credential)
    }

    async fn update(&self, credential: Credential) -> AppResult<Credential> {
        let mut records = self.records.write().await;
        if !records.contains_key(&credential.id) {
            return Err(AppError::not_found("Credential"));
        }
        if username_taken(&records, &credential.username, credential.id) {
            return Err(AppError::already_exists("Username"));
        }
        records.insert(credential.id, credential.clone());
        Ok(credential)
    }
}
