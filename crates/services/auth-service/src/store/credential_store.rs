//! Credential store contract.

use async_trait::async_trait;
use uuid::Uuid;

use common::AppResult;
use domain::{Credential, Role, TenantId};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Keyed store of credential records.
///
/// Implementations must enforce username uniqueness on `create` and `update`
/// themselves and report collisions as `AppError::AlreadyExists`; the service
/// layer's existence check alone is racy.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find a record by its subject id
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Credential>>;

    /// Find a record by its globally unique username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<Credential>>;

    /// Find the oldest record of a tenant holding `role`
    async fn find_by_tenant_and_role(
        &self,
        tenant: &TenantId,
        role: Role,
    ) -> AppResult<Option<Credential>>;

    /// List a tenant's records, oldest first
    async fn list_by_tenant(&self, tenant: &TenantId) -> AppResult<Vec<Credential>>;

    /// Insert a new record
    async fn create(&self, credential: Credential) -> AppResult<Credential>;

    /// Replace an existing record (matched by id)
    async fn update(&self, credential: Credential) -> AppResult<Credential>;
}
