//! Credential service - login, account creation and credential rotation.
//!
//! Password hashing and comparison are CPU-bound (Argon2id) and run on the
//! blocking pool so one slow login never stalls other requests.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tokio::task;
use tracing::{info, warn};

use common::{AppError, AppResult, OptionExt};
use domain::{validate_username, Credential, CredentialSummary, Password, Role, TenantId};

use super::authorizer::{authorize, authorize_admin, require_authenticated};
use super::session::IdentityContext;
use super::token::TokenCodec;
use crate::store::CredentialStore;

/// Successful login result.
#[derive(Debug, Clone, Serialize)]
pub struct AuthPayload {
    pub token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Expiry, seconds since epoch
    pub expires_at: i64,
    pub credential: CredentialSummary,
}

/// Input for creating a credential.
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub tenant: TenantId,
    pub image_url: Option<String>,
}

/// Input for rotating the credential that holds `role` in `tenant`.
#[derive(Debug, Clone)]
pub struct CredentialUpdate {
    /// New username; `None` keeps the current one
    pub username: Option<String>,
    pub password: String,
    pub tenant: TenantId,
    pub role: Role,
}

/// Credential service trait for dependency injection.
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Verify a username/password pair and issue a 24h identity token
    async fn login(&self, username: String, password: String) -> AppResult<AuthPayload>;

    /// Create a credential with a freshly hashed password
    async fn create_credential(&self, input: NewCredential) -> AppResult<CredentialSummary>;

    /// Check `password` against the tenant's Admin credential.
    /// `false` when the tenant has no Admin.
    async fn verify_admin_password(&self, tenant: TenantId, password: String) -> AppResult<bool>;

    /// Re-hash (and optionally rename) the credential holding `role` in `tenant`
    async fn update_credential(
        &self,
        context: &IdentityContext,
        input: CredentialUpdate,
    ) -> AppResult<CredentialSummary>;

    /// Re-hash the tenant's Admin password
    async fn update_admin_credential(
        &self,
        context: &IdentityContext,
        tenant: TenantId,
        password: String,
    ) -> AppResult<CredentialSummary>;

    /// The caller's own credential
    async fn me(&self, context: &IdentityContext) -> AppResult<CredentialSummary>;

    /// Every credential of `tenant`
    async fn list_credentials(
        &self,
        context: &IdentityContext,
        tenant: TenantId,
    ) -> AppResult<Vec<CredentialSummary>>;
}

/// Concrete implementation of CredentialService over a credential store.
pub struct CredentialVerifier {
    store: Arc<dyn CredentialStore>,
    codec: Arc<TokenCodec>,
}

impl CredentialVerifier {
    pub fn new(store: Arc<dyn CredentialStore>, codec: Arc<TokenCodec>) -> Self {
        Self { store, codec }
    }

    /// Locate the (tenant, role) record, re-hash its password and persist.
    async fn rotate(
        &self,
        tenant: &TenantId,
        role: Role,
        username: Option<String>,
        password: String,
    ) -> AppResult<CredentialSummary> {
        if let Some(username) = &username {
            validate_username(username)?;
        }
        Password::validate(&password)?;

        let mut credential = self
            .store
            .find_by_tenant_and_role(tenant, role)
            .await?
            .ok_or_not_found("Credential")?;

        if let Some(username) = username.filter(|u| *u != credential.username) {
            if self.store.find_by_username(&username).await?.is_some() {
                return Err(AppError::already_exists("Username"));
            }
            credential.rename(username);
        }

        credential.set_password(hash_password(password).await?);
        let updated = self.store.update(credential).await?;

        info!(
            username = %updated.username,
            tenant = %updated.tenant,
            role = %updated.role,
            "credential rotated"
        );

        Ok(CredentialSummary::from(updated))
    }
}

#[async_trait]
impl CredentialService for CredentialVerifier {
    async fn login(&self, username: String, password: String) -> AppResult<AuthPayload> {
        let credential = match self.store.find_by_username(&username).await? {
            Some(credential) => credential,
            None => {
                warn!(username = %username, "login rejected: unknown username");
                return Err(AppError::not_found("Credential"));
            }
        };

        if !verify_password(credential.password.clone(), password).await? {
            warn!(
                username = %credential.username,
                tenant = %credential.tenant,
                "login rejected: password mismatch"
            );
            return Err(AppError::InvalidCredential);
        }

        let issued = self.codec.issue(&credential, Utc::now())?;

        info!(
            username = %credential.username,
            tenant = %credential.tenant,
            role = %credential.role,
            "login succeeded"
        );

        Ok(AuthPayload {
            token: issued.token,
            token_type: issued.token_type,
            expires_at: issued.expires_at,
            credential: CredentialSummary::from(credential),
        })
    }

    async fn create_credential(&self, input: NewCredential) -> AppResult<CredentialSummary> {
        validate_username(&input.username)?;
        Password::validate(&input.password)?;

        if self.store.find_by_username(&input.username).await?.is_some() {
            return Err(AppError::already_exists("Username"));
        }

        // One Admin per tenant
        if input.role.is_admin()
            && self
                .store
                .find_by_tenant_and_role(&input.tenant, Role::Admin)
                .await?
                .is_some()
        {
            return Err(AppError::already_exists("Admin credential for tenant"));
        }

        let password = hash_password(input.password).await?;
        let mut credential = Credential::new(input.username, password, input.tenant, input.role);
        credential.image_url = input.image_url;

        let created = self.store.create(credential).await?;

        info!(
            username = %created.username,
            tenant = %created.tenant,
            role = %created.role,
            "credential created"
        );

        Ok(CredentialSummary::from(created))
    }

    async fn verify_admin_password(&self, tenant: TenantId, password: String) -> AppResult<bool> {
        let Some(admin) = self
            .store
            .find_by_tenant_and_role(&tenant, Role::Admin)
            .await?
        else {
            return Ok(false);
        };

        verify_password(admin.password, password).await
    }

    async fn update_credential(
        &self,
        context: &IdentityContext,
        input: CredentialUpdate,
    ) -> AppResult<CredentialSummary> {
        authorize_admin(context, &input.tenant)?;
        self.rotate(&input.tenant, input.role, input.username, input.password)
            .await
    }

    async fn update_admin_credential(
        &self,
        context: &IdentityContext,
        tenant: TenantId,
        password: String,
    ) -> AppResult<CredentialSummary> {
        authorize_admin(context, &tenant)?;
        self.rotate(&tenant, Role::Admin, None, password).await
    }

    async fn me(&self, context: &IdentityContext) -> AppResult<CredentialSummary> {
        let identity = require_authenticated(context)?;
        let credential = self
            .store
            .find_by_id(identity.subject)
            .await?
            .ok_or_not_found("Credential")?;
        Ok(CredentialSummary::from(credential))
    }

    async fn list_credentials(
        &self,
        context: &IdentityContext,
        tenant: TenantId,
    ) -> AppResult<Vec<CredentialSummary>> {
        authorize(context, &tenant)?;
        let credentials = self.store.list_by_tenant(&tenant).await?;
        Ok(credentials.into_iter().map(CredentialSummary::from).collect())
    }
}

/// Hash on the blocking pool.
async fn hash_password(plain_text: String) -> AppResult<Password> {
    task::spawn_blocking(move || Password::new(&plain_text))
        .await
        .map_err(|e| AppError::internal(format!("password hashing task failed: {}", e)))?
        .map_err(AppError::from)
}

/// Constant-time comparison on the blocking pool.
async fn verify_password(stored: Password, plain_text: String) -> AppResult<bool> {
    task::spawn_blocking(move || stored.verify(&plain_text))
        .await
        .map_err(|e| AppError::internal(format!("password verification task failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use common::SigningSecret;
    use uuid::Uuid;

    use super::*;
    use crate::service::session::Identity;
    use crate::store::MockCredentialStore;

    fn codec() -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new(
            &SigningSecret::new("test-secret-key-for-testing-only-32chars").unwrap(),
        ))
    }

    fn tenant(name: &str) -> TenantId {
        TenantId::parse(name).unwrap()
    }

    fn stored(username: &str, password: &str, tenant_name: &str, role: Role) -> Credential {
        Credential::new(
            username.to_string(),
            Password::new(password).unwrap(),
            tenant(tenant_name),
            role,
        )
    }

    fn signed_in(tenant_name: &str, role: Role) -> IdentityContext {
        IdentityContext::Authenticated(Identity {
            subject: Uuid::new_v4(),
            username: "alice".to_string(),
            role,
            tenant: tenant(tenant_name),
            issued_at: 0,
            expires_at: 86_400,
            token_id: Uuid::new_v4(),
        })
    }

    #[tokio::test]
    async fn test_login_unknown_username() {
        let mut store = MockCredentialStore::new();
        store.expect_find_by_username().returning(|_| Ok(None));

        let service = CredentialVerifier::new(Arc::new(store), codec());
        let result = service
            .login("nonexistent".to_string(), "anything".to_string())
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let record = stored("alice", "pw1", "HotelA", Role::Admin);
        let mut store = MockCredentialStore::new();
        store
            .expect_find_by_username()
            .returning(move |_| Ok(Some(record.clone())));

        let service = CredentialVerifier::new(Arc::new(store), codec());
        let result = service.login("alice".to_string(), "wrong".to_string()).await;

        assert!(matches!(result, Err(AppError::InvalidCredential)));
    }

    #[tokio::test]
    async fn test_login_success_returns_summary_and_token() {
        let record = stored("alice", "pw1", "HotelA", Role::Admin);
        let id = record.id;
        let mut store = MockCredentialStore::new();
        store
            .expect_find_by_username()
            .returning(move |_| Ok(Some(record.clone())));

        let codec = codec();
        let service = CredentialVerifier::new(Arc::new(store), codec.clone());
        let payload = service.login("alice".to_string(), "pw1".to_string()).await.unwrap();

        assert_eq!(payload.token_type, "Bearer");
        assert_eq!(payload.credential.id, id);
        let claims = codec.verify(&payload.token, Utc::now()).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.tenant.as_str(), "HotelA");
    }

    #[tokio::test]
    async fn test_create_duplicate_username_never_writes() {
        let existing = stored("alice", "pw1", "HotelA", Role::Staff);
        let mut store = MockCredentialStore::new();
        store
            .expect_find_by_username()
            .returning(move |_| Ok(Some(existing.clone())));
        store.expect_create().never();

        let service = CredentialVerifier::new(Arc::new(store), codec());
        let result = service
            .create_credential(NewCredential {
                username: "alice".to_string(),
                password: "pw2".to_string(),
                role: Role::Staff,
                tenant: tenant("HotelB"),
                image_url: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_create_second_admin_rejected() {
        let admin = stored("alice", "pw1", "HotelA", Role::Admin);
        let mut store = MockCredentialStore::new();
        store.expect_find_by_username().returning(|_| Ok(None));
        store
            .expect_find_by_tenant_and_role()
            .returning(move |_, _| Ok(Some(admin.clone())));
        store.expect_create().never();

        let service = CredentialVerifier::new(Arc::new(store), codec());
        let result = service
            .create_credential(NewCredential {
                username: "mallory".to_string(),
                password: "pw2".to_string(),
                role: Role::Admin,
                tenant: tenant("HotelA"),
                image_url: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_create_hashes_before_storing() {
        let mut store = MockCredentialStore::new();
        store.expect_find_by_username().returning(|_| Ok(None));
        store
            .expect_create()
            .withf(|c| c.password.as_str().starts_with("$argon2id$") && c.password.verify("pw1"))
            .times(1)
            .returning(Ok);

        let service = CredentialVerifier::new(Arc::new(store), codec());
        let summary = service
            .create_credential(NewCredential {
                username: "bob".to_string(),
                password: "pw1".to_string(),
                role: Role::Staff,
                tenant: tenant("HotelA"),
                image_url: Some("https://cdn.example/bob.png".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(summary.username, "bob");
        assert_eq!(summary.image_url.as_deref(), Some("https://cdn.example/bob.png"));
    }

    #[tokio::test]
    async fn test_verify_admin_password_without_admin_is_false() {
        let mut store = MockCredentialStore::new();
        store
            .expect_find_by_tenant_and_role()
            .returning(|_, _| Ok(None));

        let service = CredentialVerifier::new(Arc::new(store), codec());
        let valid = service
            .verify_admin_password(tenant("Nowhere"), "anything".to_string())
            .await
            .unwrap();

        assert!(!valid);
    }

    #[tokio::test]
    async fn test_gated_operations_anonymous_touch_nothing() {
        // No expectations: any store call panics
        let store = MockCredentialStore::new();
        let service = CredentialVerifier::new(Arc::new(store), codec());
        let anonymous = IdentityContext::Anonymous;

        let update = service
            .update_credential(
                &anonymous,
                CredentialUpdate {
                    username: None,
                    password: "pw2".to_string(),
                    tenant: tenant("HotelA"),
                    role: Role::Staff,
                },
            )
            .await;
        assert!(matches!(update, Err(AppError::NotAuthenticated)));

        let rotate = service
            .update_admin_credential(&anonymous, tenant("HotelA"), "pw2".to_string())
            .await;
        assert!(matches!(rotate, Err(AppError::NotAuthenticated)));

        assert!(matches!(service.me(&anonymous).await, Err(AppError::NotAuthenticated)));
        assert!(matches!(
            service.list_credentials(&anonymous, tenant("HotelA")).await,
            Err(AppError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_cross_tenant_operations_denied() {
        let store = MockCredentialStore::new();
        let service = CredentialVerifier::new(Arc::new(store), codec());
        let hotel_a_admin = signed_in("HotelA", Role::Admin);

        let rotate = service
            .update_admin_credential(&hotel_a_admin, tenant("HotelB"), "pw2".to_string())
            .await;
        assert!(matches!(rotate, Err(AppError::Denied)));

        let list = service
            .list_credentials(&hotel_a_admin, tenant("HotelB"))
            .await;
        assert!(matches!(list, Err(AppError::Denied)));
    }

    #[tokio::test]
    async fn test_staff_cannot_rotate_credentials() {
        let store = MockCredentialStore::new();
        let service = CredentialVerifier::new(Arc::new(store), codec());
        let staff = signed_in("HotelA", Role::Staff);

        let rotate = service
            .update_admin_credential(&staff, tenant("HotelA"), "pw2".to_string())
            .await;
        assert!(matches!(rotate, Err(AppError::Denied)));
    }

    #[tokio::test]
    async fn test_update_missing_record_not_found() {
        let mut store = MockCredentialStore::new();
        store
            .expect_find_by_tenant_and_role()
            .returning(|_, _| Ok(None));
        store.expect_update().never();

        let service = CredentialVerifier::new(Arc::new(store), codec());
        let result = service
            .update_credential(
                &signed_in("HotelA", Role::Admin),
                CredentialUpdate {
                    username: Some("carol".to_string()),
                    password: "pw2".to_string(),
                    tenant: tenant("HotelA"),
                    role: Role::Staff,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
