//! Single operation endpoint.
//!
//! `POST /api` with `{"operation": "<Name>", "arguments": {...}}`. The session
//! middleware has already attached an `IdentityContext`; operations that need
//! one enforce it in the credential service before touching the store.

use axum::{
    extract::{Extension, State},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::{Validate, ValidationErrors};

use auth_service_lib::service::{
    require_authenticated, CredentialUpdate, IdentityContext, NewCredential,
};
use common::AppResult;
use domain::{Role, TenantId};

use crate::extractors::ValidatedJson;
use crate::response::{ApiResponse, Created};
use crate::state::AppState;

/// Login arguments. Checked only by the credential verifier, so an unknown
/// username is `NOT_FOUND` and a wrong password `INVALID_CREDENTIAL` even
/// when empty.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginArgs {
    pub username: String,
    pub password: String,
}

/// Credential creation arguments
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCredentialArgs {
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,
    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub password: String,
    pub role: Role,
    #[serde(alias = "hotelName")]
    #[validate(length(min = 1, max = 128, message = "Tenant must be 1-128 characters"))]
    pub tenant: String,
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,
}

/// Admin password probe arguments
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyAdminPasswordArgs {
    #[serde(alias = "hotelName")]
    #[validate(length(min = 1, message = "Tenant is required"))]
    pub tenant: String,
    #[serde(alias = "passwordInput")]
    pub password: String,
}

/// Credential rotation arguments
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCredentialArgs {
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: Option<String>,
    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub password: String,
    #[serde(alias = "hotelName")]
    #[validate(length(min = 1, message = "Tenant is required"))]
    pub tenant: String,
    pub role: Role,
}

/// Admin password rotation arguments
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminCredentialArgs {
    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub password: String,
    #[serde(alias = "hotelName")]
    #[validate(length(min = 1, message = "Tenant is required"))]
    pub tenant: String,
}

/// Tenant listing arguments
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListCredentialsArgs {
    #[serde(alias = "hotelName")]
    #[validate(length(min = 1, message = "Tenant is required"))]
    pub tenant: String,
}

/// Every operation the endpoint accepts.
#[derive(Debug, Deserialize)]
#[serde(tag = "operation", content = "arguments")]
pub enum Operation {
    Login(LoginArgs),
    CreateCredential(CreateCredentialArgs),
    VerifyAdminPassword(VerifyAdminPasswordArgs),
    UpdateCredential(UpdateCredentialArgs),
    UpdateAdminCredential(UpdateAdminCredentialArgs),
    Me,
    ListCredentials(ListCredentialsArgs),
    Logout,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Login(_) => "Login",
            Operation::CreateCredential(_) => "CreateCredential",
            Operation::VerifyAdminPassword(_) => "VerifyAdminPassword",
            Operation::UpdateCredential(_) => "UpdateCredential",
            Operation::UpdateAdminCredential(_) => "UpdateAdminCredential",
            Operation::Me => "Me",
            Operation::ListCredentials(_) => "ListCredentials",
            Operation::Logout => "Logout",
        }
    }
}

impl Validate for Operation {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Operation::CreateCredential(args) => args.validate(),
            Operation::VerifyAdminPassword(args) => args.validate(),
            Operation::UpdateCredential(args) => args.validate(),
            Operation::UpdateAdminCredential(args) => args.validate(),
            Operation::ListCredentials(args) => args.validate(),
            Operation::Login(_) | Operation::Me | Operation::Logout => Ok(()),
        }
    }
}

#[derive(Debug, Serialize)]
struct LogoutResult {
    revoked: bool,
}

/// Create operation routes
pub fn operation_routes() -> Router<AppState> {
    Router::new().route("/api", post(execute))
}

/// Dispatch one operation.
pub async fn execute(
    State(state): State<AppState>,
    Extension(context): Extension<IdentityContext>,
    ValidatedJson(operation): ValidatedJson<Operation>,
) -> AppResult<Response> {
    debug!(
        operation = operation.name(),
        authenticated = context.is_authenticated(),
        "dispatching operation"
    );

    let response = match operation {
        Operation::Login(args) => {
            let payload = state.credentials.login(args.username, args.password).await?;
            ApiResponse::success(payload).into_response()
        }
        Operation::CreateCredential(args) => {
            let summary = state
                .credentials
                .create_credential(NewCredential {
                    username: args.username,
                    password: args.password,
                    role: args.role,
                    tenant: TenantId::parse(args.tenant)?,
                    image_url: args.image_url,
                })
                .await?;
            Created(summary).into_response()
        }
        Operation::VerifyAdminPassword(args) => {
            let valid = state
                .credentials
                .verify_admin_password(TenantId::parse(args.tenant)?, args.password)
                .await?;
            ApiResponse::success(valid).into_response()
        }
        Operation::UpdateCredential(args) => {
            let summary = state
                .credentials
                .update_credential(
                    &context,
                    CredentialUpdate {
                        username: args.username,
                        password: args.password,
                        tenant: TenantId::parse(args.tenant)?,
                        role: args.role,
                    },
                )
                .await?;
            ApiResponse::success(summary).into_response()
        }
        Operation::UpdateAdminCredential(args) => {
            let summary = state
                .credentials
                .update_admin_credential(&context, TenantId::parse(args.tenant)?, args.password)
                .await?;
            ApiResponse::success(summary).into_response()
        }
        Operation::Me => {
            let summary = state.credentials.me(&context).await?;
            ApiResponse::success(summary).into_response()
        }
        Operation::ListCredentials(args) => {
            let summaries = state
                .credentials
                .list_credentials(&context, TenantId::parse(args.tenant)?)
                .await?;
            ApiResponse::success(summaries).into_response()
        }
        Operation::Logout => {
            let identity = require_authenticated(&context)?;
            let revoked = state.sessions.revoke(identity).await?;
            ApiResponse::with_message(LogoutResult { revoked }, "Logged out").into_response()
        }
    };

    Ok(response)
}
