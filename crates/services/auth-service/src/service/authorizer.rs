//! Tenant-scope gate applied before every scoped operation.

use tracing::warn;

use common::{AppError, AppResult};
use domain::TenantId;

use super::session::{Identity, IdentityContext};

/// Require any authenticated identity.
pub fn require_authenticated(context: &IdentityContext) -> AppResult<&Identity> {
    context.identity().ok_or(AppError::NotAuthenticated)
}

/// Require an authenticated identity whose tenant is `tenant`.
pub fn authorize<'a>(context: &'a IdentityContext, tenant: &TenantId) -> AppResult<&'a Identity> {
    let identity = require_authenticated(context)?;
    if &identity.tenant != tenant {
        warn!(
            subject = %identity.subject,
            tenant = %identity.tenant,
            requested_tenant = %tenant,
            "cross-tenant access denied"
        );
        return Err(AppError::Denied);
    }
    Ok(identity)
}

/// Require an authenticated Admin of `tenant`.
pub fn authorize_admin<'a>(
    context: &'a IdentityContext,
    tenant: &TenantId,
) -> AppResult<&'a Identity> {
    let identity = authorize(context, tenant)?;
    if !identity.is_admin() {
        warn!(subject = %identity.subject, tenant = %tenant, "admin role required");
        return Err(AppError::Denied);
    }
    Ok(identity)
}
