//! Tenant-scope authorization.
//!
//! Every read or mutation of a resource that is addressable across tenants
//! (a task, an organization record, a user) goes through
//! [`authorize_org_scope`] before anything else is decided. A scope mismatch
//! is reported as `NotFound`, never as `Forbidden`: a 403 would confirm to
//! the caller that the resource exists in another organization.

use uuid::Uuid;

use crate::error::AppError;
use crate::models::Principal;

/// Confirms the target resource belongs to the principal's organization.
///
/// `resource` is the display name used in the denial ("Task", "User",
/// "Organization"). Callers must use the same `"{resource} not found"`
/// message for genuinely absent resources, so the two denials are
/// indistinguishable.
pub fn authorize_org_scope(
    principal: &Principal,
    target_organization_id: Uuid,
    resource: &str,
) -> Result<(), AppError> {
    if principal.organization_id == target_organization_id {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("{} not found", resource)))
    }
}
