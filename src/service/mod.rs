//! Authorization-enforcing services.
//!
//! Each service is a stateless facade over the store traits: it decides
//! whether the principal may perform the operation, shapes the response
//! (full vs. restricted field set) and delegates persistence. Decisions are
//! pure functions of the principal and the fetched state, so services are
//! safe to share across any number of concurrent request handlers.

pub mod orgs;
pub mod tasks;
pub mod users;

pub use orgs::OrganizationService;
pub use tasks::TaskService;
pub use users::UserService;

use uuid::Uuid;

use crate::error::AppError;
use crate::store::DirectoryStore;

/// A deactivated organization keeps its data readable but rejects new
/// mutating operations from its members. Called by every mutating service
/// operation before the write.
pub(crate) async fn ensure_org_active(
    directory: &dyn DirectoryStore,
    organization_id: Uuid,
) -> Result<(), AppError> {
    let organization = directory
        .find_org_by_id(organization_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Organization not found".into()))?;

    if !organization.active {
        return Err(AppError::Forbidden("Organization is deactivated".into()));
    }

    Ok(())
}
