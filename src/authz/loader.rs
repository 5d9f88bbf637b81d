//! Identity Loader
//!
//! Loads the caller's current user aggregate fresh for every request, so a
//! deactivation or revoked grant takes effect on the very next request. The
//! secondary organization lookup is enrichment only and degrades
//! gracefully.

use crate::domain::CallerIdentity;
use crate::error::{AppError, Result};
use crate::repository::{OrganizationRepository, UserRepository};
use uuid::Uuid;

/// Load and validate the caller identity.
///
/// A missing or deactivated user denies with `INVALID_USER` before any
/// permission logic runs. Store failures on the primary lookup surface as
/// infrastructure errors; a failure of the organization enrichment only
/// omits the enrichment.
pub async fn load_identity(
    users: &dyn UserRepository,
    orgs: &dyn OrganizationRepository,
    caller_id: Uuid,
) -> Result<CallerIdentity> {
    let aggregate = users
        .find_with_roles(caller_id)
        .await?
        .ok_or(AppError::InvalidUser)?;

    if !aggregate.user.active {
        return Err(AppError::InvalidUser);
    }

    let organization = match aggregate.user.organization_id {
        Some(org_id) => match orgs.find_by_id(org_id).await {
            Ok(org) => org,
            Err(e) => {
                tracing::warn!(
                    %caller_id,
                    %org_id,
                    error = %e,
                    "Organization enrichment lookup failed; proceeding without it"
                );
                None
            }
        },
        None => None,
    };

    Ok(CallerIdentity {
        user: aggregate,
        organization,
    })
}
