//! Decision engine
//!
//! Ordered, short-circuiting evaluation over the immutable decision
//! context. All deny paths are terminal and synchronous; authorization is
//! not a transient-failure domain. The organization-membership predicate is
//! a separate composable check because not every endpoint is
//! organization-scoped.

use crate::authz::context::DecisionContext;
use crate::authz::tier::PrivilegeTier;
use crate::error::{AppError, Result};
use crate::routes::RequiredPermission;

/// Call-site options controlling which bypasses apply.
#[derive(Debug, Clone, Copy)]
pub struct GuardOptions {
    /// Allow a caller acting on their own user record.
    pub allow_self: bool,
    /// Allow the organization-admin tier through without an explicit grant.
    pub allow_org_admin: bool,
    /// Allow the platform-super tier through unconditionally.
    pub allow_platform_admin: bool,
}

impl Default for GuardOptions {
    fn default() -> Self {
        Self {
            allow_self: true,
            allow_org_admin: true,
            allow_platform_admin: true,
        }
    }
}

/// Evaluate the request against the required permission.
///
/// Evaluation order, first success wins: platform-super bypass, aggregated
/// grant set (universal or exact or MANAGE subsumption), self-access on
/// self-scoped routes, org-admin bypass. Self-access never applies to a
/// route that is not self-scoped, even when the captured user-identifier
/// parameter happens to equal the caller id. A failed check on a
/// self-scoped route denies with `SELF_ACCESS_ONLY`; every other failure
/// carries the required action/resource for client-side diagnostics.
pub fn authorize(
    ctx: &DecisionContext,
    required: RequiredPermission,
    self_scope: bool,
    options: GuardOptions,
) -> Result<()> {
    if options.allow_platform_admin && ctx.tier == PrivilegeTier::PlatformSuper {
        return Ok(());
    }

    if ctx.permissions.allows(required.action, required.resource) {
        return Ok(());
    }

    if self_scope && options.allow_self && ctx.is_self_request() {
        return Ok(());
    }

    if options.allow_org_admin && ctx.tier == PrivilegeTier::OrgAdmin {
        return Ok(());
    }

    if self_scope {
        Err(AppError::SelfAccessOnly)
    } else {
        Err(AppError::PermissionDenied {
            action: required.action,
            resource: required.resource,
        })
    }
}

/// Organization-membership predicate for organization-scoped endpoints.
///
/// Requires the caller's own organization to equal the resolved one;
/// platform-super callers are exempt. Fail-closed: a request that resolved
/// no organization, or a caller without one, is denied.
pub fn require_org_membership(ctx: &DecisionContext) -> Result<()> {
    if ctx.tier == PrivilegeTier::PlatformSuper {
        return Ok(());
    }
    match (ctx.caller_org_id, ctx.org_id) {
        (Some(own), Some(resolved)) if own == resolved => Ok(()),
        _ => Err(AppError::OrgAccessDenied(
            "Caller does not belong to the target organization".to_string(),
        )),
    }
}
