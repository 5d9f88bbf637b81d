//! Per-request decision context
//!
//! Immutable value threaded through the pipeline as a request extension
//! instead of side-channel mutation of the request object. Created per
//! request, discarded when the request completes.

use crate::authz::permissions::PermissionSet;
use crate::authz::tier::PrivilegeTier;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct DecisionContext {
    /// Verified caller id.
    pub caller_id: Uuid,
    /// Privilege tier, computed once by the role classifier.
    pub tier: PrivilegeTier,
    /// The caller's own organization.
    pub caller_org_id: Option<Uuid>,
    /// Effective organization resolved for this request.
    pub org_id: Option<Uuid>,
    /// Aggregated grant set.
    pub permissions: PermissionSet,
    /// Target user captured from the route's user-identifier parameter.
    pub target_user_id: Option<Uuid>,
}

impl DecisionContext {
    /// Self-access eligibility: the route targets the caller's own record.
    pub fn is_self_request(&self) -> bool {
        self.target_user_id == Some(self.caller_id)
    }
}
