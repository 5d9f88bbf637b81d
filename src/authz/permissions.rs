//! Permission aggregation
//!
//! Flattens every (action, resource) grant across a user's active roles
//! into one evaluable set. Checks are existence tests; duplicates collapse
//! and insertion order is irrelevant.

use crate::domain::{Action, PermissionGrant, Resource, UserWithRoles};
use crate::authz::tier::PrivilegeTier;
use std::collections::HashSet;

/// Aggregated grant set for one request.
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    grants: HashSet<PermissionGrant>,
}

impl PermissionSet {
    /// The universal set held by the platform-super tier.
    pub fn universal() -> Self {
        let mut grants = HashSet::new();
        grants.insert(PermissionGrant::new(Action::All, Resource::All));
        Self { grants }
    }

    /// Aggregate the user's grants, short-circuiting to the universal set
    /// for the platform-super tier. Inactive roles and roles belonging to
    /// an organization other than the user's own contribute nothing: the
    /// effective organization is the organization of the roles actually
    /// used.
    pub fn aggregate(aggregate: &UserWithRoles, tier: PrivilegeTier) -> Self {
        if tier == PrivilegeTier::PlatformSuper {
            return Self::universal();
        }

        let own_org = aggregate.user.organization_id;
        let grants = aggregate
            .roles
            .iter()
            .filter(|entry| entry.role.active)
            .filter(|entry| entry.role.organization_id.is_none() || entry.role.organization_id == own_org)
            .flat_map(|entry| entry.grants.iter().copied())
            .collect();
        Self { grants }
    }

    /// True iff the set holds the universal grant, the exact pair, or a
    /// `Manage` grant on the resource when the requested action is CRUD.
    pub fn allows(&self, action: Action, resource: Resource) -> bool {
        if self.grants.contains(&PermissionGrant::new(Action::All, Resource::All)) {
            return true;
        }
        if self.grants.contains(&PermissionGrant::new(action, resource)) {
            return true;
        }
        action.is_crud() && self.grants.contains(&PermissionGrant::new(Action::Manage, resource))
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, RoleWithGrants, User};
    use chrono::Utc;
    use uuid::Uuid;

    fn user_with(roles: Vec<RoleWithGrants>, org: Option<Uuid>) -> UserWithRoles {
        let now = Utc::now();
        UserWithRoles {
            user: User {
                id: Uuid::new_v4(),
                email: "t@example.com".to_string(),
                display_name: None,
                organization_id: org,
                active: true,
                created_at: now,
                updated_at: now,
            },
            roles,
        }
    }

    fn role(org: Option<Uuid>, active: bool, grants: Vec<PermissionGrant>) -> RoleWithGrants {
        let now = Utc::now();
        RoleWithGrants {
            role: Role {
                id: Uuid::new_v4(),
                name: "SALES_REP".to_string(),
                organization_id: org,
                elevated: false,
                active,
                created_at: now,
                updated_at: now,
            },
            grants,
        }
    }

    #[test]
    fn test_universal_allows_anything() {
        let set = PermissionSet::universal();
        assert!(set.allows(Action::Delete, Resource::Billing));
        assert!(set.allows(Action::Chat, Resource::ChatMessage));
        assert!(set.allows(Action::Read, Resource::Unclassified));
    }

    #[test]
    fn test_super_tier_short_circuits() {
        let user = user_with(vec![], None);
        let set = PermissionSet::aggregate(&user, PrivilegeTier::PlatformSuper);
        assert!(set.allows(Action::Manage, Resource::Settings));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_exact_grant() {
        let org = Some(Uuid::new_v4());
        let user = user_with(
            vec![role(org, true, vec![PermissionGrant::new(Action::Read, Resource::LeadForm)])],
            org,
        );
        let set = PermissionSet::aggregate(&user, PrivilegeTier::Member);
        assert!(set.allows(Action::Read, Resource::LeadForm));
        assert!(!set.allows(Action::Delete, Resource::LeadForm));
        assert!(!set.allows(Action::Read, Resource::Report));
    }

    #[test]
    fn test_manage_subsumes_crud() {
        let org = Some(Uuid::new_v4());
        let user = user_with(
            vec![role(org, true, vec![PermissionGrant::new(Action::Manage, Resource::LeadForm)])],
            org,
        );
        let set = PermissionSet::aggregate(&user, PrivilegeTier::Member);
        assert!(set.allows(Action::Create, Resource::LeadForm));
        assert!(set.allows(Action::Read, Resource::LeadForm));
        assert!(set.allows(Action::Update, Resource::LeadForm));
        assert!(set.allows(Action::Delete, Resource::LeadForm));
        // MANAGE does not subsume non-CRUD actions.
        assert!(!set.allows(Action::Post, Resource::LeadForm));
        assert!(!set.allows(Action::Chat, Resource::LeadForm));
    }

    #[test]
    fn test_inactive_roles_contribute_nothing() {
        let org = Some(Uuid::new_v4());
        let user = user_with(
            vec![role(org, false, vec![PermissionGrant::new(Action::Read, Resource::LeadForm)])],
            org,
        );
        let set = PermissionSet::aggregate(&user, PrivilegeTier::Member);
        assert!(set.is_empty());
        assert!(!set.allows(Action::Read, Resource::LeadForm));
    }

    #[test]
    fn test_cross_org_roles_contribute_nothing() {
        let own = Some(Uuid::new_v4());
        let other = Some(Uuid::new_v4());
        let user = user_with(
            vec![role(other, true, vec![PermissionGrant::new(Action::Read, Resource::LeadForm)])],
            own,
        );
        let set = PermissionSet::aggregate(&user, PrivilegeTier::Member);
        assert!(set.is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let org = Some(Uuid::new_v4());
        let grant = PermissionGrant::new(Action::Read, Resource::Report);
        let user = user_with(
            vec![role(org, true, vec![grant]), role(org, true, vec![grant])],
            org,
        );
        let set = PermissionSet::aggregate(&user, PrivilegeTier::Member);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_empty_set_denies_by_default() {
        let user = user_with(vec![], Some(Uuid::new_v4()));
        let set = PermissionSet::aggregate(&user, PrivilegeTier::Member);
        assert!(set.is_empty());
        assert!(!set.allows(Action::Read, Resource::Dashboard));
    }
}
