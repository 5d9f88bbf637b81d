//! Privilege tier classification
//!
//! Role names are matched by value against the reserved names from
//! `AuthzConfig`; the outcome is a closed tagged variant computed once and
//! carried through the decision context, so no guard repeats the string
//! comparisons.

use crate::config::AuthzConfig;
use crate::domain::RoleWithGrants;
use serde::{Deserialize, Serialize};

/// Coarse privilege tier. Exactly one tier applies per request, evaluated
/// in this priority order; lower-priority matches are ignored once a higher
/// one is found. A user holding both an org-admin role and an elevated role
/// is treated as org-admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrivilegeTier {
    Member,
    ElevatedMember,
    OrgAdmin,
    PlatformSuper,
}

impl PrivilegeTier {
    /// Classify from the user's active roles.
    pub fn classify(roles: &[RoleWithGrants], config: &AuthzConfig) -> Self {
        let active = roles.iter().filter(|r| r.role.active);

        let mut tier = PrivilegeTier::Member;
        for entry in active {
            let candidate = if entry.role.name == config.super_admin_role {
                PrivilegeTier::PlatformSuper
            } else if entry.role.name == config.org_admin_role {
                PrivilegeTier::OrgAdmin
            } else if entry.role.elevated {
                PrivilegeTier::ElevatedMember
            } else {
                PrivilegeTier::Member
            };
            if candidate > tier {
                tier = candidate;
            }
        }
        tier
    }

    /// Short tag for logs and introspection responses.
    pub fn as_tag(self) -> &'static str {
        match self {
            PrivilegeTier::PlatformSuper => "platform_super",
            PrivilegeTier::OrgAdmin => "org_admin",
            PrivilegeTier::ElevatedMember => "elevated_member",
            PrivilegeTier::Member => "member",
        }
    }
}
