//! User domain model

use super::org::Organization;
use super::rbac::RoleWithGrants;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    /// Organization the user belongs to; platform-tier users may have none.
    pub organization_id: Option<Uuid>,
    /// Users are never deleted, only deactivated.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User aggregate loaded fresh per request: the user row plus every role
/// and each role's permission grants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWithRoles {
    pub user: User,
    pub roles: Vec<RoleWithGrants>,
}

/// Per-request caller identity: the loaded aggregate plus the optional
/// organization enrichment (supplementary, never decision-critical).
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    pub user: UserWithRoles,
    pub organization: Option<Organization>,
}
