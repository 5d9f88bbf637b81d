//! User repository
//!
//! Assembles the per-request user aggregate: user row, roles, and each
//! role's permission grants. Grant tokens outside the fixed vocabulary are
//! dropped with a warning instead of widening into evaluable grants.

use crate::domain::{PermissionGrant, Role, RoleWithGrants, User, UserWithRoles};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::MySqlPool;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load the user row plus all roles and their permission grants.
    async fn find_with_roles(&self, id: Uuid) -> Result<Option<UserWithRoles>>;
}

pub struct UserRepositoryImpl {
    pool: MySqlPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn find_role_grants(&self, role_id: Uuid) -> Result<Vec<PermissionGrant>> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT action, resource
            FROM role_permissions
            WHERE role_id = ?
            "#,
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await?;

        let mut grants = Vec::with_capacity(rows.len());
        for (action, resource) in rows {
            match (action.parse(), resource.parse()) {
                (Ok(action), Ok(resource)) => grants.push(PermissionGrant { action, resource }),
                _ => {
                    tracing::warn!(
                        %role_id,
                        action,
                        resource,
                        "Dropping permission grant outside the fixed vocabulary"
                    );
                }
            }
        }
        Ok(grants)
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_with_roles(&self, id: Uuid) -> Result<Option<UserWithRoles>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, display_name, organization_id, active, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(user) = user else {
            return Ok(None);
        };

        let role_rows = sqlx::query_as::<_, Role>(
            r#"
            SELECT r.id, r.name, r.organization_id, r.elevated, r.active, r.created_at, r.updated_at
            FROM roles r
            INNER JOIN user_roles ur ON r.id = ur.role_id
            WHERE ur.user_id = ?
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let mut roles = Vec::with_capacity(role_rows.len());
        for role in role_rows {
            let grants = self.find_role_grants(role.id).await?;
            roles.push(RoleWithGrants { role, grants });
        }

        Ok(Some(UserWithRoles { user, roles }))
    }
}
