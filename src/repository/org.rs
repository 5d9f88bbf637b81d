//! Organization repository

use crate::domain::Organization;
use crate::error::Result;
use async_trait::async_trait;
use sqlx::MySqlPool;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>>;
}

pub struct OrganizationRepositoryImpl {
    pool: MySqlPool,
}

impl OrganizationRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganizationRepository for OrganizationRepositoryImpl {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>> {
        let organization = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, slug, active, created_at, updated_at
            FROM organizations
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(organization)
    }
}
