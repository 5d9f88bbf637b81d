//! Shared fixtures for guard flow tests
//!
//! In-memory repository stubs stand in for the store; the guard only ever
//! issues point lookups, so a HashMap per repository is enough.

use async_trait::async_trait;
use axum::{middleware, routing::any, routing::get, Router};
use chrono::Utc;
use leadhub_core::config::{AuthzConfig, Config, DatabaseConfig, JwtConfig};
use leadhub_core::domain::{
    Action, Organization, PermissionGrant, Resource, Role, RoleWithGrants, User, UserWithRoles,
};
use leadhub_core::error::Result;
use leadhub_core::jwt::JwtManager;
use leadhub_core::middleware::{authorize_middleware, require_org_membership_middleware};
use leadhub_core::repository::{OrganizationRepository, UserRepository};
use leadhub_core::state::AppState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub fn test_config() -> Config {
    Config {
        http_host: "127.0.0.1".to_string(),
        http_port: 0,
        database: DatabaseConfig {
            url: "mysql://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        jwt: JwtConfig {
            secret: "guard-flow-test-secret-key".to_string(),
            issuer: "https://leadhub.test".to_string(),
            access_token_ttl_secs: 3600,
            private_key_pem: None,
            public_key_pem: None,
        },
        authz: AuthzConfig::default(),
    }
}

#[derive(Default)]
pub struct StubUserRepo {
    users: Mutex<HashMap<Uuid, UserWithRoles>>,
}

impl StubUserRepo {
    pub fn with_user(aggregate: UserWithRoles) -> Arc<Self> {
        let repo = Self::default();
        repo.users
            .lock()
            .unwrap()
            .insert(aggregate.user.id, aggregate);
        Arc::new(repo)
    }

    /// Deactivate a stored user in place, as an account-management
    /// operation would between two requests.
    pub fn deactivate(&self, id: Uuid) {
        if let Some(aggregate) = self.users.lock().unwrap().get_mut(&id) {
            aggregate.user.active = false;
        }
    }
}

#[async_trait]
impl UserRepository for StubUserRepo {
    async fn find_with_roles(&self, id: Uuid) -> Result<Option<UserWithRoles>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }
}

#[derive(Default)]
pub struct StubOrgRepo {
    orgs: Mutex<HashMap<Uuid, Organization>>,
}

impl StubOrgRepo {
    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_org(id: Uuid) -> Arc<Self> {
        let now = Utc::now();
        let repo = Self::default();
        repo.orgs.lock().unwrap().insert(
            id,
            Organization {
                id,
                name: "Acme".to_string(),
                slug: "acme".to_string(),
                active: true,
                created_at: now,
                updated_at: now,
            },
        );
        Arc::new(repo)
    }
}

#[async_trait]
impl OrganizationRepository for StubOrgRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>> {
        Ok(self.orgs.lock().unwrap().get(&id).cloned())
    }
}

pub fn user_aggregate(org_id: Option<Uuid>, roles: Vec<RoleWithGrants>) -> UserWithRoles {
    let now = Utc::now();
    UserWithRoles {
        user: User {
            id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            display_name: Some("Test User".to_string()),
            organization_id: org_id,
            active: true,
            created_at: now,
            updated_at: now,
        },
        roles,
    }
}

pub fn role_named(
    name: &str,
    org_id: Option<Uuid>,
    grants: Vec<(Action, Resource)>,
) -> RoleWithGrants {
    let now = Utc::now();
    RoleWithGrants {
        role: Role {
            id: Uuid::new_v4(),
            name: name.to_string(),
            organization_id: org_id,
            elevated: false,
            active: true,
            created_at: now,
            updated_at: now,
        },
        grants: grants
            .into_iter()
            .map(|(action, resource)| PermissionGrant::new(action, resource))
            .collect(),
    }
}

pub fn state_with(users: Arc<StubUserRepo>, orgs: Arc<StubOrgRepo>) -> AppState {
    AppState::with_repositories(test_config(), users, orgs)
}

/// Mint an access token against the shared test config.
pub fn token_for(user: &User) -> String {
    JwtManager::new(test_config().jwt)
        .create_access_token(user.id, &user.email, user.organization_id, vec![])
        .unwrap()
}

async fn ok_handler() -> &'static str {
    "ok"
}

/// Router with a catch-all API handler behind the authorization guard.
pub fn guarded_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(ok_handler))
        .route("/api", any(ok_handler))
        .route("/api/{*rest}", any(ok_handler))
        .layer(middleware::from_fn_with_state(state, authorize_middleware))
}

/// Router that additionally enforces organization membership.
pub fn org_scoped_app(state: AppState) -> Router {
    Router::new()
        .route("/api/{*rest}", any(ok_handler))
        .layer(middleware::from_fn(require_org_membership_middleware))
        .layer(middleware::from_fn_with_state(state, authorize_middleware))
}
