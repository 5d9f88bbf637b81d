//! HTTP endpoints owned by the authorization core

use axum::{response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::authz::DecisionContext;
use crate::middleware::AuthUser;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint. Lives outside the API namespace, so it is never
/// evaluated by the guard.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
pub struct WhoamiResponse {
    pub user_id: String,
    pub email: String,
    pub org_id: Option<String>,
}

/// Identity introspection from the verified token alone.
pub async fn whoami(auth: AuthUser) -> impl IntoResponse {
    Json(WhoamiResponse {
        user_id: auth.user_id.to_string(),
        email: auth.email,
        org_id: auth.org_id.map(|id| id.to_string()),
    })
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub caller_id: String,
    pub tier: &'static str,
    pub org_id: Option<String>,
}

/// Guarded introspection endpoint exposing the decision context the guard
/// attached for this request.
pub async fn dashboard(Extension(ctx): Extension<DecisionContext>) -> impl IntoResponse {
    Json(DashboardResponse {
        caller_id: ctx.caller_id.to_string(),
        tier: ctx.tier.as_tag(),
        org_id: ctx.org_id.map(|id| id.to_string()),
    })
}
