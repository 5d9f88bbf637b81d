//! Route authorization middleware
//!
//! Runs the full evaluation chain for every request under the API
//! namespace: bearer extraction, token verification, identity load, tier
//! classification, permission aggregation, organization resolution, route
//! resolution, and the decision engine. On allow, the immutable
//! `DecisionContext` is attached as a request extension; every denial is
//! converted to a structured response here and never reaches handler code.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::authz::{self, loader, org, DecisionContext, GuardOptions, PermissionSet, PrivilegeTier};
use crate::error::{AppError, Result};
use crate::jwt::JwtManager;
use crate::middleware::auth::extract_bearer_token;
use crate::routes;
use crate::state::AppState;
use uuid::Uuid;

/// Route parameter identifying the target user for self-access routes.
const USER_PARAM: &str = "user_id";

pub async fn authorize_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    // The body is never read here; detach the components the evaluation
    // needs so no request borrow is held across its awaits.
    let (path, method, headers) = (
        request.uri().path().to_owned(),
        request.method().clone(),
        request.headers().clone(),
    );
    match evaluate(&state, &path, &method, &headers).await {
        Ok(Some(ctx)) => {
            request.extensions_mut().insert(ctx);
            next.run(request).await
        }
        // Outside the API namespace: pass through untouched.
        Ok(None) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}

/// Organization-scoped variant for endpoints that must also verify
/// membership. Layered inside `authorize_middleware`, which provides the
/// decision context.
pub async fn require_org_membership_middleware(request: Request<Body>, next: Next) -> Response {
    let Some(ctx) = request.extensions().get::<DecisionContext>() else {
        // The guard did not run; refuse rather than pass unevaluated.
        return AppError::Internal(anyhow::anyhow!(
            "organization-scoped route reached without a decision context"
        ))
        .into_response();
    };
    if let Err(e) = authz::require_org_membership(ctx) {
        return e.into_response();
    }
    next.run(request).await
}

async fn evaluate(
    state: &AppState,
    path: &str,
    method: &Method,
    headers: &HeaderMap,
) -> Result<Option<DecisionContext>> {
    // The token requirement comes first for every API-namespaced path, so
    // an unauthenticated probe learns nothing about the route table.
    if !(path == "/api" || path.starts_with("/api/")) {
        return Ok(None);
    }

    let token = extract_bearer_token(headers)?;
    let claims = state.jwt.verify_access_token(&token)?;
    let caller_id = JwtManager::caller_id(&claims)?;

    let identity = loader::load_identity(state.users.as_ref(), state.orgs.as_ref(), caller_id).await?;
    let tier = PrivilegeTier::classify(&identity.user.roles, &state.config.authz);
    let permissions = PermissionSet::aggregate(&identity.user, tier);

    let Some(route) = routes::resolve(path, method) else {
        return Ok(None);
    };

    let claim_org = JwtManager::claim_org_id(&claims);
    let org_id = org::resolve_org(claim_org, headers, &route.params, tier, state.orgs.as_ref())
        .await?;

    let target_user_id = route
        .params
        .get(USER_PARAM)
        .and_then(|raw| Uuid::parse_str(raw).ok());

    let ctx = DecisionContext {
        caller_id,
        tier,
        caller_org_id: identity.user.user.organization_id,
        org_id,
        permissions,
        target_user_id,
    };

    authz::authorize(&ctx, route.required, route.self_scope, GuardOptions::default())?;

    Ok(Some(ctx))
}
