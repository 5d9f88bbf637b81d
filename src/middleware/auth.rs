//! Authentication extractor
//!
//! `AuthUser` gives handlers the verified claim set without running the
//! full guard; routes behind `authorize_middleware` should prefer the
//! `DecisionContext` extension instead.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use uuid::Uuid;

use crate::error::AppError;
use crate::jwt::JwtManager;
use crate::state::AppState;

/// Authenticated caller extracted from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    /// Organization embedded at login, if any.
    pub org_id: Option<Uuid>,
    /// Advisory permission snapshot from the token. Never evaluated for
    /// authorization; the guard re-derives grants from the store.
    pub permission_snapshot: Vec<String>,
}

/// Extract the bearer token from the Authorization header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    if !headers.contains_key(AUTHORIZATION) {
        return Err(AppError::TokenRequired);
    }

    let Authorization(bearer) = headers.typed_get::<Authorization<Bearer>>().ok_or_else(|| {
        AppError::InvalidToken("Authorization header must use Bearer scheme".to_string())
    })?;

    Ok(bearer.token().to_string())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;
        let claims = state.jwt.verify_access_token(&token)?;
        let user_id = JwtManager::caller_id(&claims)?;
        let org_id = JwtManager::claim_org_id(&claims);

        Ok(Self {
            user_id,
            email: claims.email,
            org_id,
            permission_snapshot: claims.permissions,
        })
    }
}
