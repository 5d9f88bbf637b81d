//! Unified error handling for LeadHub Core
//!
//! Every authorization failure is recovered at the guard boundary and
//! converted into a structured JSON response carrying a stable
//! machine-readable code. Credential and identity errors share the 401
//! class and a generic message so account existence does not leak;
//! infrastructure failures map to 500 and are logged, never silently
//! treated as denial.

use crate::domain::{Action, Resource};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authorization token is required")]
    TokenRequired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("User is missing or deactivated")]
    InvalidUser,

    #[error("Permission denied: {action} on {resource}")]
    PermissionDenied { action: Action, resource: Resource },

    #[error("This resource is restricted to the account owner")]
    SelfAccessOnly,

    #[error("Organization access denied: {0}")]
    OrgAccessDenied(String),

    #[error("Organization not found: {0}")]
    TenantNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code exposed to clients.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::TokenRequired => "TOKEN_REQUIRED",
            AppError::InvalidToken(_) => "INVALID_TOKEN",
            AppError::TokenExpired => "TOKEN_EXPIRED",
            AppError::InvalidUser => "INVALID_USER",
            AppError::PermissionDenied { .. } => "PERMISSION_DENIED",
            AppError::SelfAccessOnly => "SELF_ACCESS_ONLY",
            AppError::OrgAccessDenied(_) => "ORG_ACCESS_DENIED",
            AppError::TenantNotFound(_) => "TENANT_NOT_FOUND",
            AppError::Database(_) | AppError::Internal(_) => "AUTH_INFRASTRUCTURE_ERROR",
        }
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    required_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    required_resource: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message, required) = match &self {
            AppError::TokenRequired => (
                StatusCode::UNAUTHORIZED,
                "Missing authorization token".to_string(),
                None,
            ),
            // Credential and identity failures are intentionally
            // indistinguishable in wording.
            AppError::InvalidToken(_) | AppError::InvalidUser => (
                StatusCode::UNAUTHORIZED,
                "Invalid or expired credentials".to_string(),
                None,
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "Token has expired".to_string(),
                None,
            ),
            AppError::PermissionDenied { action, resource } => (
                StatusCode::FORBIDDEN,
                format!("Missing permission: {} on {}", action, resource),
                Some((*action, *resource)),
            ),
            AppError::SelfAccessOnly => (
                StatusCode::FORBIDDEN,
                "This resource is restricted to the account owner".to_string(),
                None,
            ),
            AppError::OrgAccessDenied(msg) => (StatusCode::FORBIDDEN, msg.clone(), None),
            AppError::TenantNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Organization {} not found", id),
                None,
            ),
            AppError::Database(e) => {
                tracing::error!("Database error during authorization: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Authorization infrastructure error".to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error during authorization: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Authorization infrastructure error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: code,
            message,
            required_action: required.map(|(a, _)| a.to_string()),
            required_resource: required.map(|(_, r)| r.to_string()),
        });

        (status, body).into_response()
    }
}
