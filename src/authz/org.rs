//! Organization (tenant) resolution
//!
//! The effective organization for a request comes from three fallback
//! sources in priority order: the verified claim, an explicit header, and
//! a path parameter. Platform-super callers additionally require the
//! resolved organization to exist, guarding against acting on a stale or
//! deleted record; other tiers defer membership to the decision engine.

use crate::authz::tier::PrivilegeTier;
use crate::error::{AppError, Result};
use crate::repository::OrganizationRepository;
use axum::http::HeaderMap;
use std::collections::HashMap;
use uuid::Uuid;

/// Header carrying an explicit organization id.
pub const ORG_HEADER: &str = "x-organization-id";

/// Route parameter carrying an organization id.
pub const ORG_PARAM: &str = "organization_id";

fn candidate_from_header(headers: &HeaderMap) -> Option<Uuid> {
    let raw = headers.get(ORG_HEADER)?.to_str().ok()?;
    match Uuid::parse_str(raw) {
        Ok(id) => Some(id),
        Err(_) => {
            // Deny-safe: an unparseable header is treated as absent; the
            // membership guard still compares whatever resolves.
            tracing::warn!(header = raw, "Ignoring malformed {} header", ORG_HEADER);
            None
        }
    }
}

fn candidate_from_params(params: &HashMap<String, String>) -> Option<Uuid> {
    params.get(ORG_PARAM).and_then(|raw| Uuid::parse_str(raw).ok())
}

/// Resolve the effective organization id for this request.
pub async fn resolve_org(
    claim_org: Option<Uuid>,
    headers: &HeaderMap,
    params: &HashMap<String, String>,
    tier: PrivilegeTier,
    orgs: &dyn OrganizationRepository,
) -> Result<Option<Uuid>> {
    let resolved = claim_org
        .or_else(|| candidate_from_header(headers))
        .or_else(|| candidate_from_params(params));

    if tier == PrivilegeTier::PlatformSuper {
        if let Some(org_id) = resolved {
            if orgs.find_by_id(org_id).await?.is_none() {
                return Err(AppError::TenantNotFound(org_id.to_string()));
            }
        }
    }

    Ok(resolved)
}
