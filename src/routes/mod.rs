//! Route rule resolution
//!
//! Maps an incoming (path, method) to the required (action, resource) pair
//! via the static rule table. Resolution order, first match wins:
//!
//! 1. trailing-slash normalization
//! 2. exact match against method-agnostic literal rules
//! 3. exact match against method-specific literal rules
//! 4. parameterized patterns in table declaration order (`:name` segments
//!    accept any single non-slash segment and capture it)
//! 5. for paths under the API namespace, a synthesized fallback requiring
//!    read access on a resource token derived from the path
//!
//! Literal matches outrank patterns regardless of where a pattern sits in
//! the table, so a looser parameterized entry can never shadow a more
//! specific literal one. Paths outside the API namespace resolve to `None`
//! and pass through (static assets and the like).

mod table;

use crate::domain::{Action, Resource};
use axum::http::Method;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Required (action, resource) pair for a matched route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredPermission {
    pub action: Action,
    pub resource: Resource,
}

/// Outcome of route resolution.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub required: RequiredPermission,
    /// Self-access is permitted on this route.
    pub self_scope: bool,
    /// Captured pattern parameters (empty for literal matches).
    pub params: HashMap<String, String>,
    /// True when no rule matched and the default was synthesized.
    pub fallback: bool,
}

#[derive(Debug)]
enum Segment {
    Literal(&'static str),
    Param(&'static str),
}

#[derive(Debug)]
struct RouteRule {
    segments: Vec<Segment>,
    method: Option<Method>,
    required: RequiredPermission,
    self_scope: bool,
    has_params: bool,
}

impl RouteRule {
    fn matches_literal(&self, path: &str) -> bool {
        debug_assert!(!self.has_params);
        let mut parts = path.split('/').skip(1);
        let mut idx = 0;
        for part in parts.by_ref() {
            match self.segments.get(idx) {
                Some(Segment::Literal(lit)) if *lit == part => idx += 1,
                _ => return false,
            }
        }
        idx == self.segments.len()
    }

    fn matches_pattern(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = path.split('/').skip(1).collect();
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) => {
                    if *lit != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert((*name).to_string(), part.to_string());
                }
            }
        }
        Some(params)
    }
}

fn parse_method(token: &str) -> Method {
    match token {
        "GET" => Method::GET,
        "POST" => Method::POST,
        "PUT" => Method::PUT,
        "PATCH" => Method::PATCH,
        "DELETE" => Method::DELETE,
        other => panic!("unsupported method in route table: {other}"),
    }
}

static ROUTE_TABLE: LazyLock<Vec<RouteRule>> = LazyLock::new(|| {
    table::RULES
        .iter()
        .map(|spec| {
            let segments: Vec<Segment> = spec
                .pattern
                .split('/')
                .skip(1)
                .map(|seg| match seg.strip_prefix(':') {
                    Some(name) => Segment::Param(name),
                    None => Segment::Literal(seg),
                })
                .collect();
            let has_params = segments.iter().any(|s| matches!(s, Segment::Param(_)));
            RouteRule {
                segments,
                method: spec.method.map(parse_method),
                required: RequiredPermission {
                    action: spec.action,
                    resource: spec.resource,
                },
                self_scope: spec.self_scope,
                has_params,
            }
        })
        .collect()
});

/// Strip one trailing slash; the root path is left alone.
fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

fn in_api_namespace(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

/// Derive the fallback resource token from the path segment after `/api`.
///
/// Deny-safe by construction: tokens outside the vocabulary, and tokens
/// naming reserved administrative resources or the wildcard, map to
/// `Resource::Unclassified`, which no stored grant can carry.
fn fallback_resource(path: &str) -> Resource {
    let token = path
        .trim_start_matches('/')
        .split('/')
        .nth(1)
        .unwrap_or("")
        .to_uppercase()
        .replace('-', "_");

    match token.parse::<Resource>() {
        Ok(resource) if !resource.is_reserved() && resource != Resource::All => resource,
        _ => Resource::Unclassified,
    }
}

/// Resolve the required permission for `(path, method)`.
///
/// Deterministic: the same input always yields the same output. Returns
/// `None` only for paths outside the API namespace.
pub fn resolve(path: &str, method: &Method) -> Option<RouteMatch> {
    let path = normalize(path);

    if !in_api_namespace(path) {
        return None;
    }

    // Exact match, method-agnostic rules.
    for rule in ROUTE_TABLE.iter() {
        if !rule.has_params && rule.method.is_none() && rule.matches_literal(path) {
            return Some(RouteMatch {
                required: rule.required,
                self_scope: rule.self_scope,
                params: HashMap::new(),
                fallback: false,
            });
        }
    }

    // Exact match, method-specific overrides.
    for rule in ROUTE_TABLE.iter() {
        if !rule.has_params && rule.method.as_ref() == Some(method) && rule.matches_literal(path) {
            return Some(RouteMatch {
                required: rule.required,
                self_scope: rule.self_scope,
                params: HashMap::new(),
                fallback: false,
            });
        }
    }

    // Parameterized patterns, table declaration order.
    for rule in ROUTE_TABLE.iter().filter(|r| r.has_params) {
        if rule.method.is_some() && rule.method.as_ref() != Some(method) {
            continue;
        }
        if let Some(params) = rule.matches_pattern(path) {
            return Some(RouteMatch {
                required: rule.required,
                self_scope: rule.self_scope,
                params,
                fallback: false,
            });
        }
    }

    // Unlisted endpoint under the API namespace: default to requiring read
    // access on a token derived from the path, never an unguarded pass.
    let resource = fallback_resource(path);
    tracing::warn!(
        path,
        method = %method,
        resource = %resource,
        "No route rule matched; synthesized read fallback"
    );
    Some(RouteMatch {
        required: RequiredPermission {
            action: Action::Read,
            resource,
        },
        self_scope: false,
        params: HashMap::new(),
        fallback: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn required_for(path: &str, method: Method) -> RequiredPermission {
        resolve(path, &method).expect("expected a match").required
    }

    #[test]
    fn test_outside_api_namespace_passes_through() {
        assert!(resolve("/health", &Method::GET).is_none());
        assert!(resolve("/auth/whoami", &Method::GET).is_none());
        assert!(resolve("/static/logo.png", &Method::GET).is_none());
        assert!(resolve("/apiary", &Method::GET).is_none());
    }

    #[test]
    fn test_exact_method_agnostic() {
        assert_eq!(
            required_for("/api/dashboard", Method::GET),
            RequiredPermission {
                action: Action::Read,
                resource: Resource::Dashboard,
            }
        );
        // Method-agnostic rules apply to every method.
        assert_eq!(
            required_for("/api/dashboard", Method::POST),
            RequiredPermission {
                action: Action::Read,
                resource: Resource::Dashboard,
            }
        );
    }

    #[test]
    fn test_method_specific_overrides() {
        assert_eq!(
            required_for("/api/users", Method::GET),
            RequiredPermission {
                action: Action::Read,
                resource: Resource::User,
            }
        );
        assert_eq!(
            required_for("/api/users", Method::POST),
            RequiredPermission {
                action: Action::Create,
                resource: Resource::User,
            }
        );
    }

    #[test]
    fn test_trailing_slash_normalized() {
        assert_eq!(
            required_for("/api/users/", Method::GET),
            required_for("/api/users", Method::GET)
        );
    }

    #[test]
    fn test_lead_detail_by_method() {
        assert_eq!(
            required_for("/api/leads/42", Method::GET),
            RequiredPermission {
                action: Action::Read,
                resource: Resource::LeadForm,
            }
        );
        assert_eq!(
            required_for("/api/leads/42", Method::DELETE),
            RequiredPermission {
                action: Action::Delete,
                resource: Resource::LeadForm,
            }
        );
    }

    #[test]
    fn test_pattern_captures_params() {
        let matched = resolve("/api/organizations/abc-123/members", &Method::GET).unwrap();
        assert_eq!(
            matched.params.get("organization_id").map(String::as_str),
            Some("abc-123")
        );
        assert!(!matched.fallback);
    }

    #[test]
    fn test_param_rejects_empty_segment() {
        // "/api/leads//notes" has an empty middle segment.
        let matched = resolve("/api/leads//notes", &Method::GET).unwrap();
        assert!(matched.fallback);
    }

    #[test]
    fn test_self_route_flagged() {
        let matched = resolve("/api/users/profile/me/7", &Method::GET).unwrap();
        assert!(matched.self_scope);
        assert_eq!(matched.params.get("user_id").map(String::as_str), Some("7"));
    }

    #[test]
    fn test_literal_outranks_pattern_despite_declaration_order() {
        // "/api/reports/summary" is declared after "/api/reports/:report_id"
        // and must still win.
        assert_eq!(
            required_for("/api/reports/summary", Method::GET),
            RequiredPermission {
                action: Action::Read,
                resource: Resource::Dashboard,
            }
        );
        assert_eq!(
            required_for("/api/reports/99", Method::GET),
            RequiredPermission {
                action: Action::Read,
                resource: Resource::Report,
            }
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let first = required_for("/api/leads/42", Method::GET);
        let second = required_for("/api/leads/42", Method::GET);
        assert_eq!(first, second);
    }

    #[test]
    fn test_fallback_derives_known_resource() {
        let matched = resolve("/api/report", &Method::GET).unwrap();
        assert!(matched.fallback);
        assert_eq!(
            matched.required,
            RequiredPermission {
                action: Action::Read,
                resource: Resource::Report,
            }
        );
    }

    #[test]
    fn test_fallback_unknown_token_is_unclassified() {
        let matched = resolve("/api/export-jobs/7", &Method::GET).unwrap();
        assert!(matched.fallback);
        assert_eq!(matched.required.resource, Resource::Unclassified);
        assert_eq!(matched.required.action, Action::Read);
    }

    #[test]
    fn test_fallback_never_yields_reserved_resource() {
        // Unlisted verbs on reserved surfaces must not synthesize access.
        let matched = resolve("/api/settings/advanced", &Method::GET).unwrap();
        assert!(matched.fallback);
        assert_eq!(matched.required.resource, Resource::Unclassified);

        let matched = resolve("/api/all/everything", &Method::GET).unwrap();
        assert_eq!(matched.required.resource, Resource::Unclassified);
    }

    #[test]
    fn test_unlisted_method_falls_back() {
        let matched = resolve("/api/leads/42", &Method::PATCH).unwrap();
        assert!(matched.fallback);
    }

    #[test]
    fn test_api_root_is_guarded() {
        let matched = resolve("/api", &Method::GET).unwrap();
        assert!(matched.fallback);
        assert_eq!(matched.required.resource, Resource::Unclassified);
    }
}
