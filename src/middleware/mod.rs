//! HTTP middleware for LeadHub Core

pub mod auth;
pub mod guard;
pub mod path_guard;

pub use auth::AuthUser;
pub use guard::{authorize_middleware, require_org_membership_middleware};
pub use path_guard::path_guard_middleware;
