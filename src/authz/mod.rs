//! Authorization core: identity loading, tier classification, permission
//! aggregation, organization resolution, and the decision engine.

pub mod context;
pub mod engine;
pub mod loader;
pub mod org;
pub mod permissions;
pub mod tier;

pub use context::DecisionContext;
pub use engine::{authorize, require_org_membership, GuardOptions};
pub use permissions::PermissionSet;
pub use tier::PrivilegeTier;
