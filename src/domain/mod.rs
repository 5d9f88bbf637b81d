//! Domain models for LeadHub Core

pub mod org;
pub mod rbac;
pub mod user;

pub use org::*;
pub use rbac::*;
pub use user::*;
