//! Store access for LeadHub Core
//!
//! Read-only point lookups: the guard reads identity and permission data
//! fresh per request, trading latency for immediate revocation consistency.

pub mod org;
pub mod user;

pub use org::{OrganizationRepository, OrganizationRepositoryImpl};
pub use user::{UserRepository, UserRepositoryImpl};

#[cfg(test)]
pub use org::MockOrganizationRepository;
#[cfg(test)]
pub use user::MockUserRepository;
