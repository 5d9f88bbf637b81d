//! LeadHub Core - Multi-tenant authorization backend
//!
//! This crate provides the permission evaluation and route-authorization
//! subsystem of the LeadHub platform: token validation, role and
//! permission aggregation, organization-scoping rules, and the
//! route-pattern-to-required-permission resolution algorithm.

pub mod api;
pub mod authz;
pub mod config;
pub mod domain;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod repository;
pub mod routes;
pub mod server;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
