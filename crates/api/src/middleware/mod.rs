//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller, from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] / [`rbac::RequireStaff`] -- role gates.
//! - [`cron::CronCaller`] -- scheduler or admin access for periodic jobs.

pub mod auth;
pub mod cron;
pub mod rbac;
