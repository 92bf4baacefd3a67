//! Domain logic for YAM Management.
//!
//! This crate has no database or HTTP dependencies: every function works on
//! values already loaded by the caller so it can be unit-tested in isolation.

pub mod birthday;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod lot;
pub mod messaging;
pub mod milestone;
pub mod password_reset;
pub mod roles;
pub mod templates;
pub mod types;
pub mod validation;
