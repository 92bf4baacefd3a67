//! Handlers for the `/functions` endpoints.
//!
//! These answer with the `{ "success": true, ... }` envelope and are meant
//! for the web app's account flows, exports, scheduled jobs and email
//! triggers.

pub mod expiry;
pub mod export;
pub mod notifications;
pub mod password_reset;
pub mod users;
