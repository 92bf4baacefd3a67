//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `profiles.role_custom` in
//! `20260301000002_create_identity_tables.sql`.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_COMMERCIAL: &str = "commercial";
pub const ROLE_PARTENAIRE: &str = "partenaire";
pub const ROLE_ACQUEREUR: &str = "acquereur";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_COMMERCIAL, ROLE_PARTENAIRE, ROLE_ACQUEREUR];

/// Internal staff (admin or commercial) may act on every record.
pub fn is_staff(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_COMMERCIAL
}

/// Validate a role name supplied by a client.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}
