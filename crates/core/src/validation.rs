//! Field-level validation shared by request handlers.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Validate an email address and return it trimmed and lowercased.
pub fn normalize_email(email: &str) -> Result<String, CoreError> {
    let normalized = email.trim().to_lowercase();
    if !normalized.validate_email() {
        return Err(CoreError::Validation(format!(
            "Invalid email address '{}'",
            email.trim()
        )));
    }
    Ok(normalized)
}

/// Reject blank required text fields.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized() {
        assert_eq!(
            normalize_email("  Jean.Dupont@Example.FR ").unwrap(),
            "jean.dupont@example.fr"
        );
    }

    #[test]
    fn malformed_email_rejected() {
        assert!(normalize_email("not-an-email").is_err());
        assert!(normalize_email("").is_err());
    }

    #[test]
    fn blank_fields_rejected() {
        assert!(require_non_empty("nom", "Martin").is_ok());
        let err = require_non_empty("nom", "  ").unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: nom must not be empty");
    }
}
